//! Reaction ledger model -> entity mappers

use forum_core::entities::LedgerEntry;
use forum_core::error::DomainError;
use forum_core::value_objects::{AccountId, ReactionCounters, Vote};

use crate::models::{CountersModel, LedgerEntryModel};

impl LedgerEntryModel {
    /// Convert to a typed ledger entry. Fails only if the stored vote is not a known value.
    pub fn into_entry<I: From<i64>>(self) -> Result<LedgerEntry<I>, DomainError> {
        let vote: Vote = self
            .vote
            .parse()
            .map_err(|e| DomainError::DatabaseError(format!("corrupt ledger row: {e}")))?;

        Ok(LedgerEntry::new(
            AccountId::new(self.account_id),
            I::from(self.reactable_id),
            vote,
        ))
    }
}

impl From<CountersModel> for ReactionCounters {
    fn from(model: CountersModel) -> Self {
        ReactionCounters::new(model.likes, model.dislikes)
    }
}

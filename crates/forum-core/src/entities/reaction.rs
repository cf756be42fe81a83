//! Reaction ledger entries and the tri-state vote transition

use crate::value_objects::{AccountId, CounterDelta, Vote};

/// One account's current vote on one reactable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry<I> {
    pub account_id: AccountId,
    pub reactable_id: I,
    pub vote: Vote,
}

impl<I> LedgerEntry<I> {
    pub fn new(account_id: AccountId, reactable_id: I, vote: Vote) -> Self {
        Self {
            account_id,
            reactable_id,
            vote,
        }
    }
}

/// Mutation of the ledger row for an `(account, reactable)` pair.
///
/// `Update` and `Delete` carry the vote the row is expected to hold so the
/// store can refuse the write if another request changed it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    Insert(Vote),
    Update { from: Vote, to: Vote },
    Delete(Vote),
}

impl LedgerOp {
    /// The vote held by the ledger row after this operation, if any
    pub const fn resulting_vote(&self) -> Option<Vote> {
        match self {
            Self::Insert(vote) | Self::Update { to: vote, .. } => Some(*vote),
            Self::Delete(_) => None,
        }
    }

    /// The vote the row must hold before this operation, if any
    pub const fn expected_vote(&self) -> Option<Vote> {
        match self {
            Self::Insert(_) => None,
            Self::Update { from: vote, .. } | Self::Delete(vote) => Some(*vote),
        }
    }
}

/// A ledger mutation paired with the counter delta that keeps the counters in sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionChange {
    pub op: LedgerOp,
    pub delta: CounterDelta,
}

impl ReactionChange {
    /// Decide what casting `vote` does given the account's current ledger state.
    ///
    /// - no entry: count the vote and insert an entry
    /// - same vote again: retract it and delete the entry
    /// - opposite vote: move one unit between the counters and flip the entry
    pub fn decide(existing: Option<Vote>, vote: Vote) -> Self {
        match existing {
            None => Self {
                op: LedgerOp::Insert(vote),
                delta: CounterDelta::default().with(vote.counter(), 1),
            },
            Some(current) if current == vote => Self {
                op: LedgerOp::Delete(vote),
                delta: CounterDelta::default().with(vote.counter(), -1),
            },
            Some(current) => Self {
                op: LedgerOp::Update {
                    from: current,
                    to: vote,
                },
                delta: CounterDelta::default()
                    .with(vote.counter(), 1)
                    .with(current.counter(), -1),
            },
        }
    }
}

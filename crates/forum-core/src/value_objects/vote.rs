//! Vote polarity and the like/dislike counters it drives

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single account's vote on a reactable.
///
/// There is no neutral variant: the absence of a ledger entry means "no vote cast".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    /// Storage representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Dislike => "DISLIKE",
        }
    }

    /// The counter this vote is tallied in
    pub const fn counter(self) -> CounterField {
        match self {
            Self::Like => CounterField::Likes,
            Self::Dislike => CounterField::Dislikes,
        }
    }

    /// The other polarity
    pub const fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when a stored vote value is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vote value: {0}")]
pub struct VoteParseError(pub String);

impl FromStr for Vote {
    type Err = VoteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIKE" => Ok(Self::Like),
            "DISLIKE" => Ok(Self::Dislike),
            other => Err(VoteParseError(other.to_string())),
        }
    }
}

/// Counter columns carried by every reactable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterField {
    Likes,
    Dislikes,
}

/// Signed change to apply to a reactable's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub likes: i32,
    pub dislikes: i32,
}

impl CounterDelta {
    /// Add `amount` to the given counter
    #[must_use]
    pub const fn with(mut self, field: CounterField, amount: i32) -> Self {
        match field {
            CounterField::Likes => self.likes += amount,
            CounterField::Dislikes => self.dislikes += amount,
        }
        self
    }
}

/// Denormalized like/dislike tallies of a reactable.
///
/// `likes` always equals the number of LIKE ledger entries for the reactable,
/// `dislikes` the number of DISLIKE entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounters {
    pub likes: i32,
    pub dislikes: i32,
}

impl ReactionCounters {
    pub const fn new(likes: i32, dislikes: i32) -> Self {
        Self { likes, dislikes }
    }

    /// Apply a delta, returning `None` if either counter would go negative
    pub fn apply(self, delta: CounterDelta) -> Option<Self> {
        let likes = self.likes.checked_add(delta.likes)?;
        let dislikes = self.dislikes.checked_add(delta.dislikes)?;
        (likes >= 0 && dislikes >= 0).then_some(Self { likes, dislikes })
    }
}

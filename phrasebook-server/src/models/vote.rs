//! Vote value validation

use super::ValidationError;

/// A vote cast on a phrase: up, down, or withdrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteValue {
    Down,
    Neutral,
    Up,
}

impl VoteValue {
    /// Parse a raw vote value; only -1, 0 and 1 are accepted.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        match raw {
            -1 => Ok(Self::Down),
            0 => Ok(Self::Neutral),
            1 => Ok(Self::Up),
            other => Err(ValidationError::InvalidVariant {
                field: "vote_value",
                value: other.to_string(),
            }),
        }
    }

    /// Value as stored in `votes.vote_value` (SMALLINT).
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Down => -1,
            Self::Neutral => 0,
            Self::Up => 1,
        }
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::INVALID_INPUT_MESSAGE;

/// Why a piece of input text was turned away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    NotANumber,
    NotFinite,
    NotAnInteger,
    NotPositive,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::NotANumber => "not_a_number",
            Rejection::NotFinite => "not_finite",
            Rejection::NotAnInteger => "not_an_integer",
            Rejection::NotPositive => "not_positive",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RecurError {
    /// Display is always the user-facing message; the reason is for logs.
    #[error("{}", INVALID_INPUT_MESSAGE)]
    InvalidInput(Rejection),
}

impl RecurError {
    pub fn rejection(&self) -> Rejection {
        match self {
            RecurError::InvalidInput(r) => *r,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecurError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_hides_reason() {
        for r in [
            Rejection::NotANumber,
            Rejection::NotFinite,
            Rejection::NotAnInteger,
            Rejection::NotPositive,
        ] {
            let err = RecurError::InvalidInput(r);
            assert_eq!(err.to_string(), "Please enter a positive integer");
            assert_eq!(err.rejection(), r);
        }
    }

    #[test]
    fn test_rejection_serializes_snake_case() {
        let json = serde_json::to_string(&Rejection::NotAnInteger).unwrap();
        assert_eq!(json, "\"not_an_integer\"");
        assert_eq!(Rejection::NotAnInteger.as_str(), "not_an_integer");
    }
}

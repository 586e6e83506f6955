//! The solver's visible state and its transitions.
//!
//! A session is three strings: what the user typed, the last derivation and
//! the last error. At most one of `solution` and `error` is non-empty.
//! Transitions take the state by value and return the next one.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::expand::expand_size;
use crate::input::{ProblemSize, parse_input};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub input: String,
    pub solution: String,
    pub error: String,
}

/// Something the user can do to a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "input", rename_all = "snake_case")]
pub enum Action {
    /// Replace the input text. Solution and error are left alone.
    Edit(String),
    Solve,
    Reset,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(self, input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..self
        }
    }

    /// Validate the input and expand it, or record the rejection.
    pub fn solve(self) -> Self {
        self.solve_with(expand_size)
    }

    /// [`Session::solve`] with the expander supplied by the caller.
    /// `expander` is only invoked for valid input.
    pub fn solve_with(self, expander: impl FnOnce(ProblemSize) -> String) -> Self {
        self.solve_reporting(expander).0
    }

    /// [`Session::solve`] that also hands back the validated size, or the
    /// error whose message was recorded.
    pub fn try_solve(self) -> (Self, Result<ProblemSize>) {
        self.solve_reporting(expand_size)
    }

    fn solve_reporting(
        self,
        expander: impl FnOnce(ProblemSize) -> String,
    ) -> (Self, Result<ProblemSize>) {
        match parse_input(&self.input) {
            Ok(size) => (
                Self {
                    solution: expander(size),
                    error: String::new(),
                    ..self
                },
                Ok(size),
            ),
            Err(e) => (
                Self {
                    solution: String::new(),
                    error: e.to_string(),
                    ..self
                },
                Err(e),
            ),
        }
    }

    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::Edit(input) => self.edit(input),
            Action::Solve => self.solve(),
            Action::Reset => self.reset(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty() && self.solution.is_empty() && self.error.is_empty()
    }
}

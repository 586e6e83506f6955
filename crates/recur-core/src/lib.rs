//! Substitution-method expansion of the recurrence T(n) = 2T(n/2) + O(n).
//!
//! Given a positive integer n, repeatedly replaces T(k) by 2T(k/2) + O(k)
//! until the base case T(1) = O(1), and renders the chain as text. Input
//! validation and the solve/reset session state live here too, as pure
//! functions.
//!
//! Zero I/O: callers decide how the text is shown.

pub mod constants;
pub mod error;
pub mod expand;
pub mod input;
pub mod numeral;
pub mod session;

pub use constants::{BASE_CASE, HOW_IT_WORKS, INVALID_INPUT_MESSAGE, RECURRENCE};
pub use error::{RecurError, Rejection, Result};
pub use expand::{depth, expand, expand_inner, expand_size};
pub use input::{ProblemSize, parse_input};
pub use numeral::numeral;
pub use session::{Action, Session};

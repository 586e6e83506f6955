/// The recurrence this crate expands, in its symbolic form.
pub const RECURRENCE: &str = "T(n) = 2T(n/2) + O(n)";

/// Base case literal; every expansion terminates in it.
pub const BASE_CASE: &str = "T(1) = O(1)";

/// User-visible message for any rejected input.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter a positive integer";

/// Short explanation shown alongside the solver.
pub const HOW_IT_WORKS: [&str; 4] = [
    "Enter a positive integer n",
    "The solver applies the substitution method to solve the recurrence relation",
    "T(n) = 2T(n/2) + O(n) is recursively expanded",
    "Base case: T(1) = O(1)",
];

use crate::constants::BASE_CASE;
use crate::input::ProblemSize;
use crate::numeral::numeral;

/// Full derivation of T(n) by substitution.
///
/// For n > 1 the result has two lines: the recurrence with n
/// substituted, then one left-nested expansion down to the base case.
/// For n <= 1 it is the base-case literal alone.
///
/// Halving is real division, so non-powers of two walk through fractional
/// values (`O(1.5)`) until they drop to 1 or below. A NaN or infinite `n`
/// is rendered as the base case, since halving would never reach it.
pub fn expand(n: f64) -> String {
    if !descends(n) {
        return BASE_CASE.to_string();
    }
    let n_str = numeral(n);
    format!(
        "T({n_str}) = 2T({n_str}/2) + O({n_str})\n{}",
        expand_inner(n)
    )
}

/// One nested frame: `2(<frame for n/2>) + O(n)`, or the base case.
pub fn expand_inner(n: f64) -> String {
    if !descends(n) {
        return BASE_CASE.to_string();
    }
    format!("2({}) + O({})", expand_inner(n / 2.0), numeral(n))
}

/// Expansion of an already validated size.
pub fn expand_size(size: ProblemSize) -> String {
    expand(size.get())
}

fn descends(n: f64) -> bool {
    n > 1.0 && n.is_finite()
}

/// Number of substitution steps before the base case: the count of `2(`
/// wrappers in the expansion line.
pub fn depth(n: f64) -> u32 {
    let mut n = n;
    let mut steps = 0;
    while descends(n) {
        n /= 2.0;
        steps += 1;
    }
    steps
}

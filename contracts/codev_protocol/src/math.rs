//! Fixed-point helpers for the reward computation.
//!
//! Pots and vote stakes are 18-decimal `i128` values, so intermediate
//! products like `pool * weight` overflow `i128` (e.g. `3e19 * 4.5e19`).
//! [`mul_div`] widens the product to [`I256`] and truncates the quotient
//! back down, which keeps the whole reward path in exact integer
//! arithmetic with truncation toward zero.

use soroban_sdk::{Env, I256};

/// `a * b / c` computed at 256-bit width, truncated toward zero.
///
/// All inputs are expected to be non-negative. Returns 0 when `c == 0`;
/// callers handle the zero-denominator cases (no votes, zero total score)
/// before reaching for this, so a zero here never hides a real division.
pub fn mul_div(env: &Env, a: i128, b: i128, c: i128) -> i128 {
    if c == 0 {
        return 0;
    }
    let product = I256::from_i128(env, a).mul(&I256::from_i128(env, b));
    product
        .div(&I256::from_i128(env, c))
        .to_i128()
        .expect("quotient exceeds i128")
}

/// `10^exp` as an `i128`. Saturates at `i128::MAX` beyond 38 digits so an
/// oversized dust-filter exponent simply filters everything.
pub fn pow10(exp: u32) -> i128 {
    let mut value: i128 = 1;
    for _ in 0..exp {
        value = match value.checked_mul(10) {
            Some(v) => v,
            None => return i128::MAX,
        };
    }
    value
}

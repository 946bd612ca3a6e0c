use cfd_types::{Error, BPS_DENOMINATOR, PRICE_SCALE};
use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{Env, U256};

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> Result<u128, Error> {
    if denominator == 0 {
        return Err(Error::DivisionByZero);
    }

    let a_256 = U256::from_u128(env, a);
    let b_256 = U256::from_u128(env, b);
    let denom_256 = U256::from_u128(env, denominator);

    // u128 * u128 always fits in 256 bits, only the quotient can overflow
    let product = a_256.mul(&b_256);
    let result = product.div(&denom_256);

    u128_from_u256(&result)
}

/// Fixed-point power: base^exponent where base and result carry PRICE_SCALE
///
/// Square-and-multiply, truncating after every step.
pub fn powi(env: &Env, base: u128, exponent: u32) -> Result<u128, Error> {
    let mut result = PRICE_SCALE;
    let mut base = base;
    let mut exponent = exponent;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul_div(env, result, base, PRICE_SCALE)?;
        }
        exponent >>= 1;
        if exponent > 0 {
            base = mul_div(env, base, base, PRICE_SCALE)?;
        }
    }

    Ok(result)
}

/// amount * bps / 10_000, rounded down
pub fn bps_of(amount: u128, bps: u32) -> Result<u128, Error> {
    amount
        .fixed_mul_floor(bps as u128, BPS_DENOMINATOR as u128)
        .ok_or(Error::ArithmeticOverflow)
}

pub fn checked_add(a: u128, b: u128) -> Result<u128, Error> {
    a.checked_add(b).ok_or(Error::ArithmeticOverflow)
}

pub fn checked_sub(a: u128, b: u128) -> Result<u128, Error> {
    a.checked_sub(b).ok_or(Error::ArithmeticOverflow)
}

/// Convert U256 to u128, failing if the value does not fit
fn u128_from_u256(value: &U256) -> Result<u128, Error> {
    value.to_u128().ok_or(Error::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    // === mul_div tests ===

    #[test]
    fn test_mul_div_basic() {
        let env = Env::default();
        // (10 * 20) / 5 = 40
        assert_eq!(mul_div(&env, 10, 20, 5), Ok(40));
    }

    #[test]
    fn test_mul_div_max_values() {
        let env = Env::default();
        // (MAX * MAX) / MAX = MAX thanks to the 256-bit intermediate
        let max = u128::MAX;
        assert_eq!(mul_div(&env, max, max, max), Ok(max));
    }

    #[test]
    fn test_mul_div_zero_numerator() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 0, 100, 50), Ok(0));
        assert_eq!(mul_div(&env, 100, 0, 50), Ok(0));
    }

    #[test]
    fn test_mul_div_rounds_down() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 1, 1, 2), Ok(0));
        assert_eq!(mul_div(&env, 3, 1, 2), Ok(1));
        assert_eq!(mul_div(&env, 5, 1, 3), Ok(1));
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 10, 20, 0), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_mul_div_result_overflow() {
        let env = Env::default();
        // MAX * 2 / 1 does not fit the working width
        assert_eq!(
            mul_div(&env, u128::MAX, 2, 1),
            Err(Error::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_mul_div_phantom_overflow() {
        let env = Env::default();
        // a * b overflows u128 but the quotient fits
        let a = 3 * PRICE_SCALE * PRICE_SCALE;
        let b = 2 * PRICE_SCALE;
        assert_eq!(
            mul_div(&env, a, b, PRICE_SCALE),
            Ok(6 * PRICE_SCALE * PRICE_SCALE)
        );
    }

    // === powi tests ===

    #[test]
    fn test_powi_zero_exponent_is_one() {
        let env = Env::default();
        assert_eq!(powi(&env, 5 * PRICE_SCALE, 0), Ok(PRICE_SCALE));
        assert_eq!(powi(&env, 0, 0), Ok(PRICE_SCALE));
    }

    #[test]
    fn test_powi_identity() {
        let env = Env::default();
        let x = 1_234_567_890_123_456_789u128;
        assert_eq!(powi(&env, x, 1), Ok(x));
    }

    #[test]
    fn test_powi_square_and_cube() {
        let env = Env::default();
        // 1.2^2 = 1.44
        assert_eq!(
            powi(&env, 1_200_000_000_000_000_000, 2),
            Ok(1_440_000_000_000_000_000)
        );
        // 0.5^3 = 0.125
        assert_eq!(
            powi(&env, 500_000_000_000_000_000, 3),
            Ok(125_000_000_000_000_000)
        );
        // 2^10 = 1024
        assert_eq!(powi(&env, 2 * PRICE_SCALE, 10), Ok(1024 * PRICE_SCALE));
    }

    #[test]
    fn test_powi_overflow() {
        let env = Env::default();
        // (10^12)^4 = 10^48 does not fit u128 at 18 decimals
        let base = 1_000_000_000_000 * PRICE_SCALE;
        assert_eq!(powi(&env, base, 4), Err(Error::ArithmeticOverflow));
    }

    #[test]
    fn test_powi_is_deterministic() {
        let env = Env::default();
        let base = 1_100_000_000_000_000_001u128;
        assert_eq!(powi(&env, base, 5), powi(&env, base, 5));
    }

    // === bps tests ===

    #[test]
    fn test_bps_of() {
        assert_eq!(bps_of(10_000, 30), Ok(30));
        assert_eq!(bps_of(1_000, 100), Ok(10));
        // 0.3% of 999 = 2.997 -> 2
        assert_eq!(bps_of(999, 30), Ok(2));
        assert_eq!(bps_of(1_000, 0), Ok(0));
        assert_eq!(bps_of(1_000, 10_000), Ok(1_000));
    }

    #[test]
    fn test_checked_helpers() {
        assert_eq!(checked_add(u128::MAX, 1), Err(Error::ArithmeticOverflow));
        assert_eq!(checked_sub(0, 1), Err(Error::ArithmeticOverflow));
        assert_eq!(checked_sub(5, 3), Ok(2));
    }
}

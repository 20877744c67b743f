use alloy_primitives::U256;

/// Fractional bits of the UQ112x112 encoding used by constant-product pair accumulators.
pub const Q112_BITS: usize = 112;

/// `2^112` as an f64. Exact, since it is a power of two.
pub const Q112_F64: f64 = 5_192_296_858_534_827_628_530_496_329_220_096.0;

const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// `2^112` as a 256-bit integer.
pub fn q112() -> U256 {
    U256::from(1u8) << Q112_BITS
}

/// Spot price `numerator / denominator` in UQ112 encoding, truncated toward zero.
///
/// Returns `None` when `denominator` is zero or the scaled numerator does not fit
/// in 256 bits.
pub fn q112_ratio(numerator: U256, denominator: U256) -> Option<U256> {
    numerator.checked_mul(q112())?.checked_div(denominator)
}

/// Nearest f64 to a 256-bit unsigned integer.
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, &limb| acc * TWO_POW_64 + limb as f64)
}

/// Average rate of change of a UQ112 accumulator, decoded to a plain f64.
///
/// Computes `(end - start) / elapsed / 2^112`. The integer part of the division is
/// taken in 256-bit arithmetic before converting, so values far below 1e-6 keep
/// their magnitude. A decreasing accumulator yields a negative result. Zero
/// `elapsed` yields `0.0`.
pub fn q112_rate(start: U256, end: U256, elapsed: u64) -> f64 {
    if elapsed == 0 {
        return 0.0;
    }
    let (delta, negative) = if end >= start {
        (end - start, false)
    } else {
        (start - end, true)
    };
    let (quotient, remainder) = delta.div_rem(U256::from(elapsed));
    let per_second = u256_to_f64(quotient) + u256_to_f64(remainder) / elapsed as f64;
    let rate = per_second / Q112_F64;
    if negative {
        -rate
    } else {
        rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q112_constants_agree() {
        assert_eq!(Q112_F64, 2f64.powi(112));
        assert_eq!(u256_to_f64(q112()), Q112_F64);
    }

    #[test]
    fn ratio_truncates() {
        // 1/3 in UQ112 is floor(2^112 / 3)
        let r = q112_ratio(U256::from(1u8), U256::from(3u8)).unwrap();
        assert_eq!(r, q112() / U256::from(3u8));
        assert!(q112_ratio(U256::from(1u8), U256::ZERO).is_none());
        assert!(q112_ratio(U256::MAX, U256::from(1u8)).is_none());
    }

    #[test]
    fn u256_to_f64_spans_limbs() {
        assert_eq!(u256_to_f64(U256::ZERO), 0.0);
        assert_eq!(u256_to_f64(U256::from(u64::MAX)), u64::MAX as f64);
        let big = U256::from(3u8) << 200usize;
        assert_eq!(u256_to_f64(big), 3.0 * 2f64.powi(200));
    }

    #[test]
    fn rate_preserves_sign_and_small_values() {
        let q = q112();
        let up = q112_rate(U256::ZERO, q * U256::from(50u8), 100);
        assert_eq!(up, 0.5);
        let down = q112_rate(q * U256::from(50u8), U256::ZERO, 100);
        assert_eq!(down, -0.5);

        // 1e-9 per second over a day
        let tiny_per_second = q / U256::from(1_000_000_000u64);
        let end = tiny_per_second * U256::from(86_400u64);
        let rate = q112_rate(U256::ZERO, end, 86_400);
        assert!((rate - 1e-9).abs() < 1e-18);
        assert_eq!(q112_rate(U256::ZERO, end, 0), 0.0);
    }
}

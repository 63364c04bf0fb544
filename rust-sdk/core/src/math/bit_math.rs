use ethnum::U256;

use crate::{CoreError, Result};

/// `n0 * n1 / d`, rounded down.
pub fn checked_mul_div(n0: u128, n1: u128, d: u128) -> Result<u128> {
    checked_mul_div_round_up_if(n0, n1, d, false)
}

/// `n0 * n1 / d`, rounded up.
pub fn checked_mul_div_round_up(n0: u128, n1: u128, d: u128) -> Result<u128> {
    checked_mul_div_round_up_if(n0, n1, d, true)
}

/// `n0 * n1 / d` with a 256-bit intermediate product.
///
/// Fails with `DivideByZero` when `d` is zero and with `MulDivOverflow` when the quotient
/// does not fit into 128 bits.
pub fn checked_mul_div_round_up_if(n0: u128, n1: u128, d: u128, round_up: bool) -> Result<u128> {
    if d == 0 {
        return Err(CoreError::DivideByZero);
    }
    let product = U256::from(n0) * U256::from(n1);
    let quotient = div_round_up_if_u256(product, U256::from(d), round_up)?;
    quotient
        .try_into()
        .map_err(|_| CoreError::MulDivOverflow)
}

pub fn div_round_up(n: u128, d: u128) -> Result<u128> {
    div_round_up_if(n, d, true)
}

pub fn div_round_up_if(n: u128, d: u128, round_up: bool) -> Result<u128> {
    if d == 0 {
        return Err(CoreError::DivideByZero);
    }
    let quotient = n / d;
    Ok(if round_up && n % d > 0 {
        quotient + 1
    } else {
        quotient
    })
}

/// Division of two 256-bit numbers. The result is left wide so callers pick their own cast error.
pub fn div_round_up_if_u256(n: U256, d: U256, round_up: bool) -> Result<U256> {
    if d == U256::ZERO {
        return Err(CoreError::DivideByZero);
    }
    let quotient = n / d;
    Ok(if round_up && n % d != U256::ZERO {
        quotient + U256::ONE
    } else {
        quotient
    })
}

/// Shifts a 256-bit number left by 64 bits, failing if any set bit would be lost.
pub fn checked_shl_64(n: U256) -> Result<U256> {
    if n.leading_zeros() < 64 {
        return Err(CoreError::MultiplicationOverflow);
    }
    Ok(n << 64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_checked_mul_div() {
        assert_eq!(checked_mul_div(10, 10, 3), Ok(33));
        assert_eq!(checked_mul_div_round_up(10, 10, 3), Ok(34));
        assert_eq!(checked_mul_div_round_up(10, 10, 5), Ok(20));
        assert_eq!(checked_mul_div(u128::MAX, u128::MAX, u128::MAX), Ok(u128::MAX));
        assert_eq!(checked_mul_div(u128::MAX, 2, 1), Err(CoreError::MulDivOverflow));
        assert_eq!(checked_mul_div(1, 1, 0), Err(CoreError::DivideByZero));
    }

    #[test]
    fn test_checked_shl_64() {
        assert_eq!(checked_shl_64(U256::ONE), Ok(U256::ONE << 64));
        assert_eq!(
            checked_shl_64(U256::ONE << 191),
            Ok(U256::ONE << 255)
        );
        assert_eq!(
            checked_shl_64(U256::ONE << 192),
            Err(CoreError::MultiplicationOverflow)
        );
    }

    proptest! {
        #[test]
        fn test_div_round_up_if(n in 0..u128::MAX, d in 0..u128::MAX) {
            let rounded = div_round_up(n, d);
            if d == 0 {
                prop_assert_eq!(rounded, Err(CoreError::DivideByZero));
            } else {
                let unrounded = div_round_up_if(n, d, false).unwrap();
                prop_assert_eq!(unrounded, n / d);
                let diff = rounded.unwrap() - unrounded;
                prop_assert!(diff <= 1);
                prop_assert_eq!(diff == 1, n % d > 0);
            }
        }

        #[test]
        fn test_checked_mul_div_round_up_if(n0 in 0..u128::MAX, n1 in 0..u128::MAX, d in 1..u128::MAX) {
            let wide = U256::from(n0) * U256::from(n1);
            let expected = wide / U256::from(d);
            match checked_mul_div(n0, n1, d) {
                Ok(value) => {
                    prop_assert_eq!(U256::from(value), expected);
                    let rounded = checked_mul_div_round_up(n0, n1, d);
                    let remainder = wide % U256::from(d);
                    if remainder == U256::ZERO {
                        prop_assert_eq!(rounded, Ok(value));
                    } else if value < u128::MAX {
                        prop_assert_eq!(rounded, Ok(value + 1));
                    }
                }
                Err(err) => {
                    prop_assert_eq!(err, CoreError::MulDivOverflow);
                    prop_assert!(expected > U256::from(u128::MAX));
                }
            }
        }
    }
}

use libm::{floor, pow, sqrt};

use crate::{
    invert_tick_index, sqrt_price_to_tick_index, tick_index_to_sqrt_price, CoreError, Result,
    MAX_SQRT_PRICE, MIN_SQRT_PRICE,
};

const Q64_RESOLUTION: f64 = 18446744073709551616.0;

// Floating point results are for display and user input only. Quotes never go through here.

/// Convert a decimal price (token B per token A) into a Q64.64 sqrt price.
pub fn price_to_sqrt_price(price: f64, decimals_a: u8, decimals_b: u8) -> Result<u128> {
    let power = pow(10f64, decimals_a as f64 - decimals_b as f64);
    let sqrt_price = floor(sqrt(price / power) * Q64_RESOLUTION);
    if !(MIN_SQRT_PRICE as f64..=MAX_SQRT_PRICE as f64).contains(&sqrt_price) {
        return Err(CoreError::SqrtPriceOutOfBounds);
    }
    Ok(sqrt_price as u128)
}

/// Convert a Q64.64 sqrt price into a decimal price.
pub fn sqrt_price_to_price(sqrt_price: u128, decimals_a: u8, decimals_b: u8) -> f64 {
    let power = pow(10f64, decimals_a as f64 - decimals_b as f64);
    pow(sqrt_price as f64 / Q64_RESOLUTION, 2.0) * power
}

pub fn tick_index_to_price(tick_index: i32, decimals_a: u8, decimals_b: u8) -> Result<f64> {
    let sqrt_price = tick_index_to_sqrt_price(tick_index)?;
    Ok(sqrt_price_to_price(sqrt_price, decimals_a, decimals_b))
}

pub fn price_to_tick_index(price: f64, decimals_a: u8, decimals_b: u8) -> Result<i32> {
    let sqrt_price = price_to_sqrt_price(price, decimals_a, decimals_b)?;
    sqrt_price_to_tick_index(sqrt_price)
}

/// The price of token A in token B, rounded to the nearest tick.
pub fn invert_price(price: f64, decimals_a: u8, decimals_b: u8) -> Result<f64> {
    let tick_index = price_to_tick_index(price, decimals_a, decimals_b)?;
    tick_index_to_price(invert_tick_index(tick_index), decimals_a, decimals_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.00999999, 8, 6, 184467348503352096)]
    #[case(100.0, 6, 6, 184467440737095516160)]
    #[case(100.0111, 6, 8, 1844776783959692673024)]
    fn test_price_conversion(
        #[case] price: f64,
        #[case] decimals_a: u8,
        #[case] decimals_b: u8,
        #[case] sqrt_price: u128,
    ) {
        assert_eq!(price_to_sqrt_price(price, decimals_a, decimals_b), Ok(sqrt_price));
        assert_relative_eq!(sqrt_price_to_price(sqrt_price, decimals_a, decimals_b), price);
    }

    #[test]
    fn test_price_to_sqrt_price_out_of_bounds() {
        assert_eq!(price_to_sqrt_price(0.0, 6, 6), Err(CoreError::SqrtPriceOutOfBounds));
        assert_eq!(price_to_sqrt_price(-1.0, 6, 6), Err(CoreError::SqrtPriceOutOfBounds));
        assert_eq!(price_to_sqrt_price(1e40, 6, 6), Err(CoreError::SqrtPriceOutOfBounds));
    }

    #[test]
    fn test_tick_index_price_conversion() {
        assert_relative_eq!(tick_index_to_price(0, 6, 6).unwrap(), 1.0);
        assert_relative_eq!(tick_index_to_price(-92111, 8, 6).unwrap(), 0.009998, epsilon = 1e-5);
        assert_relative_eq!(tick_index_to_price(92108, 6, 8).unwrap(), 99.999912, epsilon = 1e-5);
        assert_eq!(price_to_tick_index(1.0, 6, 6), Ok(0));
        assert_eq!(price_to_tick_index(0.009998, 8, 6), Ok(-92111));
        assert_eq!(price_to_tick_index(99.999912, 6, 8), Ok(92108));
    }

    #[test]
    fn test_invert_price() {
        assert_relative_eq!(invert_price(100.0, 6, 6).unwrap(), 0.01, epsilon = 1e-5);
    }

    #[test]
    fn test_sqrt_price_round_trip() {
        // 140.66 USDC per SOL
        let sqrt_price = 6918418495991757039u128;
        let price = sqrt_price_to_price(sqrt_price, 9, 6);
        assert_relative_eq!(price, 140.66116595692344, epsilon = 1e-9);
        let sqrt_price_back = price_to_sqrt_price(price, 9, 6).unwrap();
        let diff = sqrt_price_back.abs_diff(sqrt_price) as f64 / sqrt_price as f64;
        assert_relative_eq!(diff, 0.0, epsilon = 1e-12);
    }
}

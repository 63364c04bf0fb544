use ethnum::U256;

use crate::{
    checked_shl_64, div_round_up_if, div_round_up_if_u256, CoreError, Result, BPS_DENOMINATOR,
    MAX_SQRT_PRICE, MIN_SQRT_PRICE, Q64_RESOLUTION,
};

/// A token amount that may not fit into a u64.
///
/// The swap step uses this to tell "the whole price range costs more than any u64 amount"
/// apart from a genuine arithmetic failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AmountDelta {
    Valid(u64),
    ExceedsMax(CoreError),
}

impl AmountDelta {
    pub fn lte(&self, other: u64) -> bool {
        match self {
            AmountDelta::Valid(value) => *value <= other,
            AmountDelta::ExceedsMax(_) => false,
        }
    }

    pub fn exceeds_max(&self) -> bool {
        matches!(self, AmountDelta::ExceedsMax(_))
    }

    pub fn into_result(self) -> Result<u64> {
        match self {
            AmountDelta::Valid(value) => Ok(value),
            AmountDelta::ExceedsMax(err) => Err(err),
        }
    }
}

/// Calculate the amount of token A between two sqrt prices.
///
/// `Δa = L * (√P_upper - √P_lower) / (√P_upper * √P_lower)`
///
/// # Parameters
/// - `sqrt_price_0`, `sqrt_price_1`: The two square root prices, in any order
/// - `liquidity`: The liquidity across the range
/// - `round_up`: Whether to round up or not
///
/// # Returns
/// - `u64`: The amount delta
pub fn get_amount_delta_a(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64> {
    try_get_amount_delta_a(sqrt_price_0, sqrt_price_1, liquidity, round_up)?.into_result()
}

pub fn try_get_amount_delta_a(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<AmountDelta> {
    let (sqrt_price_lower, sqrt_price_upper) = order_prices(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;

    let numerator = checked_shl_64(U256::from(liquidity) * U256::from(sqrt_price_diff))?;
    let denominator = U256::from(sqrt_price_upper) * U256::from(sqrt_price_lower);

    let result = div_round_up_if_u256(numerator, denominator, round_up)?;
    Ok(match u64::try_from(result) {
        Ok(value) => AmountDelta::Valid(value),
        Err(_) => AmountDelta::ExceedsMax(CoreError::TokenMaxExceeded),
    })
}

/// Calculate the amount of token B between two sqrt prices.
///
/// `Δb = L * (√P_upper - √P_lower)`
///
/// # Parameters
/// - `sqrt_price_0`, `sqrt_price_1`: The two square root prices, in any order
/// - `liquidity`: The liquidity across the range
/// - `round_up`: Whether to round up or not
///
/// # Returns
/// - `u64`: The amount delta
pub fn get_amount_delta_b(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64> {
    try_get_amount_delta_b(sqrt_price_0, sqrt_price_1, liquidity, round_up)?.into_result()
}

pub fn try_get_amount_delta_b(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<AmountDelta> {
    let (sqrt_price_lower, sqrt_price_upper) = order_prices(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;

    let product = U256::from(liquidity) * U256::from(sqrt_price_diff);
    let result = product >> Q64_RESOLUTION;
    let should_round = round_up && product & U256::from(u64::MAX) != U256::ZERO;
    let result = if should_round {
        result + U256::ONE
    } else {
        result
    };

    Ok(match u64::try_from(result) {
        Ok(value) => AmountDelta::Valid(value),
        Err(_) => AmountDelta::ExceedsMax(CoreError::MultiplicationOverflow),
    })
}

/// Calculate the sqrt price after adding (input) or removing (output) an amount of token A.
/// The result is rounded up so the pool never gives away more than it should.
///
/// # Returns
/// - `Ok`: The next sqrt price
/// - `Err`: `DivideByZero` if removing more token A than the liquidity holds, or
///   `TokenMinSubceeded` / `TokenMaxExceeded` if the price leaves the valid range
pub fn get_next_sqrt_price_from_a_round_up(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
) -> Result<u128> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    let product = U256::from(sqrt_price) * U256::from(amount);
    let numerator = checked_shl_64(U256::from(liquidity) * U256::from(sqrt_price))?;

    let liquidity_shifted = U256::from(liquidity) << Q64_RESOLUTION;
    if !amount_specified_is_input && liquidity_shifted <= product {
        return Err(CoreError::DivideByZero);
    }

    let denominator = if amount_specified_is_input {
        liquidity_shifted + product
    } else {
        liquidity_shifted - product
    };

    let price: u128 = div_round_up_if_u256(numerator, denominator, true)?
        .try_into()
        .map_err(|_| CoreError::NumberCastError)?;

    if price < MIN_SQRT_PRICE {
        return Err(CoreError::TokenMinSubceeded);
    }
    if price > MAX_SQRT_PRICE {
        return Err(CoreError::TokenMaxExceeded);
    }
    Ok(price)
}

/// Calculate the sqrt price after adding (input) or removing (output) an amount of token B.
/// The price delta is rounded down for inputs and up for outputs.
pub fn get_next_sqrt_price_from_b_round_down(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
) -> Result<u128> {
    let amount_x64 = (amount as u128) << Q64_RESOLUTION;
    let delta = div_round_up_if(amount_x64, liquidity, !amount_specified_is_input)?;

    if amount_specified_is_input {
        sqrt_price
            .checked_add(delta)
            .ok_or(CoreError::SqrtPriceOutOfBounds)
    } else {
        sqrt_price
            .checked_sub(delta)
            .ok_or(CoreError::SqrtPriceOutOfBounds)
    }
}

/// The sqrt price reached after moving `amount` of the specified token through `liquidity`.
pub fn get_next_sqrt_price(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u128> {
    if amount_specified_is_input == a_to_b {
        get_next_sqrt_price_from_a_round_up(sqrt_price, liquidity, amount, amount_specified_is_input)
    } else {
        get_next_sqrt_price_from_b_round_down(
            sqrt_price,
            liquidity,
            amount,
            amount_specified_is_input,
        )
    }
}

/// Apply a slippage tolerance to a token amount.
///
/// Adjusting up rounds up and saturates at `u64::MAX` (a maximum input). Adjusting down
/// rounds down and bottoms out at zero (a minimum output).
pub fn adjust_amount_for_slippage(amount: u64, slippage_tolerance_bps: u16, adjust_up: bool) -> u64 {
    let denominator = BPS_DENOMINATOR as u128;
    if adjust_up {
        let numerator = amount as u128 * (denominator + slippage_tolerance_bps as u128);
        let adjusted = numerator.div_ceil(denominator);
        u64::try_from(adjusted).unwrap_or(u64::MAX)
    } else {
        let multiplier = denominator.saturating_sub(slippage_tolerance_bps as u128);
        (amount as u128 * multiplier / denominator) as u64
    }
}

// Private functions

fn order_prices(a: u128, b: u128) -> (u128, u128) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

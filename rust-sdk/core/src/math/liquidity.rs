use ethnum::U256;

use crate::{
    get_amount_delta_a, get_amount_delta_b, order_tick_indexes, position_status,
    tick_index_to_sqrt_price, CoreError, PositionStatus, Result, TokenAmounts, Q64_RESOLUTION,
};

/// Adds a signed liquidity delta to a liquidity amount.
/// Errors on overflow or underflow.
pub fn add_liquidity_delta(liquidity: u128, delta: i128) -> Result<u128> {
    if delta >= 0 {
        liquidity
            .checked_add(delta as u128)
            .ok_or(CoreError::LiquidityOverflow)
    } else {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(CoreError::LiquidityUnderflow)
    }
}

/// Token A held by `liquidity` between two sqrt prices.
pub fn get_token_a_from_liquidity(
    liquidity: u128,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
    round_up: bool,
) -> Result<u64> {
    get_amount_delta_a(sqrt_price_lower, sqrt_price_upper, liquidity, round_up)
}

/// Token B held by `liquidity` between two sqrt prices.
pub fn get_token_b_from_liquidity(
    liquidity: u128,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
    round_up: bool,
) -> Result<u64> {
    get_amount_delta_b(sqrt_price_lower, sqrt_price_upper, liquidity, round_up)
}

/// Liquidity that `amount` of token A provides between two sqrt prices, rounded down.
///
/// `L = Δa * √P_lower * √P_upper / (√P_upper - √P_lower)`
pub fn get_liquidity_from_token_a(
    amount: u64,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
) -> Result<u128> {
    let (sqrt_price_lower, sqrt_price_upper) = ordered(sqrt_price_lower, sqrt_price_upper);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;
    if sqrt_price_diff == 0 {
        return Err(CoreError::DivideByZero);
    }
    let numerator = (U256::from(amount) * U256::from(sqrt_price_lower))
        .checked_mul(U256::from(sqrt_price_upper))
        .ok_or(CoreError::MultiplicationOverflow)?;
    let liquidity = (numerator / U256::from(sqrt_price_diff)) >> Q64_RESOLUTION;
    liquidity
        .try_into()
        .map_err(|_| CoreError::NumberCastError)
}

/// Liquidity that `amount` of token B provides between two sqrt prices, rounded down.
///
/// `L = Δb / (√P_upper - √P_lower)`
pub fn get_liquidity_from_token_b(
    amount: u64,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
) -> Result<u128> {
    let (sqrt_price_lower, sqrt_price_upper) = ordered(sqrt_price_lower, sqrt_price_upper);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;
    if sqrt_price_diff == 0 {
        return Err(CoreError::DivideByZero);
    }
    let numerator = U256::from(amount) << Q64_RESOLUTION;
    (numerator / U256::from(sqrt_price_diff))
        .try_into()
        .map_err(|_| CoreError::NumberCastError)
}

/// Split a position's liquidity into token amounts at the current price.
///
/// Below the range the position is all token A, above it all token B. In range, token A
/// covers `[current, upper]` and token B covers `[lower, current]`. Round up for amounts a
/// depositor has to supply and down for amounts a withdrawer receives.
pub fn get_token_amounts_from_liquidity(
    liquidity: u128,
    current_sqrt_price: u128,
    tick_lower_index: i32,
    tick_upper_index: i32,
    round_up: bool,
) -> Result<TokenAmounts> {
    if liquidity == 0 {
        return Ok(TokenAmounts::default());
    }
    let range = order_tick_indexes(tick_lower_index, tick_upper_index);
    let sqrt_price_lower = tick_index_to_sqrt_price(range.tick_lower_index)?;
    let sqrt_price_upper = tick_index_to_sqrt_price(range.tick_upper_index)?;

    match position_status(current_sqrt_price, range.tick_lower_index, range.tick_upper_index)? {
        PositionStatus::PriceBelowRange => Ok(TokenAmounts {
            token_a: get_token_a_from_liquidity(
                liquidity,
                sqrt_price_lower,
                sqrt_price_upper,
                round_up,
            )?,
            token_b: 0,
        }),
        PositionStatus::PriceInRange => Ok(TokenAmounts {
            token_a: get_token_a_from_liquidity(
                liquidity,
                current_sqrt_price,
                sqrt_price_upper,
                round_up,
            )?,
            token_b: get_token_b_from_liquidity(
                liquidity,
                sqrt_price_lower,
                current_sqrt_price,
                round_up,
            )?,
        }),
        PositionStatus::PriceAboveRange => Ok(TokenAmounts {
            token_a: 0,
            token_b: get_token_b_from_liquidity(
                liquidity,
                sqrt_price_lower,
                sqrt_price_upper,
                round_up,
            )?,
        }),
        PositionStatus::Invalid => Ok(TokenAmounts::default()),
    }
}

/// The largest liquidity the given token amounts can back in a tick range.
///
/// In range both tokens are needed, so the smaller of the two liquidity values wins.
pub fn estimate_liquidity_from_token_amounts(
    current_sqrt_price: u128,
    tick_lower_index: i32,
    tick_upper_index: i32,
    token_amounts: TokenAmounts,
) -> Result<u128> {
    let range = order_tick_indexes(tick_lower_index, tick_upper_index);
    let sqrt_price_lower = tick_index_to_sqrt_price(range.tick_lower_index)?;
    let sqrt_price_upper = tick_index_to_sqrt_price(range.tick_upper_index)?;

    match position_status(current_sqrt_price, range.tick_lower_index, range.tick_upper_index)? {
        PositionStatus::PriceBelowRange => {
            get_liquidity_from_token_a(token_amounts.token_a, sqrt_price_lower, sqrt_price_upper)
        }
        PositionStatus::PriceInRange => {
            let liquidity_a = get_liquidity_from_token_a(
                token_amounts.token_a,
                current_sqrt_price,
                sqrt_price_upper,
            )?;
            let liquidity_b = get_liquidity_from_token_b(
                token_amounts.token_b,
                sqrt_price_lower,
                current_sqrt_price,
            )?;
            Ok(liquidity_a.min(liquidity_b))
        }
        PositionStatus::PriceAboveRange => {
            get_liquidity_from_token_b(token_amounts.token_b, sqrt_price_lower, sqrt_price_upper)
        }
        PositionStatus::Invalid => Ok(0),
    }
}

fn ordered(a: u128, b: u128) -> (u128, u128) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

use crate::{
    adjust_amount_for_slippage, get_liquidity_from_token_a, get_liquidity_from_token_b,
    get_token_amounts_from_liquidity, order_tick_indexes, position_status,
    tick_index_to_sqrt_price, DecreaseLiquidityQuote, IncreaseLiquidityQuote, Position,
    PositionStatus, Result, TokenAmounts,
};

/// Calculate the quote for increasing liquidity
///
/// # Parameters
/// - `liquidity_delta` - The amount of liquidity to add
/// - `slippage_tolerance_bps` - The slippage tolerance in bps
/// - `current_sqrt_price` - The current sqrt price of the pool
/// - `tick_lower_index` - The lower tick index of the position
/// - `tick_upper_index` - The upper tick index of the position
///
/// # Returns
/// - An IncreaseLiquidityQuote with the estimated and maximum token amounts
pub fn increase_liquidity_quote(
    liquidity_delta: u128,
    slippage_tolerance_bps: u16,
    current_sqrt_price: u128,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<IncreaseLiquidityQuote> {
    if liquidity_delta == 0 {
        return Ok(IncreaseLiquidityQuote::default());
    }

    let token_est = get_token_amounts_from_liquidity(
        liquidity_delta,
        current_sqrt_price,
        tick_lower_index,
        tick_upper_index,
        true,
    )?;

    Ok(IncreaseLiquidityQuote {
        liquidity_delta,
        token_est_a: token_est.token_a,
        token_est_b: token_est.token_b,
        token_max_a: adjust_amount_for_slippage(token_est.token_a, slippage_tolerance_bps, true),
        token_max_b: adjust_amount_for_slippage(token_est.token_b, slippage_tolerance_bps, true),
    })
}

/// Calculate the quote for increasing liquidity given an amount of token A
///
/// A price at or above the range needs no token A, so the quote is empty.
pub fn increase_liquidity_quote_a(
    token_amount_a: u64,
    slippage_tolerance_bps: u16,
    current_sqrt_price: u128,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<IncreaseLiquidityQuote> {
    let range = order_tick_indexes(tick_lower_index, tick_upper_index);
    let sqrt_price_lower = tick_index_to_sqrt_price(range.tick_lower_index)?;
    let sqrt_price_upper = tick_index_to_sqrt_price(range.tick_upper_index)?;

    let liquidity_delta =
        match position_status(current_sqrt_price, range.tick_lower_index, range.tick_upper_index)? {
            PositionStatus::PriceBelowRange => {
                get_liquidity_from_token_a(token_amount_a, sqrt_price_lower, sqrt_price_upper)?
            }
            PositionStatus::PriceInRange => {
                get_liquidity_from_token_a(token_amount_a, current_sqrt_price, sqrt_price_upper)?
            }
            PositionStatus::PriceAboveRange | PositionStatus::Invalid => 0,
        };

    increase_liquidity_quote(
        liquidity_delta,
        slippage_tolerance_bps,
        current_sqrt_price,
        range.tick_lower_index,
        range.tick_upper_index,
    )
}

/// Calculate the quote for increasing liquidity given an amount of token B
///
/// A price at or below the range needs no token B, so the quote is empty.
pub fn increase_liquidity_quote_b(
    token_amount_b: u64,
    slippage_tolerance_bps: u16,
    current_sqrt_price: u128,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<IncreaseLiquidityQuote> {
    let range = order_tick_indexes(tick_lower_index, tick_upper_index);
    let sqrt_price_lower = tick_index_to_sqrt_price(range.tick_lower_index)?;
    let sqrt_price_upper = tick_index_to_sqrt_price(range.tick_upper_index)?;

    let liquidity_delta =
        match position_status(current_sqrt_price, range.tick_lower_index, range.tick_upper_index)? {
            PositionStatus::PriceAboveRange => {
                get_liquidity_from_token_b(token_amount_b, sqrt_price_lower, sqrt_price_upper)?
            }
            PositionStatus::PriceInRange => {
                get_liquidity_from_token_b(token_amount_b, sqrt_price_lower, current_sqrt_price)?
            }
            PositionStatus::PriceBelowRange | PositionStatus::Invalid => 0,
        };

    increase_liquidity_quote(
        liquidity_delta,
        slippage_tolerance_bps,
        current_sqrt_price,
        range.tick_lower_index,
        range.tick_upper_index,
    )
}

/// Calculate the quote for decreasing liquidity
///
/// # Parameters
/// - `liquidity_delta` - The amount of liquidity to remove
/// - `slippage_tolerance_bps` - The slippage tolerance in bps
/// - `current_sqrt_price` - The current sqrt price of the pool
/// - `tick_lower_index` - The lower tick index of the position
/// - `tick_upper_index` - The upper tick index of the position
///
/// # Returns
/// - A DecreaseLiquidityQuote with the estimated and minimum token amounts
pub fn decrease_liquidity_quote(
    liquidity_delta: u128,
    slippage_tolerance_bps: u16,
    current_sqrt_price: u128,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<DecreaseLiquidityQuote> {
    if liquidity_delta == 0 {
        return Ok(DecreaseLiquidityQuote::default());
    }

    let token_est = get_token_amounts_from_liquidity(
        liquidity_delta,
        current_sqrt_price,
        tick_lower_index,
        tick_upper_index,
        false,
    )?;

    Ok(DecreaseLiquidityQuote {
        liquidity_delta,
        token_est_a: token_est.token_a,
        token_est_b: token_est.token_b,
        token_min_a: adjust_amount_for_slippage(token_est.token_a, slippage_tolerance_bps, false),
        token_min_b: adjust_amount_for_slippage(token_est.token_b, slippage_tolerance_bps, false),
    })
}

/// The tokens a position would receive if all its liquidity were withdrawn now.
pub fn position_token_amounts(position: &Position, current_sqrt_price: u128) -> Result<TokenAmounts> {
    get_token_amounts_from_liquidity(
        position.liquidity,
        current_sqrt_price,
        position.tick_lower_index,
        position.tick_upper_index,
        false,
    )
}

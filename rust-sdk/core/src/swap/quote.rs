use crate::{
    adjust_amount_for_slippage, compute_swap, CoreError, Result, SwapQuote, SwapQuoteParam,
    TickArraySequence, MAX_SQRT_PRICE, MAX_SWAP_TICK_ARRAYS, MAX_TICK_ARRAY_CROSSINGS,
    MIN_SQRT_PRICE,
};

/// Simulate a swap against a whirlpool snapshot and its tick arrays.
///
/// # Parameters
/// - `param`: The pool, the tick arrays in traversal order and the swap inputs
///
/// # Returns
/// - `Ok`: The estimated amounts, end price and the tick arrays the swap touches
/// - `Err`: The first check that failed, see `CoreError`
pub fn simulate_swap(param: &SwapQuoteParam) -> Result<SwapQuote> {
    let whirlpool = &param.whirlpool;
    let a_to_b = param.a_to_b;
    let amount_specified_is_input = param.amount_specified_is_input;
    let sqrt_price_limit = param.sqrt_price_limit;

    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price_limit) {
        return Err(CoreError::SqrtPriceOutOfBounds);
    }

    if (a_to_b && sqrt_price_limit > whirlpool.sqrt_price)
        || (!a_to_b && sqrt_price_limit < whirlpool.sqrt_price)
    {
        return Err(CoreError::InvalidSqrtPriceLimitDirection);
    }

    if param.token_amount == 0 {
        return Err(CoreError::ZeroTradableAmount);
    }

    let mut tick_sequence =
        TickArraySequence::new(&param.tick_arrays, whirlpool.tick_spacing, a_to_b)?;
    if !tick_sequence.is_valid_tick_array_0(whirlpool.tick_current_index) {
        return Err(CoreError::TickArraySequenceInvalid);
    }

    let results = compute_swap(
        whirlpool,
        &mut tick_sequence,
        param.token_amount,
        sqrt_price_limit,
        amount_specified_is_input,
        a_to_b,
    )?;

    let (amount_in, amount_out) = if a_to_b {
        (results.amount_a, results.amount_b)
    } else {
        (results.amount_b, results.amount_a)
    };

    if amount_specified_is_input {
        if amount_out < param.other_amount_threshold {
            return Err(CoreError::AmountOutBelowMinimum);
        }
    } else if amount_in > param.other_amount_threshold {
        return Err(CoreError::AmountInAboveMaximum);
    }

    if tick_sequence.num_touched_arrays() > MAX_TICK_ARRAY_CROSSINGS {
        return Err(CoreError::TickArrayCrossingAboveMax);
    }

    let touched = tick_sequence.get_touched_arrays(MAX_SWAP_TICK_ARRAYS);
    let fallback = param.tick_arrays[0].address;
    let tick_array_address = |i: usize| touched.get(i).copied().unwrap_or(fallback);

    tracing::debug!(
        amount_in,
        amount_out,
        fee_amount = results.total_fee_amount,
        protocol_fee = results.next_protocol_fee,
        fee_growth_global_input = results.next_fee_growth_global_input,
        end_tick_index = results.next_tick_index,
        tick_arrays_touched = tick_sequence.num_touched_arrays(),
        "simulated swap"
    );

    Ok(SwapQuote {
        estimated_amount_in: amount_in,
        estimated_amount_out: amount_out,
        estimated_end_tick_index: results.next_tick_index,
        estimated_end_sqrt_price: results.next_sqrt_price,
        estimated_fee_amount: results.total_fee_amount,
        estimated_protocol_fee: results.next_protocol_fee,
        amount: param.token_amount,
        amount_specified_is_input,
        a_to_b,
        other_amount_threshold: param.other_amount_threshold,
        sqrt_price_limit,
        tick_array_0: tick_array_address(0),
        tick_array_1: tick_array_address(1),
        tick_array_2: tick_array_address(2),
    })
}

/// The furthest price a swap in the given direction may move to.
pub fn default_sqrt_price_limit(a_to_b: bool) -> u128 {
    if a_to_b {
        MIN_SQRT_PRICE
    } else {
        MAX_SQRT_PRICE
    }
}

/// A threshold that never fails: no minimum output, no maximum input.
pub fn default_other_amount_threshold(amount_specified_is_input: bool) -> u64 {
    if amount_specified_is_input {
        0
    } else {
        u64::MAX
    }
}

/// Quote a swap and derive `other_amount_threshold` from a slippage tolerance.
///
/// The threshold in `param` is ignored. The returned quote carries the estimated output
/// adjusted down (exact in) or the estimated input adjusted up (exact out).
pub fn swap_quote_with_slippage(
    param: &SwapQuoteParam,
    slippage_tolerance_bps: u16,
) -> Result<SwapQuote> {
    let unbounded = SwapQuoteParam {
        other_amount_threshold: default_other_amount_threshold(param.amount_specified_is_input),
        ..param.clone()
    };
    let mut quote = simulate_swap(&unbounded)?;
    quote.other_amount_threshold = if param.amount_specified_is_input {
        adjust_amount_for_slippage(quote.estimated_amount_out, slippage_tolerance_bps, false)
    } else {
        adjust_amount_for_slippage(quote.estimated_amount_in, slippage_tolerance_bps, true)
    };
    Ok(quote)
}

use crate::{
    add_liquidity_delta, compute_swap_step, sqrt_price_to_tick_index, tick_index_to_sqrt_price,
    CoreError, NextInitializedTick, Result, SwapResults, TickArraySequence, Whirlpool,
    PROTOCOL_FEE_RATE_MUL_VALUE,
};

/// Run the swap loop against a pool snapshot.
///
/// The price moves one constant-liquidity range at a time until either `amount` is used up or
/// `sqrt_price_limit` is reached. Crossing an initialized tick applies its liquidity net.
/// The whirlpool itself is not modified; the final state is returned in `SwapResults`.
pub fn compute_swap(
    whirlpool: &Whirlpool,
    tick_sequence: &mut TickArraySequence<'_>,
    amount: u64,
    sqrt_price_limit: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<SwapResults> {
    let mut amount_remaining = amount;
    let mut amount_calculated: u64 = 0;
    let mut curr_sqrt_price = whirlpool.sqrt_price;
    let mut curr_tick_index = whirlpool.tick_current_index;
    let mut curr_liquidity = whirlpool.liquidity;
    let mut curr_protocol_fee: u64 = 0;
    let mut curr_fee_growth_global_input = whirlpool.fee_growth_global_input(a_to_b);
    let mut total_fee_amount: u64 = 0;

    while amount_remaining > 0 && sqrt_price_limit != curr_sqrt_price {
        let next_tick = tick_sequence.find_next_initialized_tick_index(curr_tick_index)?;
        let next_tick_index = next_tick.tick_index();
        let next_tick_sqrt_price = tick_index_to_sqrt_price(next_tick_index)?;

        let sqrt_price_target = if a_to_b {
            next_tick_sqrt_price.max(sqrt_price_limit)
        } else {
            next_tick_sqrt_price.min(sqrt_price_limit)
        };

        let step = compute_swap_step(
            amount_remaining,
            whirlpool.fee_rate,
            curr_liquidity,
            curr_sqrt_price,
            sqrt_price_target,
            amount_specified_is_input,
            a_to_b,
        )?;

        if amount_specified_is_input {
            amount_remaining = amount_remaining
                .checked_sub(step.amount_in)
                .and_then(|amount| amount.checked_sub(step.fee_amount))
                .ok_or(CoreError::AmountRemainingOverflow)?;
            amount_calculated = amount_calculated
                .checked_add(step.amount_out)
                .ok_or(CoreError::AmountCalcOverflow)?;
        } else {
            amount_remaining = amount_remaining
                .checked_sub(step.amount_out)
                .ok_or(CoreError::AmountRemainingOverflow)?;
            amount_calculated = amount_calculated
                .checked_add(step.amount_in)
                .and_then(|amount| amount.checked_add(step.fee_amount))
                .ok_or(CoreError::AmountCalcOverflow)?;
        }

        total_fee_amount = total_fee_amount
            .checked_add(step.fee_amount)
            .ok_or(CoreError::AmountCalcOverflow)?;

        let (next_protocol_fee, next_fee_growth_global_input) = calculate_fees(
            step.fee_amount,
            whirlpool.protocol_fee_rate,
            curr_liquidity,
            curr_protocol_fee,
            curr_fee_growth_global_input,
        );
        curr_protocol_fee = next_protocol_fee;
        curr_fee_growth_global_input = next_fee_growth_global_input;

        if step.next_price == next_tick_sqrt_price {
            if let NextInitializedTick::Found { tick, .. } = next_tick {
                let liquidity_net = if a_to_b {
                    tick.liquidity_net
                        .checked_neg()
                        .ok_or(CoreError::LiquidityOverflow)?
                } else {
                    tick.liquidity_net
                };
                curr_liquidity = add_liquidity_delta(curr_liquidity, liquidity_net)?;
                tracing::trace!(
                    tick_index = next_tick_index,
                    liquidity = curr_liquidity,
                    "crossed initialized tick"
                );
            }

            curr_tick_index = if a_to_b {
                next_tick_index - 1
            } else {
                next_tick_index
            };
        } else if step.next_price != curr_sqrt_price {
            curr_tick_index = sqrt_price_to_tick_index(step.next_price)?;
        }

        curr_sqrt_price = step.next_price;
    }

    let amount_swapped = amount - amount_remaining;
    let (amount_a, amount_b) = if a_to_b == amount_specified_is_input {
        (amount_swapped, amount_calculated)
    } else {
        (amount_calculated, amount_swapped)
    };

    Ok(SwapResults {
        amount_a,
        amount_b,
        next_liquidity: curr_liquidity,
        next_tick_index: curr_tick_index,
        next_sqrt_price: curr_sqrt_price,
        next_fee_growth_global_input: curr_fee_growth_global_input,
        next_protocol_fee: curr_protocol_fee,
        total_fee_amount,
    })
}

// Private functions

fn calculate_fees(
    fee_amount: u64,
    protocol_fee_rate: u16,
    curr_liquidity: u128,
    curr_protocol_fee: u64,
    curr_fee_growth_global_input: u128,
) -> (u64, u128) {
    let mut next_protocol_fee = curr_protocol_fee;
    let mut next_fee_growth_global_input = curr_fee_growth_global_input;
    let mut global_fee = fee_amount;

    if protocol_fee_rate > 0 {
        let delta =
            (global_fee as u128 * protocol_fee_rate as u128 / PROTOCOL_FEE_RATE_MUL_VALUE as u128) as u64;
        global_fee -= delta;
        next_protocol_fee = next_protocol_fee.wrapping_add(delta);
    }

    if curr_liquidity > 0 {
        let growth = ((global_fee as u128) << 64) / curr_liquidity;
        next_fee_growth_global_input = next_fee_growth_global_input.wrapping_add(growth);
    }

    (next_protocol_fee, next_fee_growth_global_input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1000, 0, 1, 0, 1000 << 64)]
    #[case(1000, 300, 1, 30, 970 << 64)]
    #[case(1000, 2500, 2, 250, 375 << 64)]
    #[case(1000, 300, 1 << 64, 30, 970)]
    #[case(1000, 300, 0, 30, 0)]
    #[case(9, 300, 1, 0, 9 << 64)]
    fn test_calculate_fees(
        #[case] fee_amount: u64,
        #[case] protocol_fee_rate: u16,
        #[case] liquidity: u128,
        #[case] expected_protocol_fee: u64,
        #[case] expected_fee_growth: u128,
    ) {
        let (protocol_fee, fee_growth) =
            calculate_fees(fee_amount, protocol_fee_rate, liquidity, 0, 0);
        assert_eq!(protocol_fee, expected_protocol_fee);
        assert_eq!(fee_growth, expected_fee_growth);
    }

    #[test]
    fn test_calculate_fees_accumulates_wrapping() {
        let (protocol_fee, fee_growth) = calculate_fees(100, 0, 1 << 64, 7, u128::MAX);
        assert_eq!(protocol_fee, 7);
        assert_eq!(fee_growth, 99);
    }
}

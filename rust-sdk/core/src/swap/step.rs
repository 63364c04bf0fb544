use crate::{
    checked_mul_div, checked_mul_div_round_up, get_amount_delta_a, get_amount_delta_b,
    get_next_sqrt_price, try_get_amount_delta_a, try_get_amount_delta_b, AmountDelta, CoreError,
    Result, FEE_RATE_MUL_VALUE,
};

/// The result of moving the price inside a single constant-liquidity range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct SwapStepComputation {
    pub amount_in: u64,
    pub amount_out: u64,
    pub next_price: u128,
    pub fee_amount: u64,
}

/// Swap as much of `amount_remaining` as possible between `sqrt_price_current` and
/// `sqrt_price_target` with constant `liquidity`.
///
/// # Parameters
/// - `amount_remaining`: The amount still to be swapped, input or output depending on
///   `amount_specified_is_input`
/// - `fee_rate`: The pool fee rate in hundredths of a basis point
/// - `liquidity`: The active liquidity of the range
/// - `sqrt_price_current`: The sqrt price at the start of the step
/// - `sqrt_price_target`: The furthest sqrt price the step may reach
/// - `amount_specified_is_input`: Whether `amount_remaining` is an input amount
/// - `a_to_b`: The swap direction
///
/// # Returns
/// - `SwapStepComputation`: The amounts moved, the fee taken and the price reached
pub fn compute_swap_step(
    amount_remaining: u64,
    fee_rate: u16,
    liquidity: u128,
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<SwapStepComputation> {
    let initial_amount_fixed_delta = try_get_amount_fixed_delta(
        sqrt_price_current,
        sqrt_price_target,
        liquidity,
        amount_specified_is_input,
        a_to_b,
    )?;

    let amount_calc = if amount_specified_is_input {
        let amount_less_fee = checked_mul_div(
            amount_remaining as u128,
            FEE_RATE_MUL_VALUE as u128 - fee_rate as u128,
            FEE_RATE_MUL_VALUE as u128,
        )?;
        u64::try_from(amount_less_fee).map_err(|_| CoreError::NumberCastError)?
    } else {
        amount_remaining
    };

    let next_sqrt_price = if initial_amount_fixed_delta.lte(amount_calc) {
        sqrt_price_target
    } else {
        get_next_sqrt_price(
            sqrt_price_current,
            liquidity,
            amount_calc,
            amount_specified_is_input,
            a_to_b,
        )?
    };

    let is_max_swap = next_sqrt_price == sqrt_price_target;

    let amount_unfixed_delta = get_amount_unfixed_delta(
        sqrt_price_current,
        next_sqrt_price,
        liquidity,
        amount_specified_is_input,
        a_to_b,
    )?;

    // the fixed delta only needs recomputing if the target was not reached
    let amount_fixed_delta = match initial_amount_fixed_delta {
        AmountDelta::Valid(amount) if is_max_swap => amount,
        _ => get_amount_fixed_delta(
            sqrt_price_current,
            next_sqrt_price,
            liquidity,
            amount_specified_is_input,
            a_to_b,
        )?,
    };

    let (amount_in, mut amount_out) = if amount_specified_is_input {
        (amount_fixed_delta, amount_unfixed_delta)
    } else {
        (amount_unfixed_delta, amount_fixed_delta)
    };

    if !amount_specified_is_input && amount_out > amount_remaining {
        amount_out = amount_remaining;
    }

    let fee_amount = if amount_specified_is_input && !is_max_swap {
        amount_remaining
            .checked_sub(amount_in)
            .ok_or(CoreError::AmountRemainingOverflow)?
    } else {
        let fee = checked_mul_div_round_up(
            amount_in as u128,
            fee_rate as u128,
            FEE_RATE_MUL_VALUE as u128 - fee_rate as u128,
        )?;
        u64::try_from(fee).map_err(|_| CoreError::NumberCastError)?
    };

    Ok(SwapStepComputation {
        amount_in,
        amount_out,
        next_price: next_sqrt_price,
        fee_amount,
    })
}

// Private functions

// The fixed side is the token the user specified: A for exact in a to b and exact out b to a.
fn fixed_side_is_a(amount_specified_is_input: bool, a_to_b: bool) -> bool {
    a_to_b == amount_specified_is_input
}

fn try_get_amount_fixed_delta(
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<AmountDelta> {
    if fixed_side_is_a(amount_specified_is_input, a_to_b) {
        try_get_amount_delta_a(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            amount_specified_is_input,
        )
    } else {
        try_get_amount_delta_b(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            amount_specified_is_input,
        )
    }
}

fn get_amount_fixed_delta(
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u64> {
    try_get_amount_fixed_delta(
        sqrt_price_current,
        sqrt_price_target,
        liquidity,
        amount_specified_is_input,
        a_to_b,
    )?
    .into_result()
}

fn get_amount_unfixed_delta(
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u64> {
    if fixed_side_is_a(amount_specified_is_input, a_to_b) {
        get_amount_delta_b(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            !amount_specified_is_input,
        )
    } else {
        get_amount_delta_a(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            !amount_specified_is_input,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_FEE_RATE, MAX_SQRT_PRICE, MIN_SQRT_PRICE};
    use proptest::prelude::*;

    #[test]
    fn test_exact_in_reaches_target() {
        let step = compute_swap_step(1000, 10000, 4, 2 << 64, 4 << 64, true, false).unwrap();
        assert_eq!(
            step,
            SwapStepComputation {
                amount_in: 8,
                amount_out: 1,
                next_price: 4 << 64,
                fee_amount: 1,
            }
        );
    }

    #[test]
    fn test_exact_in_partial_step() {
        let step = compute_swap_step(1000, 10000, 990, 2 << 64, 4 << 64, true, false).unwrap();
        assert_eq!(
            step,
            SwapStepComputation {
                amount_in: 990,
                amount_out: 165,
                next_price: 3 << 64,
                fee_amount: 10,
            }
        );
    }

    #[test]
    fn test_exact_out_partial_step() {
        let step = compute_swap_step(2, 10000, 12, 2 << 64, 4 << 64, false, false).unwrap();
        assert_eq!(
            step,
            SwapStepComputation {
                amount_in: 12,
                amount_out: 2,
                next_price: 3 << 64,
                fee_amount: 1,
            }
        );
    }

    #[test]
    fn test_zero_fee_rate() {
        let step = compute_swap_step(12, 0, 12, 2 << 64, 4 << 64, true, false).unwrap();
        assert_eq!(step.amount_in, 12);
        assert_eq!(step.amount_out, 2);
        assert_eq!(step.next_price, 3 << 64);
        assert_eq!(step.fee_amount, 0);
    }

    #[test]
    fn test_zero_liquidity_jumps_to_target() {
        let step = compute_swap_step(100, 3000, 0, 4 << 64, 2 << 64, true, true).unwrap();
        assert_eq!(
            step,
            SwapStepComputation {
                amount_in: 0,
                amount_out: 0,
                next_price: 2 << 64,
                fee_amount: 0,
            }
        );
    }

    #[test]
    fn test_target_equals_current() {
        let step = compute_swap_step(100, 3000, 1000, 2 << 64, 2 << 64, true, true).unwrap();
        assert_eq!(step.amount_in, 0);
        assert_eq!(step.amount_out, 0);
        assert_eq!(step.next_price, 2 << 64);
    }

    #[test]
    fn test_huge_range_solves_for_price() {
        // token A for the whole price range does not fit a u64
        let liquidity = 1u128 << 40;
        let step =
            compute_swap_step(1_000_000, 3000, liquidity, MAX_SQRT_PRICE, MIN_SQRT_PRICE, true, true)
                .unwrap();
        assert!(step.next_price < MAX_SQRT_PRICE);
        assert!(step.next_price > MIN_SQRT_PRICE);
        assert_eq!(step.amount_in + step.fee_amount, 1_000_000);
    }

    proptest! {
        #[test]
        fn test_compute_swap_step_bounds(
            amount in 1..u64::MAX,
            liquidity in 1..u32::MAX as u128,
            price_0 in MIN_SQRT_PRICE..MAX_SQRT_PRICE,
            price_1 in MIN_SQRT_PRICE..MAX_SQRT_PRICE,
            fee_rate in 1..MAX_FEE_RATE,
            amount_specified_is_input in proptest::bool::ANY,
        ) {
            prop_assume!(price_0 != price_1);
            let a_to_b = price_0 > price_1;
            let result = compute_swap_step(
                amount,
                fee_rate,
                liquidity,
                price_0,
                price_1,
                amount_specified_is_input,
                a_to_b,
            );
            prop_assume!(result.is_ok());
            let step = result.unwrap();

            let amount_used = if amount_specified_is_input {
                step.amount_in as u128 + step.fee_amount as u128
            } else {
                step.amount_out as u128
            };
            if step.next_price != price_1 {
                prop_assert_eq!(amount_used, amount as u128);
            } else {
                prop_assert!(amount_used <= amount as u128);
            }

            if a_to_b {
                prop_assert!(step.next_price <= price_0 && step.next_price >= price_1);
            } else {
                prop_assert!(step.next_price >= price_0 && step.next_price <= price_1);
            }
        }
    }
}

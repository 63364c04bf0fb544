use crate::{order_tick_indexes, tick_index_to_sqrt_price, PositionStatus, Result};

/// Classify the pool price against a position's tick range.
///
/// The range is half-open on the price axis: a price equal to the lower bound is below the
/// range, a price equal to the upper bound is above it. Equal bounds give `Invalid`.
pub fn position_status(
    current_sqrt_price: u128,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<PositionStatus> {
    if tick_lower_index == tick_upper_index {
        return Ok(PositionStatus::Invalid);
    }
    let range = order_tick_indexes(tick_lower_index, tick_upper_index);
    let sqrt_price_lower = tick_index_to_sqrt_price(range.tick_lower_index)?;
    let sqrt_price_upper = tick_index_to_sqrt_price(range.tick_upper_index)?;

    Ok(if current_sqrt_price <= sqrt_price_lower {
        PositionStatus::PriceBelowRange
    } else if current_sqrt_price >= sqrt_price_upper {
        PositionStatus::PriceAboveRange
    } else {
        PositionStatus::PriceInRange
    })
}

/// A position earns fees and rewards only while it is in range.
pub fn is_position_in_range(
    current_sqrt_price: u128,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<bool> {
    Ok(
        position_status(current_sqrt_price, tick_lower_index, tick_upper_index)?
            == PositionStatus::PriceInRange,
    )
}

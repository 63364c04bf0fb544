use crate::{
    CoreError, Result, TickArray, TickSearchDirection, MAX_SWAP_TICK_ARRAYS, MAX_TICK_INDEX,
    MIN_TICK_INDEX, TICK_ARRAY_SIZE,
};

/// A tick expressed as (tick array, slot within that array).
///
/// `array_index` is the tick array number counted from tick 0, negative below it. `offset_index`
/// is always within `[0, TICK_ARRAY_SIZE)`, also for negative ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickArrayIndex {
    pub array_index: i32,
    pub offset_index: i32,
    pub tick_spacing: u16,
}

impl TickArrayIndex {
    pub fn new(array_index: i32, offset_index: i32, tick_spacing: u16) -> Result<Self> {
        if tick_spacing == 0 {
            return Err(CoreError::InvalidTickSpacing);
        }
        if !(0..TICK_ARRAY_SIZE as i32).contains(&offset_index) {
            return Err(CoreError::InvalidTickArrayOffset);
        }
        Ok(Self {
            array_index,
            offset_index,
            tick_spacing,
        })
    }

    /// Decompose a tick index. Ticks that are not a multiple of the spacing land on the
    /// initializable tick below them.
    pub fn from_tick_index(tick_index: i32, tick_spacing: u16) -> Result<Self> {
        let ticks_in_array = ticks_in_array(tick_spacing)?;
        let array_index = tick_index.div_euclid(ticks_in_array);
        let offset_index = tick_index
            .rem_euclid(ticks_in_array)
            .div_euclid(tick_spacing as i32);
        Self::new(array_index, offset_index, tick_spacing)
    }

    pub fn to_tick_index(&self) -> i32 {
        let tick_spacing = self.tick_spacing as i32;
        self.array_index * tick_spacing * TICK_ARRAY_SIZE as i32 + self.offset_index * tick_spacing
    }

    /// `None` once the step would leave the `i32` range.
    pub fn to_next_initializable_tick_index(&self) -> Option<Self> {
        self.step(self.tick_spacing as i32)
    }

    pub fn to_prev_initializable_tick_index(&self) -> Option<Self> {
        self.step(-(self.tick_spacing as i32))
    }

    fn step(&self, delta: i32) -> Option<Self> {
        let tick_index = self.to_tick_index().checked_add(delta)?;
        let ticks_in_array = self.tick_spacing as i32 * TICK_ARRAY_SIZE as i32;
        Some(Self {
            array_index: tick_index.div_euclid(ticks_in_array),
            offset_index: tick_index
                .rem_euclid(ticks_in_array)
                .div_euclid(self.tick_spacing as i32),
            tick_spacing: self.tick_spacing,
        })
    }
}

/// Get the first tick index of the tick array that contains `tick_index`, moved by
/// `offset` whole tick arrays.
///
/// # Parameters
/// - `tick_index` - A i32 integer representing the tick integer
/// - `tick_spacing` - A u16 integer representing the tick spacing
/// - `offset` - The number of tick arrays to move, negative towards lower ticks
///
/// # Returns
/// - `Ok`: The start tick index
/// - `Err`: `TickIndexOutOfBounds` if the array lies entirely outside the usable tick range
pub fn get_start_tick_index(tick_index: i32, tick_spacing: u16, offset: i32) -> Result<i32> {
    let ticks_in_array = ticks_in_array(tick_spacing)?;
    let start_tick_index = tick_index
        .div_euclid(ticks_in_array)
        .checked_add(offset)
        .and_then(|array_index| array_index.checked_mul(ticks_in_array))
        .ok_or(CoreError::TickIndexOutOfBounds)?;

    // The lowest array may begin up to one full array below MIN_TICK_INDEX.
    let min_start_tick_index = MIN_TICK_INDEX - ((MIN_TICK_INDEX % ticks_in_array) + ticks_in_array);
    if start_tick_index < min_start_tick_index || start_tick_index > MAX_TICK_INDEX {
        return Err(CoreError::TickIndexOutOfBounds);
    }
    Ok(start_tick_index)
}

/// Start tick indexes of the tick arrays a swap starting at `tick_current_index` may traverse,
/// in traversal order. The list ends early at the edge of the tick range.
pub fn get_swap_tick_array_start_indexes(
    tick_current_index: i32,
    tick_spacing: u16,
    a_to_b: bool,
) -> Result<Vec<i32>> {
    ticks_in_array(tick_spacing)?;
    // b -> a searches from the next tick, which may already sit in the following array
    let shift = if a_to_b { 0 } else { tick_spacing as i32 };
    let search_index = tick_current_index
        .checked_add(shift)
        .ok_or(CoreError::TickIndexOutOfBounds)?;
    let mut start_indexes = Vec::with_capacity(MAX_SWAP_TICK_ARRAYS);
    for i in 0..MAX_SWAP_TICK_ARRAYS as i32 {
        let offset = if a_to_b { -i } else { i };
        match get_start_tick_index(search_index, tick_spacing, offset) {
            Ok(start_tick_index) => start_indexes.push(start_tick_index),
            Err(_) => break,
        }
    }
    Ok(start_indexes)
}

/// Round a tick index to an initializable tick.
/// `round_up` of `None` rounds to the nearest initializable tick.
pub fn get_initializable_tick_index(
    tick_index: i32,
    tick_spacing: u16,
    round_up: Option<bool>,
) -> Result<i32> {
    let tick_spacing = initializable_spacing(tick_spacing)?;
    let remainder = tick_index.rem_euclid(tick_spacing);
    let rounded_down = tick_index - remainder;
    let up = match round_up {
        Some(round_up) => round_up && remainder > 0,
        None => remainder >= tick_spacing / 2,
    };
    if up {
        rounded_down
            .checked_add(tick_spacing)
            .ok_or(CoreError::TickIndexOutOfBounds)
    } else {
        Ok(rounded_down)
    }
}

/// The closest initializable tick strictly below `tick_index`.
pub fn get_prev_initializable_tick_index(tick_index: i32, tick_spacing: u16) -> Result<i32> {
    let tick_spacing = initializable_spacing(tick_spacing)?;
    match tick_index.rem_euclid(tick_spacing) {
        0 => tick_index
            .checked_sub(tick_spacing)
            .ok_or(CoreError::TickIndexOutOfBounds),
        remainder => Ok(tick_index - remainder),
    }
}

/// The closest initializable tick strictly above `tick_index`.
pub fn get_next_initializable_tick_index(tick_index: i32, tick_spacing: u16) -> Result<i32> {
    let tick_spacing = initializable_spacing(tick_spacing)?;
    (tick_index - tick_index.rem_euclid(tick_spacing))
        .checked_add(tick_spacing)
        .ok_or(CoreError::TickIndexOutOfBounds)
}

pub fn is_tick_initializable(tick_index: i32, tick_spacing: u16) -> Result<bool> {
    let tick_spacing = initializable_spacing(tick_spacing)?;
    Ok(tick_index % tick_spacing == 0)
}

/// Slot of `tick_index` within the tick array starting at `tick_array_start_index`.
pub fn get_tick_index_in_array(
    tick_index: i32,
    tick_array_start_index: i32,
    tick_spacing: u16,
) -> Result<usize> {
    let ticks_in_array = ticks_in_array(tick_spacing)?;
    let offset = tick_index as i64 - tick_array_start_index as i64;
    if !(0..ticks_in_array as i64).contains(&offset) {
        return Err(CoreError::TickIndexNotInArray);
    }
    Ok((tick_index - tick_array_start_index).div_euclid(tick_spacing as i32) as usize)
}

/// Scan a single tick array for an initialized tick.
///
/// A `Left` scan includes the slot of `tick_index`, a `Right` scan starts at the slot after it.
/// This matches the stepping of the swap traversal. Returns `None` when the scan reaches the
/// edge of the array.
pub fn find_initialized_tick_in_array(
    tick_array: &TickArray,
    tick_index: i32,
    tick_spacing: u16,
    direction: TickSearchDirection,
) -> Result<Option<i32>> {
    let slot = get_tick_index_in_array(tick_index, tick_array.start_tick_index, tick_spacing)?;
    let to_tick_index = |slot: usize| tick_array.start_tick_index + slot as i32 * tick_spacing as i32;

    let found = match direction {
        TickSearchDirection::Left => (0..=slot)
            .rev()
            .find(|&slot| tick_array.ticks[slot].initialized),
        TickSearchDirection::Right => {
            (slot + 1..TICK_ARRAY_SIZE).find(|&slot| tick_array.ticks[slot].initialized)
        }
    };
    Ok(found.map(to_tick_index))
}

fn initializable_spacing(tick_spacing: u16) -> Result<i32> {
    if tick_spacing == 0 {
        return Err(CoreError::InvalidTickSpacing);
    }
    Ok(tick_spacing as i32)
}

fn ticks_in_array(tick_spacing: u16) -> Result<i32> {
    if tick_spacing == 0 {
        return Err(CoreError::InvalidTickSpacing);
    }
    Ok(tick_spacing as i32 * TICK_ARRAY_SIZE as i32)
}

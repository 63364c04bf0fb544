/// The number of ticks in a tick array.
pub const TICK_ARRAY_SIZE: usize = 88;

/// The minimum tick index.
pub const MIN_TICK_INDEX: i32 = -443636;

/// The maximum tick index.
pub const MAX_TICK_INDEX: i32 = 443636;

/// The sqrt price of the minimum tick index, as a Q64.64 number.
pub const MIN_SQRT_PRICE: u128 = 4295048016;

/// The sqrt price of the maximum tick index, as a Q64.64 number.
pub const MAX_SQRT_PRICE: u128 = 79226673515401279992447579055;

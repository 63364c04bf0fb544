/// The denominator of the fee rate value. Fee rates are expressed in hundredths of a basis point.
pub const FEE_RATE_MUL_VALUE: u32 = 1_000_000;

/// The maximum fee rate a pool can be configured with (6%).
pub const MAX_FEE_RATE: u16 = 60_000;

/// The denominator of the protocol fee rate value. Protocol fee rates are expressed in basis points.
pub const PROTOCOL_FEE_RATE_MUL_VALUE: u16 = 10_000;

/// The maximum protocol fee rate a pool can be configured with (25%).
pub const MAX_PROTOCOL_FEE_RATE: u16 = 2_500;

/// The number of tick arrays a single swap instruction accepts.
pub const MAX_SWAP_TICK_ARRAYS: usize = 3;

/// The maximum number of distinct tick arrays a single swap may traverse.
pub const MAX_TICK_ARRAY_CROSSINGS: usize = 3;

/// The denominator of a value expressed in basis points.
pub const BPS_DENOMINATOR: u16 = 10_000;

/// The number of fractional bits of a Q64.64 number.
pub const Q64_RESOLUTION: u32 = 64;

use ethnum::U256;

use crate::{
    CoreError, Result, TickRange, MAX_SQRT_PRICE, MAX_TICK_INDEX, MIN_SQRT_PRICE, MIN_TICK_INDEX,
};

const LOG_B_2_X32: i128 = 59543866431248i128;
const BIT_PRECISION: u32 = 14;
const LOG_B_P_ERR_MARGIN_LOWER_X64: i128 = 184467440737095516i128; // 0.01
const LOG_B_P_ERR_MARGIN_UPPER_X64: i128 = 15793534762490258745i128; // 2^-precision / log_2_b + 0.01

/// sqrt(1.0001)^(2^i) in Q32.96 for bits 1 through 18 of a non-negative tick.
const POSITIVE_TICK_FACTORS_X96: [u128; 18] = [
    79236085330515764027303304731,
    79244008939048815603706035061,
    79259858533276714757314932305,
    79291567232598584799939703904,
    79355022692464371645785046466,
    79482085999252804386437311141,
    79736823300114093921829183326,
    80248749790819932309965073892,
    81282483887344747381513967011,
    83390072131320151908154831281,
    87770609709833776024991924138,
    97234110755111693312479820773,
    119332217159966728226237229890,
    179736315981702064433883588727,
    407748233172238350107850275304,
    2098478828474011932436660412517,
    55581415166113811149459800483533,
    38992368544603139932233054999993551,
];

/// sqrt(1.0001)^-(2^i) in Q64.64 for bits 1 through 18 of the absolute value of a negative tick.
const NEGATIVE_TICK_FACTORS_X64: [u128; 18] = [
    18444899583751176498,
    18443055278223354162,
    18439367220385604838,
    18431993317065449817,
    18417254355718160513,
    18387811781193591352,
    18329067761203520168,
    18212142134806087854,
    17980523815641551639,
    17526086738831147013,
    16651378430235024244,
    15030750278693429944,
    12247334978882834399,
    8131365268884726200,
    3584323654723342297,
    696457651847595233,
    26294789957452057,
    37481735321082,
];

/// Derive the sqrt price of a tick index.
///
/// # Parameters
/// - `tick_index` - A i32 integer representing the tick integer
///
/// # Returns
/// - `Ok`: A u128 Q64.64 representing the sqrt price
/// - `Err`: `TickIndexOutOfBounds` if the tick is outside `[MIN_TICK_INDEX, MAX_TICK_INDEX]`
pub fn tick_index_to_sqrt_price(tick_index: i32) -> Result<u128> {
    if !is_tick_index_in_bounds(tick_index) {
        return Err(CoreError::TickIndexOutOfBounds);
    }
    Ok(sqrt_price_at_tick(tick_index))
}

/// Derive the tick index from a sqrt price, rounding towards negative infinity.
///
/// # Parameters
/// - `sqrt_price` - A u128 integer representing the sqrt price
///
/// # Returns
/// - `Ok`: A i32 integer representing the greatest tick whose sqrt price is at most `sqrt_price`
/// - `Err`: `SqrtPriceOutOfBounds` if the price is outside `[MIN_SQRT_PRICE, MAX_SQRT_PRICE]`
pub fn sqrt_price_to_tick_index(sqrt_price: u128) -> Result<i32> {
    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price) {
        return Err(CoreError::SqrtPriceOutOfBounds);
    }

    // Integer part of log2 is the position of the most significant bit
    let msb: u32 = 128 - sqrt_price.leading_zeros() - 1;
    let log2p_integer_x32 = (msb as i128 - 64) << 32;

    // Fractional part, one bit per squaring, starting at 0.5 in Q64.64
    let mut bit: i128 = 0x8000_0000_0000_0000i128;
    let mut precision = 0;
    let mut log2p_fraction_x64 = 0;

    let mut r = if msb >= 64 {
        sqrt_price >> (msb - 63)
    } else {
        sqrt_price << (63 - msb)
    };

    while bit > 0 && precision < BIT_PRECISION {
        r *= r;
        let is_r_more_than_two = r >> 127_u32;
        r >>= 63 + is_r_more_than_two;
        log2p_fraction_x64 += bit * is_r_more_than_two as i128;
        bit >>= 1;
        precision += 1;
    }

    let log2p_fraction_x32 = log2p_fraction_x64 >> 32;
    let log2p_x32 = log2p_integer_x32 + log2p_fraction_x32;

    let logbp_x64 = log2p_x32 * LOG_B_2_X32;

    let tick_low = ((logbp_x64 - LOG_B_P_ERR_MARGIN_LOWER_X64) >> 64) as i32;
    let tick_high = ((logbp_x64 + LOG_B_P_ERR_MARGIN_UPPER_X64) >> 64) as i32;

    if tick_low == tick_high {
        return Ok(tick_low);
    }

    // The estimate brackets the answer; tick_high wins only if its price does not overshoot.
    if sqrt_price_at_tick(tick_high) <= sqrt_price {
        Ok(tick_high)
    } else {
        Ok(tick_low)
    }
}

/// Check if a tick is in-bounds.
#[allow(clippy::manual_range_contains)]
pub fn is_tick_index_in_bounds(tick_index: i32) -> bool {
    tick_index <= MAX_TICK_INDEX && tick_index >= MIN_TICK_INDEX
}

/// Get the tick index for the inverse of the price that this tick represents.
/// Eg: Consider tick i where Pb/Pa = 1.0001 ^ i
/// inverse of this, i.e. Pa/Pb = 1 / (1.0001 ^ i) = 1.0001^-i
pub fn invert_tick_index(tick_index: i32) -> i32 {
    -tick_index
}

/// Get the sqrt price for the inverse of the price that this tick represents.
/// Converting to a tick index and back is lossy, so the result is clamped to the nearest tick.
pub fn invert_sqrt_price(sqrt_price: u128) -> Result<u128> {
    let tick_index = sqrt_price_to_tick_index(sqrt_price)?;
    tick_index_to_sqrt_price(invert_tick_index(tick_index))
}

/// Get the minimum and maximum tick index that can be initialized for a tick spacing.
pub fn get_full_range_tick_indexes(tick_spacing: u16) -> Result<TickRange> {
    if tick_spacing == 0 {
        return Err(CoreError::InvalidTickSpacing);
    }
    let tick_spacing_i32 = tick_spacing as i32;
    Ok(TickRange {
        tick_lower_index: (MIN_TICK_INDEX / tick_spacing_i32) * tick_spacing_i32,
        tick_upper_index: (MAX_TICK_INDEX / tick_spacing_i32) * tick_spacing_i32,
    })
}

/// Order two tick indexes ascending.
pub fn order_tick_indexes(tick_index_1: i32, tick_index_2: i32) -> TickRange {
    TickRange {
        tick_lower_index: tick_index_1.min(tick_index_2),
        tick_upper_index: tick_index_1.max(tick_index_2),
    }
}

// Private functions

fn sqrt_price_at_tick(tick_index: i32) -> u128 {
    if tick_index >= 0 {
        get_sqrt_price_positive_tick(tick_index)
    } else {
        get_sqrt_price_negative_tick(tick_index)
    }
}

fn mul_shift_96(n0: u128, n1: u128) -> u128 {
    let mul: U256 = (U256::from(n0) * U256::from(n1)) >> 96;
    mul.as_u128()
}

fn get_sqrt_price_positive_tick(tick: i32) -> u128 {
    let mut ratio: u128 = if tick & 1 != 0 {
        79232123823359799118286999567
    } else {
        79228162514264337593543950336
    };

    for (shift, factor) in POSITIVE_TICK_FACTORS_X96.iter().enumerate() {
        if tick & (2 << shift) != 0 {
            ratio = mul_shift_96(ratio, *factor);
        }
    }

    ratio >> 32
}

fn get_sqrt_price_negative_tick(tick: i32) -> u128 {
    let abs_tick = tick.abs();

    let mut ratio: u128 = if abs_tick & 1 != 0 {
        18445821805675392311
    } else {
        18446744073709551616
    };

    for (shift, factor) in NEGATIVE_TICK_FACTORS_X64.iter().enumerate() {
        if abs_tick & (2 << shift) != 0 {
            ratio = (ratio * factor) >> 64;
        }
    }

    ratio
}

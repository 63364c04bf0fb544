#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde_big_array::BigArray;

use solana_pubkey::Pubkey;

use crate::{NUM_REWARDS, TICK_ARRAY_SIZE};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TickRange {
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
}

/// Direction of a scan over the ticks of a single tick array.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TickSearchDirection {
    /// Towards lower ticks, including the starting tick.
    Left,
    /// Towards higher ticks, excluding the starting tick.
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Tick {
    pub initialized: bool,
    /// Amount of liquidity added (lower tick) or removed (upper tick) when crossed left to right.
    pub liquidity_net: i128,
    pub liquidity_gross: u128,
    pub fee_growth_outside_a: u128,
    pub fee_growth_outside_b: u128,
    pub reward_growths_outside: [u128; NUM_REWARDS],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TickArray {
    pub start_tick_index: i32,
    #[cfg_attr(feature = "serde", serde(with = "BigArray"))]
    pub ticks: [Tick; TICK_ARRAY_SIZE],
    pub whirlpool: Pubkey,
}

impl Default for TickArray {
    fn default() -> Self {
        Self {
            start_tick_index: 0,
            ticks: [Tick::default(); TICK_ARRAY_SIZE],
            whirlpool: Pubkey::default(),
        }
    }
}

impl TickArray {
    /// An empty tick array starting at `start_tick_index`.
    pub fn new(whirlpool: Pubkey, start_tick_index: i32) -> Self {
        Self {
            start_tick_index,
            whirlpool,
            ..Default::default()
        }
    }

    /// Whether `tick_index` lies within the ticks covered by this array.
    pub fn in_search_range(&self, tick_index: i32, tick_spacing: u16) -> bool {
        let ticks_in_array = TICK_ARRAY_SIZE as i64 * tick_spacing as i64;
        let start_tick_index = self.start_tick_index as i64;
        let tick_index = tick_index as i64;
        tick_index >= start_tick_index && tick_index < start_tick_index + ticks_in_array
    }
}

/// One slot of a tick array sequence: an account address and its decoded data, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TickArrayAccount {
    pub address: Pubkey,
    pub start_tick_index: i32,
    pub data: Option<TickArray>,
}

impl TickArrayAccount {
    pub fn initialized(address: Pubkey, data: TickArray) -> Self {
        Self {
            address,
            start_tick_index: data.start_tick_index,
            data: Some(data),
        }
    }

    pub fn uninitialized(address: Pubkey, start_tick_index: i32) -> Self {
        Self {
            address,
            start_tick_index,
            data: None,
        }
    }
}

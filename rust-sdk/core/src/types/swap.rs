#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use solana_pubkey::Pubkey;

use crate::{TickArrayAccount, Whirlpool};

/// Everything needed to quote one swap against a pool snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SwapQuoteParam {
    pub whirlpool: Whirlpool,
    /// Tick arrays in traversal order; the first one must contain the current tick.
    pub tick_arrays: Vec<TickArrayAccount>,
    pub token_amount: u64,
    pub sqrt_price_limit: u128,
    /// Minimum output (exact in) or maximum input (exact out).
    pub other_amount_threshold: u64,
    pub a_to_b: bool,
    pub amount_specified_is_input: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SwapQuote {
    pub estimated_amount_in: u64,
    pub estimated_amount_out: u64,
    pub estimated_end_tick_index: i32,
    pub estimated_end_sqrt_price: u128,
    pub estimated_fee_amount: u64,
    pub estimated_protocol_fee: u64,
    pub amount: u64,
    pub amount_specified_is_input: bool,
    pub a_to_b: bool,
    pub other_amount_threshold: u64,
    pub sqrt_price_limit: u128,
    pub tick_array_0: Pubkey,
    pub tick_array_1: Pubkey,
    pub tick_array_2: Pubkey,
}

/// Raw outcome of the swap loop. `amount_a` and `amount_b` include fees on the input side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SwapResults {
    pub amount_a: u64,
    pub amount_b: u64,
    pub next_liquidity: u128,
    pub next_tick_index: i32,
    pub next_sqrt_price: u128,
    pub next_fee_growth_global_input: u128,
    pub next_protocol_fee: u64,
    pub total_fee_amount: u64,
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use solana_pubkey::Pubkey;

use crate::NUM_REWARDS;

/// A snapshot of a whirlpool account.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Whirlpool {
    pub whirlpools_config: Pubkey,
    pub tick_spacing: u16,
    /// Hundredths of a basis point of every swap input.
    pub fee_rate: u16,
    /// Basis points of the collected fee that go to the protocol.
    pub protocol_fee_rate: u16,
    pub liquidity: u128,
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub protocol_fee_owed_a: u64,
    pub protocol_fee_owed_b: u64,
    pub token_mint_a: Pubkey,
    pub token_vault_a: Pubkey,
    pub fee_growth_global_a: u128,
    pub token_mint_b: Pubkey,
    pub token_vault_b: Pubkey,
    pub fee_growth_global_b: u128,
    pub reward_last_updated_timestamp: u64,
    pub reward_infos: [WhirlpoolRewardInfo; NUM_REWARDS],
}

impl Whirlpool {
    /// The fee growth accumulator of the token that is the input of a swap in the given direction.
    pub fn fee_growth_global_input(&self, a_to_b: bool) -> u128 {
        if a_to_b {
            self.fee_growth_global_a
        } else {
            self.fee_growth_global_b
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WhirlpoolRewardInfo {
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub emissions_per_second_x64: u128,
    pub growth_global_x64: u128,
}

impl WhirlpoolRewardInfo {
    pub fn initialized(&self) -> bool {
        self.mint != Pubkey::default()
    }
}

use solana_pubkey::Pubkey;

use crate::{
    tick_index_to_sqrt_price, SwapQuoteParam, TickArray, TickArrayAccount, Whirlpool,
    MIN_SQRT_PRICE, TICK_ARRAY_SIZE,
};

pub const TS_64: u16 = 64;

#[derive(Copy, Clone, Debug)]
pub struct TestTickInfo {
    pub index: i32,
    pub liquidity_net: i128,
}

#[derive(Copy, Clone, Debug)]
pub enum TestTickArray {
    Initialized(i32),
    Uninitialized(i32),
}

pub fn test_address(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

/// A tick array with only the given ticks initialized. Ticks outside the array are ignored.
pub fn test_tick_array(start_tick_index: i32, tick_spacing: u16, ticks: &[TestTickInfo]) -> TickArray {
    let mut tick_array = TickArray::new(test_address(0xff), start_tick_index);
    let ticks_in_array = TICK_ARRAY_SIZE as i32 * tick_spacing as i32;
    for info in ticks {
        let offset = info.index - start_tick_index;
        if offset < 0 || offset >= ticks_in_array || offset % tick_spacing as i32 != 0 {
            continue;
        }
        let tick = &mut tick_array.ticks[(offset / tick_spacing as i32) as usize];
        tick.initialized = true;
        tick.liquidity_net = info.liquidity_net;
        tick.liquidity_gross = info.liquidity_net.unsigned_abs();
    }
    tick_array
}

pub struct SwapTestFixtureInfo {
    pub tick_spacing: u16,
    pub liquidity: u128,
    pub curr_tick_index: i32,
    pub fee_rate: u16,
    pub protocol_fee_rate: u16,
    pub fee_growth_global_a: u128,
    pub fee_growth_global_b: u128,
    pub tick_arrays: Vec<TestTickArray>,
    pub ticks: Vec<TestTickInfo>,
    pub token_amount: u64,
    pub sqrt_price_limit: u128,
    pub other_amount_threshold: u64,
    pub a_to_b: bool,
    pub amount_specified_is_input: bool,
}

impl Default for SwapTestFixtureInfo {
    fn default() -> Self {
        Self {
            tick_spacing: TS_64,
            liquidity: 0,
            curr_tick_index: 0,
            fee_rate: 3000,
            protocol_fee_rate: 0,
            fee_growth_global_a: 0,
            fee_growth_global_b: 0,
            tick_arrays: vec![TestTickArray::Initialized(0)],
            ticks: vec![],
            token_amount: 0,
            sqrt_price_limit: MIN_SQRT_PRICE,
            other_amount_threshold: 0,
            a_to_b: true,
            amount_specified_is_input: true,
        }
    }
}

impl SwapTestFixtureInfo {
    pub fn whirlpool(&self) -> Whirlpool {
        Whirlpool {
            tick_spacing: self.tick_spacing,
            fee_rate: self.fee_rate,
            protocol_fee_rate: self.protocol_fee_rate,
            liquidity: self.liquidity,
            sqrt_price: tick_index_to_sqrt_price(self.curr_tick_index).unwrap(),
            tick_current_index: self.curr_tick_index,
            fee_growth_global_a: self.fee_growth_global_a,
            fee_growth_global_b: self.fee_growth_global_b,
            ..Default::default()
        }
    }

    pub fn tick_array_accounts(&self) -> Vec<TickArrayAccount> {
        self.tick_arrays
            .iter()
            .enumerate()
            .map(|(i, tick_array)| {
                let address = test_address(i as u8 + 1);
                match tick_array {
                    TestTickArray::Initialized(start) => TickArrayAccount::initialized(
                        address,
                        test_tick_array(*start, self.tick_spacing, &self.ticks),
                    ),
                    TestTickArray::Uninitialized(start) => {
                        TickArrayAccount::uninitialized(address, *start)
                    }
                }
            })
            .collect()
    }

    pub fn param(&self) -> SwapQuoteParam {
        SwapQuoteParam {
            whirlpool: self.whirlpool(),
            tick_arrays: self.tick_array_accounts(),
            token_amount: self.token_amount,
            sqrt_price_limit: self.sqrt_price_limit,
            other_amount_threshold: self.other_amount_threshold,
            a_to_b: self.a_to_b,
            amount_specified_is_input: self.amount_specified_is_input,
        }
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use solana_pubkey::Pubkey;
use whirlpool_quote_core::{TickArray, Whirlpool};

use crate::{QuoteError, Result};

/// Source of decoded whirlpool and tick array accounts.
///
/// Fetching and decoding account data is up to the implementor, be it an RPC client, a
/// geyser cache or a fixed snapshot.
#[async_trait]
pub trait AccountReader: Send + Sync {
    /// Fetch a whirlpool. Fails with `AccountNotFound` if it does not exist.
    async fn whirlpool(&self, address: &Pubkey) -> Result<Whirlpool>;

    /// Fetch a tick array. A missing account is not an error, it is an uninitialized array.
    async fn tick_array(&self, address: &Pubkey) -> Result<Option<TickArray>>;
}

/// Maps a whirlpool and a tick array start index to the tick array account address.
pub trait TickArrayAddressDeriver: Send + Sync {
    fn tick_array_address(&self, whirlpool: &Pubkey, start_tick_index: i32) -> Result<Pubkey>;
}

impl<F> TickArrayAddressDeriver for F
where
    F: Fn(&Pubkey, i32) -> Result<Pubkey> + Send + Sync,
{
    fn tick_array_address(&self, whirlpool: &Pubkey, start_tick_index: i32) -> Result<Pubkey> {
        self(whirlpool, start_tick_index)
    }
}

/// An `AccountReader` over accounts held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountReader {
    whirlpools: HashMap<Pubkey, Whirlpool>,
    tick_arrays: HashMap<Pubkey, TickArray>,
}

impl InMemoryAccountReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_whirlpool(&mut self, address: Pubkey, whirlpool: Whirlpool) {
        self.whirlpools.insert(address, whirlpool);
    }

    pub fn insert_tick_array(&mut self, address: Pubkey, tick_array: TickArray) {
        self.tick_arrays.insert(address, tick_array);
    }

    pub fn with_whirlpool(mut self, address: Pubkey, whirlpool: Whirlpool) -> Self {
        self.insert_whirlpool(address, whirlpool);
        self
    }

    pub fn with_tick_array(mut self, address: Pubkey, tick_array: TickArray) -> Self {
        self.insert_tick_array(address, tick_array);
        self
    }
}

#[async_trait]
impl AccountReader for InMemoryAccountReader {
    async fn whirlpool(&self, address: &Pubkey) -> Result<Whirlpool> {
        self.whirlpools
            .get(address)
            .copied()
            .ok_or(QuoteError::AccountNotFound(*address))
    }

    async fn tick_array(&self, address: &Pubkey) -> Result<Option<TickArray>> {
        Ok(self.tick_arrays.get(address).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_reader() {
        let whirlpool_address = Pubkey::new_from_array([1; 32]);
        let tick_array_address = Pubkey::new_from_array([2; 32]);
        let whirlpool = Whirlpool {
            tick_spacing: 64,
            ..Default::default()
        };
        let reader = InMemoryAccountReader::new()
            .with_whirlpool(whirlpool_address, whirlpool)
            .with_tick_array(tick_array_address, TickArray::new(whirlpool_address, 0));

        assert_eq!(reader.whirlpool(&whirlpool_address).await.unwrap(), whirlpool);
        assert!(matches!(
            reader.whirlpool(&tick_array_address).await,
            Err(QuoteError::AccountNotFound(address)) if address == tick_array_address
        ));
        assert!(reader.tick_array(&tick_array_address).await.unwrap().is_some());
        assert!(reader.tick_array(&whirlpool_address).await.unwrap().is_none());
    }

    #[test]
    fn test_closure_deriver() {
        let deriver = |whirlpool: &Pubkey, start_tick_index: i32| -> Result<Pubkey> {
            let mut bytes = whirlpool.to_bytes();
            bytes[..4].copy_from_slice(&start_tick_index.to_le_bytes());
            Ok(Pubkey::new_from_array(bytes))
        };
        let whirlpool = Pubkey::new_from_array([7; 32]);
        let address = deriver.tick_array_address(&whirlpool, -5632).unwrap();
        assert_eq!(address.to_bytes()[..4], (-5632i32).to_le_bytes());
        assert_eq!(address.to_bytes()[4..], [7; 28]);
    }
}

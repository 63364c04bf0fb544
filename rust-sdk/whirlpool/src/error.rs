use std::error::Error;

use solana_pubkey::Pubkey;
use whirlpool_quote_core::CoreError;

/// Errors returned by the async quote functions.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("account not found: {0}")]
    AccountNotFound(Pubkey),

    #[error("mint {0} is neither token A nor token B of the whirlpool")]
    MintNotInPool(Pubkey),

    #[error("account reader failed: {0}")]
    Reader(#[source] Box<dyn Error + Send + Sync>),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QuoteError>;

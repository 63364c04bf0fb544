mod liquidity;

pub use liquidity::*;

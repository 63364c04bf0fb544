mod liquidity;
mod pool;
mod position;
mod swap;
mod tick;
mod token;

pub use liquidity::*;
pub use pool::*;
pub use position::*;
pub use swap::*;
pub use tick::*;
pub use token::*;

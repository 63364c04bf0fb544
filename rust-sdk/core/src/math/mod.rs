mod bit_math;
mod liquidity;
mod position;
mod tick;
mod tick_index;
mod token;

#[cfg(feature = "floats")]
mod price;

pub use bit_math::*;
pub use liquidity::*;
pub use position::*;
pub use tick::*;
pub use tick_index::*;
pub use token::*;

#[cfg(feature = "floats")]
pub use price::*;

mod pool;
mod swap;
mod tick;
mod token;

pub use pool::*;
pub use swap::*;
pub use tick::*;
pub use token::*;

mod constants;
mod error;
mod math;
mod quote;
mod swap;
mod types;

pub use constants::*;
pub use error::*;
pub use math::*;
pub use quote::*;
pub use swap::*;
pub use types::*;

mod config;
mod error;
mod reader;
mod swap;

pub use config::*;
pub use error::*;
pub use reader::*;
pub use swap::*;

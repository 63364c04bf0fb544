mod engine;
mod quote;
mod step;
mod tick_array_sequence;

#[cfg(test)]
pub(crate) mod test_fixture;

pub use engine::*;
pub use quote::*;
pub use step::*;
pub use tick_array_sequence::*;

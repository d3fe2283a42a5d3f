pub mod access;
pub mod normalize;
pub mod resolver;
pub mod types;

pub use types::*;

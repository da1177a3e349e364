//! Utility modules

pub mod fields;
pub mod fixtures;
pub mod memory_source;
pub mod validation;

pub use fixtures::*;
pub use memory_source::*;
pub use validation::*;

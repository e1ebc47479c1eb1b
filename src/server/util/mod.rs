//! Small helpers shared across layers.

pub mod client;
pub mod mask;
pub mod validate;

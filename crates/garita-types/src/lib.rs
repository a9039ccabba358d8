//! Core types for the vehicle inspection engine

mod error;
mod types;

pub use error::*;
pub use types::*;

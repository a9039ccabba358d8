//! Infrastructure layer: sheet-backed implementations of the domain seams

pub mod layout;
pub mod persistence;
pub mod pipeline;
pub mod registry;

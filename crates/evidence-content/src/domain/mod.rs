//! Content domain types.

pub mod document;
pub mod language;
pub mod model;

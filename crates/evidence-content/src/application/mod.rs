//! Content loading.

pub mod provider;
pub mod source;

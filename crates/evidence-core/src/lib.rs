//! Evidence Core — shared abstractions.
//!
//! This crate defines the traits and types that the content, profile and
//! game crates depend on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod store;

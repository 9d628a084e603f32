//! Evidence — HTTP presentation boundary.
//!
//! Exposes the game controller's read-only state and intents, the profile
//! store and the content provider as JSON routes.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

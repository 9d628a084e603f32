//! Evidence — game controller.
//!
//! Drives one playthrough at a time: begin, optional registration, one
//! binary choice per scenario, and resolution of the final score vector
//! into an archetype.

pub mod application;
pub mod domain;

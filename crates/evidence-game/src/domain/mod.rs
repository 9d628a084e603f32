//! Game domain: the controller state machine and its vocabulary.

pub mod commands;
pub mod controller;
pub mod events;
pub mod resolution;

//! Route modules, one per surface of the quiz.

pub mod content;
pub mod game;
pub mod health;
pub mod profile;

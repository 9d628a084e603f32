//! Evidence — content.
//!
//! Responsible for the language-keyed content documents the quiz plays
//! from: the text lookup table, the ordered scenario list and the ordered
//! archetype list, plus loading them and broadcasting language changes.

pub mod application;
pub mod domain;

//! Shared test doubles and fixtures for the Evidence archetype quiz.

mod clock;
mod content;
pub mod fixtures;
mod store;

pub use clock::{FixedClock, fixed_now};
pub use content::{FailingContentSource, GatedContentSource, StaticContentSource};
pub use store::{FailingKeyValueStore, FlakyKeyValueStore, MemoryKeyValueStore};

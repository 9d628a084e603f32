//! Evidence — profile persistence.
//!
//! Everything the quiz remembers between runs (who the user is, which
//! archetypes they got, which language they prefer) lives here, namespaced
//! under a common key prefix on top of any `KeyValueStore` backend.

pub mod profile;
pub mod schema;
pub mod sqlite_store;

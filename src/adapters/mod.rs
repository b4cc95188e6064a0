// Adapters layer: concrete implementations of the domain ports.

pub mod local;
pub mod memory;

pub use local::LocalStorage;
pub use memory::{Dataset, InMemoryStore};

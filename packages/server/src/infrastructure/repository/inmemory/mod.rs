//! In-memory implementations.

mod registry;

pub use registry::InMemoryRoomRegistry;

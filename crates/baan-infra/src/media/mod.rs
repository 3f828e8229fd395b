//! Object-storage client implementations.
//!
//! BaanBoard never interprets image binaries; it forwards them to the
//! storage service and keeps the returned URL.

mod http;
mod memory;

pub use http::{HttpMediaStore, MediaConfig};
pub use memory::InMemoryMediaStore;

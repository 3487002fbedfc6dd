//! Reference implementations of the Waypost persistence traits.

pub mod memory;

pub use memory::InMemoryLinkStore;

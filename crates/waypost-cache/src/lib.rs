//! Expiring key-value cache shared by the Waypost resolver.
//!
//! The cache is best-effort and never a source of truth: writes that keep
//! failing are dropped, malformed entries are evicted on read, and reads
//! past an entry's expiry behave as misses. It is layered over a
//! [`StorageMedium`], the minimal key-value surface a browser-storage-like
//! host provides.

pub mod error;
pub mod medium;
pub mod redirect;
pub mod store;

pub use error::MediumError;
pub use medium::{MemoryMedium, StorageMedium};
pub use redirect::RedirectCache;
pub use store::TtlCache;

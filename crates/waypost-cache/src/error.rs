use thiserror::Error;

/// Errors reported by a [`StorageMedium`](crate::StorageMedium) write.
///
/// Reads never fail: an unreadable value is indistinguishable from an
/// absent one at the medium level.
#[derive(Debug, Clone, Error)]
pub enum MediumError {
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

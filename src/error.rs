/// Result type for offline region operations.
pub type Result<T> = std::result::Result<T, RegionError>;

/// Errors raised while constructing or decoding an offline region definition.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RegionError {
    /// Zoom range, pixel ratio or geometry violates the definition's invariants.
    #[error("Invalid offline region definition: {0}")]
    InvalidDefinition(String),

    /// GeoJSON geometry failed to parse or has an invalid shape.
    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),

    /// Binary record ended before `field` could be read.
    #[error("Truncated record: {field} needs {needed} bytes, {remaining} remaining")]
    TruncatedRecord {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// Record is structurally invalid outside of its geometry.
    #[error("Malformed offline region record: {0}")]
    MalformedRecord(String),
}

impl RegionError {
    #[inline] pub(crate) fn invalid(msg: impl Into<String>) -> Self { Self::InvalidDefinition(msg.into()) }

    #[inline] pub(crate) fn geometry(msg: impl Into<String>) -> Self { Self::MalformedGeometry(msg.into()) }

    #[inline] pub(crate) fn record(msg: impl Into<String>) -> Self { Self::MalformedRecord(msg.into()) }
}

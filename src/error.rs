use thiserror::Error;

/// Errors surfaced by the lighting subsystem's lifecycle entry points.
///
/// Query and update paths have no recoverable failures: coordinate contract
/// violations there fail fast by assertion instead of producing silently
/// wrong lighting.
#[derive(Debug, Error)]
pub enum LightingError {
    #[error("invalid world dimensions {width}x{height}x{length}: all extents must be positive")]
    InvalidDimensions {
        width: i32,
        height: i32,
        length: i32,
    },

    #[error("lighting config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result alias for lighting operations
pub type LightingResult<T> = Result<T, LightingError>;

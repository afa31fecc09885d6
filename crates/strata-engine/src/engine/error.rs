use std::fmt;

/// Setup failures. Both are fatal: no engine is created.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The backend has no surface for the configured target.
    SurfaceNotFound { target: String },
    /// Configured dimensions are zero, negative or not finite.
    InvalidSize { width: f64, height: f64 },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SurfaceNotFound { target } => {
                write!(f, "no drawing surface matches target `{target}`")
            }
            EngineError::InvalidSize { width, height } => {
                write!(f, "invalid surface size {width}x{height}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

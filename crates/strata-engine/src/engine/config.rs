use crate::coords::SurfaceInfo;

use super::EngineError;

/// Engine setup parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Surface width in logical pixels.
    pub width: f64,
    /// Surface height in logical pixels.
    pub height: f64,
    /// Name the [`SurfaceBackend`](crate::surface::SurfaceBackend) resolves.
    pub target: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            target: "#canvas".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if SurfaceInfo::new(self.width, self.height).is_valid() {
            Ok(())
        } else {
            Err(EngineError::InvalidSize { width: self.width, height: self.height })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_canvas_defaults() {
        let config = EngineConfig::default();
        assert_eq!((config.width, config.height), (500.0, 500.0));
        assert_eq!(config.target, "#canvas");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_sizes() {
        for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f64::INFINITY, 10.0), (10.0, f64::NAN)] {
            let err = EngineConfig::default().with_size(w, h).validate().unwrap_err();
            assert!(matches!(err, EngineError::InvalidSize { .. }));
        }
    }
}

#![forbid(unsafe_code)]

//! Tunable collision and registration policy for a [`DragDropRegistry`].
//!
//! [`RegistryConfig::default()`] gives strict overlap, no hit slop, and
//! rebind cleanup. With the `config` feature the same struct can be loaded
//! from TOML or JSON:
//!
//! ```toml
//! # dropkit.toml
//! overlap = "inclusive"
//! hit_slop = 4.0
//! purge_on_rebind = true
//! ```
//!
//! ```rust,ignore
//! let config = RegistryConfig::from_toml_file("dropkit.toml")?;
//! let registry = DragDropRegistry::with_config(config);
//! ```
//!
//! [`DragDropRegistry`]: crate::DragDropRegistry

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use dropkit_core::Rect;

/// How two rectangles must relate to count as colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum OverlapPolicy {
    /// The rectangles must share a region of positive area. Edge contact is
    /// not a collision.
    #[default]
    Strict,
    /// Shared edges and corners also count.
    Inclusive,
}

impl OverlapPolicy {
    /// Apply the policy to a pair of rectangles.
    #[must_use]
    pub fn collides(self, a: &Rect, b: &Rect) -> bool {
        match self {
            Self::Strict => a.overlaps(b),
            Self::Inclusive => a.touches(b),
        }
    }
}

/// Registry policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct RegistryConfig {
    /// Collision rule used by every geometry query.
    pub overlap: OverlapPolicy,

    /// Distance each droppable rectangle is grown by on every side before
    /// collision testing. Must be finite and non-negative.
    pub hit_slop: f64,

    /// When a droppable is re-registered under the other binding mode,
    /// remove its entry from the previous store. Disabling this leaves both
    /// entries in place and exclusive bindings win.
    pub purge_on_rebind: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            overlap: OverlapPolicy::Strict,
            hit_slop: 0.0,
            purge_on_rebind: true,
        }
    }
}

impl RegistryConfig {
    /// Builder-style overlap override.
    #[must_use]
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Builder-style hit slop override.
    ///
    /// Negative or non-finite values fail [`validate`](Self::validate); a
    /// registry built with one anyway treats the slop as zero.
    #[must_use]
    pub fn with_hit_slop(mut self, hit_slop: f64) -> Self {
        self.hit_slop = hit_slop;
        self
    }

    /// Builder-style rebind policy override.
    #[must_use]
    pub fn with_purge_on_rebind(mut self, purge: bool) -> Self {
        self.purge_on_rebind = purge;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check every parameter is within its accepted range.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.hit_slop.is_finite() {
            errors.push(format!("hit_slop must be finite, got {}", self.hit_slop));
        } else if self.hit_slop < 0.0 {
            errors.push(format!(
                "hit_slop must be non-negative, got {}",
                self.hit_slop
            ));
        }
        errors
    }

    /// Return `self` if valid, else a [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a registry configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        let errors = RegistryConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn validate_catches_negative_hit_slop() {
        let config = RegistryConfig::default().with_hit_slop(-1.0);
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("hit_slop")));
    }

    #[test]
    fn validate_catches_nan_hit_slop() {
        let config = RegistryConfig::default().with_hit_slop(f64::NAN);
        assert!(matches!(
            config.validated(),
            Err(ConfigError::Validation(ref errors)) if errors[0].contains("finite")
        ));
    }

    #[test]
    fn strict_rejects_edge_contact() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!OverlapPolicy::Strict.collides(&a, &b));
        assert!(OverlapPolicy::Inclusive.collides(&a, &b));
    }

    #[test]
    fn validation_error_display_joins_messages() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_uses_defaults() {
        let config = RegistryConfig::from_toml_str("overlap = \"inclusive\"\n").unwrap();
        assert_eq!(config.overlap, OverlapPolicy::Inclusive);
        assert_eq!(config.hit_slop, 0.0);
        assert!(config.purge_on_rebind);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trip() {
        let config = RegistryConfig::default()
            .with_hit_slop(2.5)
            .with_purge_on_rebind(false);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(RegistryConfig::from_json_str(&json).unwrap(), config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_rejects_negative_slop() {
        let err = RegistryConfig::from_toml_str("hit_slop = -3.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dropkit.toml");
        std::fs::write(&path, "hit_slop = 1.5\npurge_on_rebind = false\n").unwrap();
        let config = RegistryConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.hit_slop, 1.5);
        assert!(!config.purge_on_rebind);
    }

    #[cfg(feature = "config")]
    #[test]
    fn missing_file_is_io_error() {
        let err = RegistryConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

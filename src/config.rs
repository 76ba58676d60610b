//! Animation configuration.
//!
//! [`FallConfig`] mirrors the external record the host hands over at
//! startup: every field is optional in the serialized form and falls back to
//! the defaults below. The record uses camelCase keys so a JSON snippet like
//! this parses directly:
//!
//! ```json
//! {
//!     "maxItems": 40,
//!     "spawnRate": 0.03,
//!     "minSpeed": 0.3,
//!     "maxSpeed": 1.2,
//!     "characters": ["❄", "❅", "❆"]
//! }
//! ```
//!
//! If both `characters` and `images` are provided, images take priority
//! once at least one of them loads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Where an image visual comes from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ImageLocator {
    /// Image file on disk (PNG or JPEG). Serialized as a plain path string.
    Path(PathBuf),
    /// Image bytes embedded by the host, e.g. via `include_bytes!`.
    Embedded {
        /// Name used in log messages.
        name: String,
        /// Encoded image bytes (PNG or JPEG).
        bytes: Vec<u8>,
    },
}

impl fmt::Display for ImageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageLocator::Path(path) => write!(f, "{}", path.display()),
            ImageLocator::Embedded { name, .. } => write!(f, "embedded:{}", name),
        }
    }
}

/// Tunables for the falling animation. Immutable after startup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FallConfig {
    /// Master switch. When false the overlay performs no action at all.
    pub enabled: bool,
    /// Max items on screen.
    pub max_items: usize,
    /// Probability of spawning per frame (lower = fewer).
    pub spawn_rate: f32,
    /// Min fall speed (pixels per frame at 60 fps).
    pub min_speed: f32,
    /// Max fall speed.
    pub max_speed: f32,
    /// Min size in pixels.
    pub min_size: f32,
    /// Max size.
    pub max_size: f32,
    /// Min opacity (0-1).
    pub min_opacity: f32,
    /// Max opacity.
    pub max_opacity: f32,
    /// Horizontal drift factor (0 = straight down).
    pub drift: f32,
    /// Rotation speed factor (0 = no rotation).
    pub rotation_speed: f32,
    /// Text/emoji glyphs to fall. Ignored while images are available.
    pub characters: Vec<String>,
    /// Image sources. Overrides `characters` if any of them loads.
    pub images: Vec<ImageLocator>,
}

impl Default for FallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_items: 40,
            spawn_rate: 0.03,
            min_speed: 0.3,
            max_speed: 1.2,
            min_size: 8.0,
            max_size: 16.0,
            min_opacity: 0.4,
            max_opacity: 0.85,
            drift: 0.3,
            rotation_speed: 0.02,
            characters: vec!["❄".into(), "❅".into(), "❆".into()],
            images: Vec::new(),
        }
    }
}

impl FallConfig {
    /// Parse a configuration record from a JSON string.
    ///
    /// Missing fields fall back to their defaults, so a partial record such
    /// as `{"maxItems": 20}` is valid.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a configuration record from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Fall speed range, low end first.
    pub(crate) fn speed_range(&self) -> (f32, f32) {
        ordered(self.min_speed, self.max_speed)
    }

    /// Size range, low end first.
    pub(crate) fn size_range(&self) -> (f32, f32) {
        ordered(self.min_size, self.max_size)
    }

    /// Opacity range, low end first.
    pub(crate) fn opacity_range(&self) -> (f32, f32) {
        ordered(self.min_opacity, self.max_opacity)
    }
}

/// An inverted min/max pair is accepted and treated as the same range.
fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FallConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_items, 40);
        assert_eq!(config.spawn_rate, 0.03);
        assert_eq!(config.min_speed, 0.3);
        assert_eq!(config.max_speed, 1.2);
        assert_eq!(config.min_size, 8.0);
        assert_eq!(config.max_size, 16.0);
        assert_eq!(config.characters, vec!["❄", "❅", "❆"]);
        assert!(config.images.is_empty());
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let config = FallConfig::from_json(r#"{"maxItems": 5, "spawnRate": 1.0}"#).unwrap();
        assert_eq!(config.max_items, 5);
        assert_eq!(config.spawn_rate, 1.0);
        assert_eq!(config.min_speed, 0.3);
        assert_eq!(config.characters.len(), 3);
    }

    #[test]
    fn test_camel_case_keys() {
        let config = FallConfig::from_json(
            r#"{"minOpacity": 0.1, "maxOpacity": 0.2, "rotationSpeed": 0.5, "enabled": false}"#,
        )
        .unwrap();
        assert_eq!(config.min_opacity, 0.1);
        assert_eq!(config.max_opacity, 0.2);
        assert_eq!(config.rotation_speed, 0.5);
        assert!(!config.enabled);
    }

    #[test]
    fn test_image_paths_parse_as_strings() {
        let config =
            FallConfig::from_json(r#"{"images": ["sprites/leaf.png", "sprites/star.png"]}"#)
                .unwrap();
        assert_eq!(config.images.len(), 2);
        assert_eq!(
            config.images[0],
            ImageLocator::Path(PathBuf::from("sprites/leaf.png"))
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(FallConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_inverted_ranges_normalize() {
        let config = FallConfig {
            min_speed: 2.0,
            max_speed: 1.0,
            ..Default::default()
        };
        assert_eq!(config.speed_range(), (1.0, 2.0));
        assert_eq!(config.size_range(), (8.0, 16.0));
    }
}

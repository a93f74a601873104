//! Construction-time configuration
//!
//! Keys are camelCase so the same JSON works for the browser options object
//! and the `GRID_CONFIG` environment variable of the headless driver.

use serde::Deserialize;

use super::error::GridError;
use crate::theme::colors;

/// Engine configuration, immutable once the engine is built
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Dot radius in pixels
    pub point_size: f64,
    /// Lattice pitch in pixels (rounded, at least 1)
    pub spacing: f64,
    /// Fill for points that are not activated
    pub point_color: String,
    /// Reserved: accepted for compatibility, not used by the draw step
    pub hover_color: String,
    /// Reserved: accepted for compatibility, not used by activation
    pub max_radius: f64,
    /// Pointer distance below which a point becomes activated
    pub brush_radius: f64,
    /// Milliseconds between accent color changes; <= 0 freezes the cycle
    pub color_change_interval: f64,
    /// Milliseconds between full clears of the activated set; <= 0 disables
    pub reset_interval: f64,
    /// CSS selector of the fixed header whose height becomes the top margin
    pub top_margin_selector: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            spacing: 10.0,
            point_color: colors::POINT_BASE.to_string(),
            hover_color: colors::HOVER.to_string(),
            max_radius: 25.0,
            brush_radius: 30.0,
            color_change_interval: 20_000.0,
            reset_interval: 0.0,
            top_margin_selector: ".top-nav".to_string(),
        }
    }
}

impl GridConfig {
    /// Parse a JSON options object. Missing keys take their defaults, unknown
    /// keys (e.g. `canvas`) are ignored.
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GridError::InvalidConfig(e.to_string()))?;
        config.validated()
    }

    /// Reject values no lattice or draw step can work with
    pub fn validated(self) -> Result<Self, GridError> {
        let numeric = [
            ("pointSize", self.point_size),
            ("spacing", self.spacing),
            ("maxRadius", self.max_radius),
            ("brushRadius", self.brush_radius),
            ("colorChangeInterval", self.color_change_interval),
            ("resetInterval", self.reset_interval),
        ];
        for (name, value) in numeric {
            if !value.is_finite() {
                return Err(GridError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        if self.point_size < 0.0 {
            return Err(GridError::InvalidConfig("pointSize must not be negative".into()));
        }
        Ok(self)
    }

    /// Integer lattice pitch: nearest integer, never below 1
    pub fn spacing_px(&self) -> u32 {
        let rounded = self.spacing.round();
        if rounded < 1.0 {
            1
        } else {
            rounded.min(u32::MAX as f64) as u32
        }
    }

    /// The options the page bootstrap mounts with
    pub fn page_default() -> Self {
        Self {
            spacing: 15.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = GridConfig::from_json("{}").unwrap();
        assert_eq!(config, GridConfig::default());
        assert_eq!(config.spacing_px(), 10);
        assert_eq!(config.reset_interval, 0.0);
    }

    #[test]
    fn camel_case_keys_and_unknown_keys() {
        let config = GridConfig::from_json(
            r#"{"pointSize": 2, "spacing": 14.6, "resetInterval": 5000, "canvas": {}}"#,
        )
        .unwrap();
        assert_eq!(config.point_size, 2.0);
        assert_eq!(config.spacing_px(), 15);
        assert_eq!(config.reset_interval, 5000.0);
    }

    #[test]
    fn spacing_never_below_one() {
        let mut config = GridConfig::default();
        config.spacing = 0.2;
        assert_eq!(config.spacing_px(), 1);
        config.spacing = -40.0;
        assert_eq!(config.spacing_px(), 1);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            GridConfig::from_json(r#"{"pointSize": -1}"#),
            Err(GridError::InvalidConfig(_))
        ));
        assert!(matches!(
            GridConfig::from_json("not json"),
            Err(GridError::InvalidConfig(_))
        ));

        let mut config = GridConfig::default();
        config.spacing = f64::NAN;
        assert!(config.validated().is_err());
    }

    #[test]
    fn page_default_uses_wider_spacing() {
        assert_eq!(GridConfig::page_default().spacing_px(), 15);
    }
}

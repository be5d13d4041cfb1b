//! Render configuration for the figure catalog.
//!
//! All sizing and style values the figures use live in one [`RenderOptions`]
//! value, read from `figures.toml` next to the binary. The `const` values
//! stay as fallback/default. In watch mode editing this file is what triggers
//! a rebuild; it plays the role a hot-reloaded figure script plays in a
//! scripting setup.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Full sheet width in pixels (A4 at 300 dpi).
pub const FULL_WIDTH: f64 = 2480.0;
/// Fraction of the full sheet the figures may occupy.
pub const MARGIN_RATIO: f64 = 0.8;
/// Stroke width of resolved curves and vectors.
pub const MAIN_STROKE_WIDTH: f64 = 5.0;
/// Stroke width of control polygons and construction lines.
pub const SECONDARY_STROKE_WIDTH: f64 = 3.0;
/// Dash pattern of the secondary stroke style.
pub const DASH_PATTERN: &str = "20 10";
/// Radius of the point markers.
pub const POINT_RADIUS: f64 = 15.0;
/// Arrow head radius as a multiple of the arrow's stroke width.
pub const ARROW_HEAD_FACTOR: f64 = 5.0;
/// Number of parameter samples used to trace an arbitrary-degree curve.
pub const CURVE_STEPS: usize = 3000;

/// Illustrative parameter value each figure freezes its construction at.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct FigureParams {
    /// Parameter of the linear interpolation figure.
    pub linear: f64,
    /// Parameter of the quadratic construction figure.
    pub quadratic: f64,
    /// Parameter of the cubic construction figure.
    pub cubic: f64,
    /// Parameter the general pyramid figure is frozen at.
    pub general: f64,
}

impl Default for FigureParams {
    fn default() -> Self {
        Self {
            linear: 0.3,
            quadratic: 0.35,
            cubic: 0.6,
            general: 0.3,
        }
    }
}

/// All runtime-changeable render options.
///
/// Loaded from `figures.toml`; every field is optional in the file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Full sheet width in pixels.
    pub full_width: f64,
    /// Fraction of the sheet the drawable canvas occupies.
    pub margin_ratio: f64,
    /// Stroke width of the primary style.
    pub main_stroke_width: f64,
    /// Stroke width of the secondary style.
    pub secondary_stroke_width: f64,
    /// Dash pattern of the secondary style.
    pub dash_pattern: String,
    /// Marker disc radius.
    pub point_radius: f64,
    /// Arrow head radius as a multiple of the arrow's stroke width.
    pub arrow_head_factor: f64,
    /// Parameter samples per curve trace.
    pub curve_steps: usize,
    /// Per-figure construction parameters.
    pub params: FigureParams,
    /// Directory the rendered figures are written into.
    pub output_dir: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            full_width: FULL_WIDTH,
            margin_ratio: MARGIN_RATIO,
            main_stroke_width: MAIN_STROKE_WIDTH,
            secondary_stroke_width: SECONDARY_STROKE_WIDTH,
            dash_pattern: DASH_PATTERN.to_string(),
            point_radius: POINT_RADIUS,
            arrow_head_factor: ARROW_HEAD_FACTOR,
            curve_steps: CURVE_STEPS,
            params: FigureParams::default(),
            output_dir: base_dir().join("generated"),
        }
    }
}

impl RenderOptions {
    /// The drawable canvas width.
    pub fn width(&self) -> f64 {
        self.full_width * self.margin_ratio
    }

    /// Read options from `path`.
    ///
    /// A missing file falls back to the defaults; a present but malformed
    /// file is an error. The watch loop reports such an error and keeps the
    /// previously loaded options.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("no options file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Path of the options file next to the binary.
    pub fn config_path() -> PathBuf {
        base_dir().join("figures.toml")
    }
}

/// Directory the binary lives in, the anchor for all derived paths.
fn base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_sheet_constants() {
        let options = RenderOptions::default();
        assert_eq!(options.full_width, 2480.0);
        assert_eq!(options.width(), 2480.0 * 0.8);
        assert_eq!(options.curve_steps, 3000);
        assert_eq!(options.params.cubic, 0.6);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let options: RenderOptions = toml::from_str(
            "full_width = 1000.0\n\
             [params]\n\
             general = 0.5\n",
        )
        .unwrap();
        assert_eq!(options.full_width, 1000.0);
        assert_eq!(options.params.general, 0.5);
        assert_eq!(options.params.linear, 0.3);
        assert_eq!(options.point_radius, POINT_RADIUS);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("bezfig-options-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("figures.toml");
        std::fs::write(&path, "full_width = \"wide\"").unwrap();
        assert!(RenderOptions::load(&path).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("bezfig-does-not-exist.toml");
        let options = RenderOptions::load(&path).unwrap();
        assert_eq!(options.full_width, FULL_WIDTH);
    }
}

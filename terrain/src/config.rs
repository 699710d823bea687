use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a label's numeric text turns into an elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElevationMode {
    /// Staff readings: a lower reading is a higher elevation
    /// (`zero - reading`).
    #[default]
    Reading,

    /// Labels already hold elevations (`value - zero`).
    Precomputed,
}

impl ElevationMode {
    pub fn elevation(self, zero_offset: f64, raw: f64) -> f64 {
        match self {
            Self::Reading => zero_offset - raw,
            Self::Precomputed => raw - zero_offset,
        }
    }
}

/// Run configuration, passed explicitly to every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Level reading (or elevation) at the zero point.
    pub zero_offset: f64,

    pub elevation_mode: ElevationMode,

    /// Grid spacing, in drawing units.
    pub grid_resolution: f64,

    /// Elevation step between contour levels.
    pub contour_interval: f64,

    /// Distance between section cuts, in drawing units.
    pub section_spacing: f64,

    /// Approximate distance between elevation labels along a contour.
    pub label_spacing: f64,

    /// Blank space between stacked section bands.
    pub section_gap: f64,

    /// Character height of every emitted text.
    pub text_height: f64,

    /// Contour colours (AutoCAD color indices), cycled per level.
    pub palette: Vec<u8>,

    pub csv_export: bool,

    pub csv_only: bool,

    pub output_path: Option<PathBuf>,

    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zero_offset: 0.0,
            elevation_mode: ElevationMode::Reading,
            grid_resolution: 0.5,
            contour_interval: 0.5,
            section_spacing: 5.0,
            label_spacing: 12.5,
            section_gap: 1.0,
            text_height: 0.3,
            palette: (1..=25).map(|i| i * 10).collect(),
            csv_export: false,
            csv_only: false,
            output_path: None,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ElevationMode};

    #[test]
    fn test_elevation_modes() {
        assert_eq!(ElevationMode::Reading.elevation(10.0, 1.5), 8.5);
        assert_eq!(ElevationMode::Precomputed.elevation(10.0, 1.5), -8.5);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"zero_offset": 1.5, "elevation_mode": "precomputed"}"#)
                .unwrap();
        assert_eq!(config.zero_offset, 1.5);
        assert_eq!(config.elevation_mode, ElevationMode::Precomputed);
        assert_eq!(config.palette, Config::default().palette);
        assert_eq!(config.palette.len(), 25);
        assert_eq!(config.palette[24], 250);
    }
}

//! Construction-time configuration.
//!
//! Every field has a default, so a TOML file only lists what it changes:
//!
//! ```toml
//! width = 800
//! height = 600
//! padding = 10
//! labels = [1, 2]
//! initial_k = 5
//! weighted = true
//!
//! [[points]]
//! x = 23
//! y = 56
//! label = 1
//! ```

use std::fs;
use std::path::Path;

use ecolor::Color32;
use serde_crate::Deserialize;

use crate::error::CanvasError;

/// One labeled point of the initial data set, in data coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(crate = "serde_crate", deny_unknown_fields)]
pub struct PointSpec {
    pub x: f64,
    pub y: f64,
    #[serde(deserialize_with = "de::label")]
    pub label: String,
}

impl PointSpec {
    pub fn new(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: label.into(),
        }
    }
}

/// Options for a canvas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(crate = "serde_crate", default, deny_unknown_fields)]
pub struct VisualizationOptions {
    /// Name of the surface the canvas is mounted on.
    pub root_surface: String,
    pub width: f64,
    pub height: f64,
    /// Added to both ends of each axis' data domain.
    pub padding: f64,
    pub point_radius: f64,
    #[serde(deserialize_with = "de::color")]
    pub default_fill: Color32,
    #[serde(deserialize_with = "de::color")]
    pub default_stroke: Color32,
    #[serde(deserialize_with = "de::color")]
    pub background_color: Color32,
    #[serde(deserialize_with = "de::labels")]
    pub labels: Vec<String>,
    pub initial_k: usize,
    pub weighted: bool,
    /// How long bounding circle and connecting lines stay visible.
    pub transition_ms: u64,
    pub connecting_line_width: f64,
    #[serde(deserialize_with = "de::color")]
    pub connecting_line_color: Color32,
    #[serde(deserialize_with = "de::color")]
    pub bounding_stroke: Color32,
    pub points: Vec<PointSpec>,
}

impl Default for VisualizationOptions {
    fn default() -> Self {
        Self {
            root_surface: "body".to_string(),
            width: 500.0,
            height: 300.0,
            padding: 50.0,
            point_radius: 5.0,
            default_fill: Color32::from_rgb(0x80, 0x80, 0x80),
            default_stroke: Color32::WHITE,
            background_color: Color32::from_rgb(0x1d, 0x1e, 0x22),
            labels: vec!["A".to_string(), "B".to_string()],
            initial_k: 3,
            weighted: false,
            transition_ms: 1500,
            connecting_line_width: 2.0,
            connecting_line_color: Color32::from_rgba_unmultiplied(230, 230, 230, 128),
            bounding_stroke: Color32::WHITE,
            points: Vec::new(),
        }
    }
}

impl VisualizationOptions {
    pub fn from_toml_str(s: &str) -> Result<Self, CanvasError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, CanvasError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Checks everything that does not depend on the data set.
    pub fn validate(&self) -> Result<(), CanvasError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CanvasError::parameter(
                    name,
                    format!("must be positive, got {value}"),
                ));
            }
        }
        for (name, value) in [
            ("padding", self.padding),
            ("point_radius", self.point_radius),
            ("connecting_line_width", self.connecting_line_width),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CanvasError::parameter(
                    name,
                    format!("must be non-negative, got {value}"),
                ));
            }
        }
        if self.initial_k == 0 {
            return Err(CanvasError::parameter(
                "initial_k",
                "must be a positive integer, got `0`",
            ));
        }
        if self.labels.is_empty() {
            return Err(CanvasError::InvalidLabels("no labels given".into()));
        }
        if self.labels.iter().any(|l| l.trim().is_empty()) {
            return Err(CanvasError::InvalidLabels("labels must not be empty".into()));
        }
        Ok(())
    }
}

mod de {
    use ecolor::Color32;
    use serde_crate::de::Error as _;
    use serde_crate::{Deserialize, Deserializer};

    /// Labels may be written as strings or integers.
    #[derive(Deserialize)]
    #[serde(crate = "serde_crate", untagged)]
    enum RawLabel {
        Text(String),
        Integer(i64),
    }

    impl From<RawLabel> for String {
        fn from(raw: RawLabel) -> Self {
            match raw {
                RawLabel::Text(s) => s,
                RawLabel::Integer(n) => n.to_string(),
            }
        }
    }

    pub fn label<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        RawLabel::deserialize(d).map(String::from)
    }

    pub fn labels<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Vec::<RawLabel>::deserialize(d).map(|v| v.into_iter().map(String::from).collect())
    }

    pub fn color<'de, D: Deserializer<'de>>(d: D) -> Result<Color32, D::Error> {
        let s = String::deserialize(d)?;
        Color32::from_hex(&s).map_err(|_| {
            D::Error::custom(format!("invalid color `{s}`, expected #rrggbb or #rrggbbaa"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_defaults() {
        let options = VisualizationOptions::from_toml_str("").unwrap();
        assert_eq!(options, VisualizationOptions::default());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let options = VisualizationOptions::from_toml_str(
            r##"
            width = 400
            default_fill = "#ff0000"
            labels = ["foo", "bar"]
            "##,
        )
        .unwrap();
        assert_eq!(options.width, 400.0);
        assert_eq!(options.height, 300.0);
        assert_eq!(options.default_fill, Color32::from_rgb(255, 0, 0));
        assert_eq!(options.labels, vec!["foo", "bar"]);
    }

    #[test]
    fn test_numeric_labels_and_points() {
        let options = VisualizationOptions::from_toml_str(
            r#"
            labels = [1, 2]

            [[points]]
            x = 23.0
            y = 56.0
            label = 1

            [[points]]
            x = 256.0
            y = 74.0
            label = "2"
            "#,
        )
        .unwrap();
        assert_eq!(options.labels, vec!["1", "2"]);
        assert_eq!(
            options.points,
            vec![PointSpec::new(23.0, 56.0, "1"), PointSpec::new(256.0, 74.0, "2")]
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = VisualizationOptions::from_toml_str("circleRadius = 4.0").unwrap_err();
        assert!(matches!(err, CanvasError::Config(_)));
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let err = VisualizationOptions::from_toml_str(r#"background_color = "tomato""#).unwrap_err();
        assert!(err.to_string().contains("invalid color `tomato`"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let cases = [
            VisualizationOptions {
                width: 0.0,
                ..Default::default()
            },
            VisualizationOptions {
                height: f64::INFINITY,
                ..Default::default()
            },
            VisualizationOptions {
                padding: -1.0,
                ..Default::default()
            },
            VisualizationOptions {
                initial_k: 0,
                ..Default::default()
            },
        ];
        for options in cases {
            assert!(matches!(
                options.validate(),
                Err(CanvasError::InvalidParameter { .. })
            ));
        }
        let no_labels = VisualizationOptions {
            labels: vec![],
            ..Default::default()
        };
        assert!(matches!(
            no_labels.validate(),
            Err(CanvasError::InvalidLabels(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = VisualizationOptions::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CanvasError::Io(_)));
    }
}

use std::collections::HashMap;

use ecolor::Color32;

use crate::error::CanvasError;
use crate::store::Label;

/// Nine-color categorical palette, assigned to labels in order.
pub const SCHEME_SET1: [Color32; 9] = [
    Color32::from_rgb(0xe4, 0x1a, 0x1c),
    Color32::from_rgb(0x37, 0x7e, 0xb8),
    Color32::from_rgb(0x4d, 0xaf, 0x4a),
    Color32::from_rgb(0x98, 0x4e, 0xa3),
    Color32::from_rgb(0xff, 0x7f, 0x00),
    Color32::from_rgb(0xff, 0xff, 0x33),
    Color32::from_rgb(0xa6, 0x56, 0x28),
    Color32::from_rgb(0xf7, 0x81, 0xbf),
    Color32::from_rgb(0x99, 0x99, 0x99),
];

/// Fixed mapping from class labels to fill colors.
///
/// Labels take palette colors in the order they were given, cycling after
/// nine. A repeated label keeps its first color. `Unclassified` and unknown
/// labels get the default fill.
#[derive(Debug, Clone)]
pub struct TypeColorAssignment {
    labels: Vec<String>,
    colors: HashMap<String, Color32>,
    default_fill: Color32,
}

impl TypeColorAssignment {
    pub fn new(labels: &[String], default_fill: Color32) -> Result<Self, CanvasError> {
        if labels.is_empty() {
            return Err(CanvasError::InvalidLabels("no labels given".into()));
        }
        let mut colors = HashMap::new();
        let mut ordered = Vec::with_capacity(labels.len());
        for label in labels {
            if label.trim().is_empty() {
                return Err(CanvasError::InvalidLabels("labels must not be empty".into()));
            }
            if !colors.contains_key(label) {
                colors.insert(label.clone(), SCHEME_SET1[ordered.len() % SCHEME_SET1.len()]);
                ordered.push(label.clone());
            }
        }
        Ok(Self {
            labels: ordered,
            colors,
            default_fill,
        })
    }

    pub fn color_of(&self, label: &Label) -> Color32 {
        self.color_of_name(label.class())
    }

    pub fn color_of_name(&self, name: Option<&str>) -> Color32 {
        name.and_then(|n| self.colors.get(n))
            .copied()
            .unwrap_or(self.default_fill)
    }

    /// The distinct labels in palette order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    pub fn default_fill(&self) -> Color32 {
        self.default_fill
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_labels_take_palette_in_order() {
        let palette = TypeColorAssignment::new(&labels(&["foo", "bar"]), Color32::GRAY).unwrap();
        assert_eq!(palette.color_of_name(Some("foo")), SCHEME_SET1[0]);
        assert_eq!(palette.color_of_name(Some("bar")), SCHEME_SET1[1]);
    }

    #[test]
    fn test_unknown_and_unclassified_get_default_fill() {
        let fill = Color32::from_rgb(1, 2, 3);
        let palette = TypeColorAssignment::new(&labels(&["A", "B"]), fill).unwrap();
        assert_eq!(palette.color_of(&Label::Unclassified), fill);
        assert_eq!(palette.color_of_name(Some("C")), fill);
        assert_eq!(palette.color_of_name(None), fill);
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let palette = TypeColorAssignment::new(&labels(&["1", "2", "3"]), Color32::GRAY).unwrap();
        let label = Label::Class("2".into());
        let first = palette.color_of(&label);
        for _ in 0..10 {
            assert_eq!(palette.color_of(&label), first);
        }
    }

    #[test]
    fn test_duplicate_keeps_first_color() {
        let palette =
            TypeColorAssignment::new(&labels(&["A", "B", "A", "C"]), Color32::GRAY).unwrap();
        assert_eq!(palette.labels(), &labels(&["A", "B", "C"])[..]);
        assert_eq!(palette.color_of_name(Some("A")), SCHEME_SET1[0]);
        assert_eq!(palette.color_of_name(Some("C")), SCHEME_SET1[2]);
    }

    #[test]
    fn test_palette_cycles() {
        let names: Vec<String> = (0..11).map(|i| i.to_string()).collect();
        let palette = TypeColorAssignment::new(&names, Color32::GRAY).unwrap();
        assert_eq!(palette.color_of_name(Some("9")), SCHEME_SET1[0]);
        assert_eq!(palette.color_of_name(Some("10")), SCHEME_SET1[1]);
    }

    #[test]
    fn test_rejects_empty_label_sets() {
        assert!(matches!(
            TypeColorAssignment::new(&[], Color32::GRAY),
            Err(CanvasError::InvalidLabels(_))
        ));
        assert!(matches!(
            TypeColorAssignment::new(&labels(&["A", " "]), Color32::GRAY),
            Err(CanvasError::InvalidLabels(_))
        ));
    }
}

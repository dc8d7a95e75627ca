//! Points on the canvas and the store that holds them.

use std::fmt;

use canvas_helpers::{L2Dist, Sample};
use ecolor::Color32;
use k_nn::{Classification, ClassificationParameters, KnnClassifier, KnnError};
use ndarray::{ArrayView1, aview1};

/// Class identifier of a point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Class(String),
    Unclassified,
}

impl Label {
    pub fn class(&self) -> Option<&str> {
        match self {
            Label::Class(name) => Some(name),
            Label::Unclassified => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, Label::Class(_))
    }
}

impl From<Option<String>> for Label {
    fn from(value: Option<String>) -> Self {
        value.map_or(Label::Unclassified, Label::Class)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Class(name) => f.write_str(name),
            Label::Unclassified => f.write_str("None"),
        }
    }
}

/// Marks everything drawn for one click so it can be removed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactTag(pub u64);

/// A circle on the canvas, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub position: [f64; 2],
    pub radius: f64,
    pub fill: Color32,
    pub stroke: Color32,
    pub label: Label,
    /// Distance to the most recent query this point was a neighbor of.
    /// Only meaningful right after that query.
    pub distance: Option<f64>,
    /// Set on transient artifacts (bounding circles); `None` on data points.
    pub transient: Option<ArtifactTag>,
}

impl Point {
    pub fn new(position: [f64; 2], radius: f64, fill: Color32, stroke: Color32) -> Self {
        Self {
            position,
            radius,
            fill,
            stroke,
            label: Label::Unclassified,
            distance: None,
            transient: None,
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    pub fn transient(mut self, tag: ArtifactTag) -> Self {
        self.transient = Some(tag);
        self
    }

    pub fn x(&self) -> f64 {
        self.position[0]
    }

    pub fn y(&self) -> f64 {
        self.position[1]
    }

    pub fn is_transient(&self) -> bool {
        self.transient.is_some()
    }
}

impl Sample<f64> for Point {
    type Label = String;

    fn features(&self) -> ArrayView1<'_, f64> {
        aview1(&self.position)
    }

    fn label(&self) -> Option<&String> {
        if self.is_transient() {
            return None;
        }
        match &self.label {
            Label::Class(name) => Some(name),
            Label::Unclassified => None,
        }
    }
}

/// Ordered collection of canvas points.
///
/// Data points are only ever appended. [`PointStore::remove`] can drop
/// transient artifacts and nothing else.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point and returns its index.
    pub fn append(&mut self, point: Point) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// All points in insertion order.
    pub fn all(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of classified data points.
    pub fn labeled_len(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.transient.is_none() && p.label.is_classified())
            .count()
    }

    /// Removes the transient artifacts matching `predicate` and returns how
    /// many were removed. Data points are never passed to `predicate`.
    pub fn remove<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&Point) -> bool,
    {
        let before = self.points.len();
        self.points.retain(|p| !p.is_transient() || !predicate(p));
        before - self.points.len()
    }

    /// Sets the fill of the point at `index`. Returns `false` if there is none.
    pub fn recolor(&mut self, index: usize, fill: Color32) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.fill = fill;
                true
            }
            None => false,
        }
    }

    /// Classifies `query` against the stored points and records the distance
    /// of each returned neighbor on that neighbor. Every other point's
    /// `distance` is cleared.
    pub fn classify(
        &mut self,
        classifier: &KnnClassifier<L2Dist>,
        query: [f64; 2],
        skip: Option<usize>,
        params: &ClassificationParameters,
    ) -> Result<Classification<String, f64>, KnnError> {
        let result = classifier.classify(aview1(&query), &self.points, skip, params)?;
        for point in &mut self.points {
            point.distance = None;
        }
        for neighbor in &result.neighbors {
            self.points[neighbor.index].distance = Some(neighbor.distance);
        }
        Ok(result)
    }
}

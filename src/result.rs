use geo::{Coord, LineString, Polygon};

use crate::util::mean;

/// A single recognized token as produced by an OCR engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Corner points, conventionally top-left, top-right, bottom-right, bottom-left.
    pub points: Vec<Coord<f32>>,
    pub text: String,
    pub confidence: Option<f32>,
}

impl Detection {
    pub fn new(
        points: impl IntoIterator<Item = impl Into<Coord<f32>>>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
            text: text.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Builds a detection from a text box polygon. The ring's closing point is dropped, so a
    /// four-corner polygon yields a four-point box starting at the polygon's first vertex.
    pub fn from_polygon(polygon: &Polygon<f32>, text: impl Into<String>) -> Self {
        let exterior = polygon.exterior();
        let mut points = exterior.0.clone();
        if exterior.is_closed() && points.len() > 1 {
            points.pop();
        }
        Self {
            points,
            text: text.into(),
            confidence: None,
        }
    }

    pub fn polygon(&self) -> Polygon<f32> {
        Polygon::new(LineString::new(self.points.clone()), vec![])
    }

    /// The top-left corner. `None` only for a box without points, which validation rejects.
    pub fn anchor(&self) -> Option<Coord<f32>> {
        self.points.first().copied()
    }
}

/// One reconstructed row of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine<'a> {
    /// Anchor y of the detection that opened the line.
    pub representative_y: f32,
    /// Sorted left to right.
    pub members: Vec<&'a Detection>,
    pub(crate) separator: &'a str,
}

impl TextLine<'_> {
    pub fn text(&self) -> String {
        self.members
            .iter()
            .map(|it| it.text.as_str())
            .collect::<Vec<_>>()
            .join(self.separator)
    }

    /// Mean confidence over the members that carry one.
    pub fn confidence(&self) -> Option<f32> {
        mean(self.members.iter().filter_map(|it| it.confidence))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

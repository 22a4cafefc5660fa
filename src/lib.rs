//! Rebuilds reading-order text lines from unordered OCR detections.
//!
//! Detections are clustered into rows by the y coordinate of their top-left corner, rows are
//! emitted top to bottom and the tokens of each row are joined left to right.
//!
//! ```
//! use ocrlines::{reconstruct, Detection};
//!
//! let detections = vec![
//!     Detection::new([(50.0, 0.0), (90.0, 0.0), (90.0, 12.0), (50.0, 12.0)], "Hello"),
//!     Detection::new([(0.0, 1.0), (40.0, 1.0), (40.0, 13.0), (0.0, 13.0)], "World"),
//! ];
//! assert_eq!(reconstruct(&detections, 10.0).unwrap(), vec!["World Hello"]);
//! ```

mod error;
mod grouping;
pub mod records;
mod result;
mod util;

pub use error::*;
pub use result::*;
use tracing::instrument;

pub const DEFAULT_THRESHOLD: f32 = 10.0;
pub const DEFAULT_SEPARATOR: &str = " ";

/// Reconstructs lines with the default separator.
///
/// Fails if `threshold` is negative or not finite, or if any detection is malformed.
pub fn reconstruct(detections: &[Detection], threshold: f32) -> Result<Vec<String>> {
    LineReconstructorBuilder::new()
        .threshold(threshold)
        .build()?
        .reconstruct(detections)
}

pub struct LineReconstructorBuilder {
    threshold: f32,
    separator: String,
}

impl LineReconstructorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum vertical distance from a row's first detection for another detection to join it.
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[instrument(skip(self), fields(threshold = self.threshold), level = "debug")]
    pub fn build(self) -> Result<LineReconstructor> {
        Ok(LineReconstructor {
            options: ReconstructOptions {
                threshold: util::validate_threshold(self.threshold)?,
                separator: self.separator,
            },
        })
    }
}

impl Default for LineReconstructorBuilder {
    fn default() -> Self {
        let ReconstructOptions {
            threshold,
            separator,
        } = ReconstructOptions::default();
        Self {
            threshold,
            separator,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructOptions {
    pub threshold: f32,
    pub separator: String,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineReconstructor {
    options: ReconstructOptions,
}

impl LineReconstructor {
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Groups detections into lines, top to bottom, each sorted left to right.
    #[instrument(skip(self, detections), fields(count = detections.len(), threshold = self.options.threshold))]
    pub fn lines<'a>(&'a self, detections: &'a [Detection]) -> Result<Vec<TextLine<'a>>> {
        util::validate(detections)?;
        let lines = grouping::group_rows(detections, self.options.threshold)
            .into_iter()
            .map(|row| TextLine {
                representative_y: row.reference_y,
                members: row.members,
                separator: &self.options.separator,
            })
            .collect::<Vec<_>>();
        log::debug!("Reconstructed {} lines", lines.len());
        Ok(lines)
    }

    pub fn reconstruct(&self, detections: &[Detection]) -> Result<Vec<String>> {
        Ok(self
            .lines(detections)?
            .iter()
            .map(TextLine::text)
            .collect())
    }
}

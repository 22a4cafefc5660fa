//! JSON interchange for detections.
//!
//! Engines in the EasyOCR family emit `(bbox, text, confidence)` triples where `bbox` is four
//! `[x, y]` pairs. Each record may be such a triple, a `(bbox, text)` pair, or an object with
//! `box`, `text` and an optional `confidence`. Shape checks beyond what JSON parsing enforces are
//! left to line reconstruction so errors report the record index.

use std::io::Read;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::Detection;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Record {
    Scored(Vec<[f32; 2]>, String, f32),
    Bare(Vec<[f32; 2]>, String),
    Object {
        #[serde(rename = "box")]
        points: Vec<[f32; 2]>,
        text: String,
        #[serde(default)]
        confidence: Option<f32>,
    },
}

impl From<Record> for Detection {
    fn from(record: Record) -> Self {
        let (points, text, confidence) = match record {
            Record::Scored(points, text, confidence) => (points, text, Some(confidence)),
            Record::Bare(points, text) => (points, text, None),
            Record::Object {
                points,
                text,
                confidence,
            } => (points, text, confidence),
        };
        Detection {
            points: points.into_iter().map(Coord::from).collect(),
            text,
            confidence,
        }
    }
}

pub fn from_str(json: &str) -> serde_json::Result<Vec<Detection>> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(Detection::from).collect())
}

pub fn from_reader(reader: impl Read) -> serde_json::Result<Vec<Detection>> {
    let records: Vec<Record> = serde_json::from_reader(reader)?;
    Ok(records.into_iter().map(Detection::from).collect())
}

/// Response body handed to presentation layers: the lines, or a message when nothing was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LinesResponse {
    Lines { lines: Vec<String> },
    Empty { message: &'static str },
}

pub const NO_TEXT_MESSAGE: &str = "No text extracted.";

impl From<Vec<String>> for LinesResponse {
    fn from(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            LinesResponse::Empty {
                message: NO_TEXT_MESSAGE,
            }
        } else {
            LinesResponse::Lines { lines }
        }
    }
}

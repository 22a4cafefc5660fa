use float_ord::FloatOrd;
use geo::Coord;
use tracing::instrument;

use crate::{Detection, LayoutError, MalformedReason, Result};

pub(crate) const MIN_BOX_POINTS: usize = 4;

/// Checks every detection up front so a bad record never produces partial output.
#[instrument(level = "debug", skip(detections), fields(count = detections.len()))]
pub(crate) fn validate(detections: &[Detection]) -> Result<()> {
    detections
        .iter()
        .enumerate()
        .try_for_each(|(index, detection)| {
            check_detection(detection)
                .map_err(|reason| LayoutError::MalformedDetection { index, reason })
        })
}

fn check_detection(detection: &Detection) -> std::result::Result<(), MalformedReason> {
    if detection.points.len() < MIN_BOX_POINTS {
        return Err(MalformedReason::TooFewPoints(detection.points.len()));
    }
    if detection.text.is_empty() {
        return Err(MalformedReason::EmptyText);
    }
    if !detection
        .points
        .iter()
        .all(|Coord { x, y }| x.is_finite() && y.is_finite())
    {
        return Err(MalformedReason::NonFiniteCoordinate);
    }
    Ok(())
}

pub(crate) fn validate_threshold(threshold: f32) -> Result<f32> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(LayoutError::InvalidThreshold(threshold))
    }
}

// Callers validate first, so every detection has an anchor.
pub(crate) fn anchor_x(detection: &Detection) -> f32 {
    detection.anchor().map_or(0.0, |it| it.x)
}

pub(crate) fn anchor_y(detection: &Detection) -> f32 {
    detection.anchor().map_or(0.0, |it| it.y)
}

// `FloatOrd` orders -0.0 before 0.0; adding 0.0 folds both into +0.0 so they tie.
fn sort_key(value: f32) -> FloatOrd<f32> {
    FloatOrd(value + 0.0)
}

/// Stable sort of borrowed detections by top edge.
pub(crate) fn sort_by_anchor_y(detections: &mut [&Detection]) {
    detections.sort_by_key(|it| sort_key(anchor_y(it)));
}

/// Stable sort of borrowed detections by left edge.
pub(crate) fn sort_by_anchor_x(detections: &mut [&Detection]) {
    detections.sort_by_key(|it| sort_key(anchor_x(it)));
}

pub(crate) fn mean(values: impl Iterator<Item = f32>) -> Option<f32> {
    let (sum, count) = values.fold((0.0f32, 0usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    (count > 0).then(|| sum / count as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(x: f32, y: f32) -> Vec<(f32, f32)> {
        vec![(x, y), (x + 10.0, y), (x + 10.0, y + 5.0), (x, y + 5.0)]
    }

    #[test]
    fn rejects_short_boxes() {
        let detections = vec![
            Detection::new(quad(0.0, 0.0), "ok"),
            Detection::new([(0.0, 0.0), (1.0, 0.0)], "short"),
        ];
        assert_eq!(
            validate(&detections),
            Err(LayoutError::MalformedDetection {
                index: 1,
                reason: MalformedReason::TooFewPoints(2)
            })
        );
    }

    #[test]
    fn rejects_empty_text_and_nan() {
        assert_eq!(
            check_detection(&Detection::new(quad(0.0, 0.0), "")),
            Err(MalformedReason::EmptyText)
        );
        assert_eq!(
            check_detection(&Detection::new(quad(f32::NAN, 0.0), "nan")),
            Err(MalformedReason::NonFiniteCoordinate)
        );
    }

    #[test]
    fn threshold_bounds() {
        assert_eq!(validate_threshold(0.0), Ok(0.0));
        assert_eq!(validate_threshold(10.0), Ok(10.0));
        assert!(validate_threshold(-1.0).is_err());
        assert!(validate_threshold(f32::INFINITY).is_err());
        assert!(validate_threshold(f32::NAN).is_err());
    }

    #[test]
    fn sorts_are_stable() {
        let a = Detection::new(quad(5.0, 3.0), "a");
        let b = Detection::new(quad(5.0, 3.0), "b");
        let c = Detection::new(quad(1.0, 1.0), "c");
        let mut refs = vec![&a, &b, &c];
        sort_by_anchor_y(&mut refs);
        let texts = refs.iter().map(|it| it.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, ["c", "a", "b"]);

        sort_by_anchor_x(&mut refs);
        let texts = refs.iter().map(|it| it.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, ["c", "a", "b"]);
    }

    #[test]
    fn signed_zeros_tie() {
        let x = Detection::new(quad(0.0, 0.0), "x");
        let y = Detection::new(quad(-0.0, -0.0), "y");
        let mut refs = vec![&x, &y];
        sort_by_anchor_x(&mut refs);
        assert_eq!(refs[0].text, "x");
        sort_by_anchor_y(&mut refs);
        assert_eq!(refs[0].text, "x");
    }

    #[test]
    fn mean_of_nothing() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([0.5, 1.0].into_iter()), Some(0.75));
    }
}

use tracing::instrument;

use crate::{
    util::{anchor_y, sort_by_anchor_x, sort_by_anchor_y},
    Detection,
};

/// Detections sharing one text row, before rendering.
#[derive(Debug)]
pub(crate) struct Row<'a> {
    pub reference_y: f32,
    pub members: Vec<&'a Detection>,
}

/// Splits detections into rows top to bottom.
///
/// Each row keeps the anchor y of the detection that opened it as its reference for the whole
/// scan, so a slowly drifting baseline eventually opens a new row even when every neighbouring
/// pair is within `threshold`.
#[instrument(level = "debug", skip(detections), fields(count = detections.len()))]
pub(crate) fn group_rows(detections: &[Detection], threshold: f32) -> Vec<Row<'_>> {
    let mut sorted = detections.iter().collect::<Vec<_>>();
    sort_by_anchor_y(&mut sorted);

    let mut rows = Vec::new();
    let mut sorted = sorted.into_iter();
    let Some(first) = sorted.next() else {
        return rows;
    };

    let mut current = Row {
        reference_y: anchor_y(first),
        members: vec![first],
    };
    for detection in sorted {
        let y = anchor_y(detection);
        if (y - current.reference_y).abs() > threshold {
            log::trace!(
                "{:?} at y={y} is more than {threshold} from row at y={}, starting new row",
                detection.text,
                current.reference_y
            );
            rows.push(finish_row(current));
            current = Row {
                reference_y: y,
                members: vec![detection],
            };
        } else {
            current.members.push(detection);
        }
    }
    rows.push(finish_row(current));

    log::debug!("Grouped {} detections into {} rows", detections.len(), rows.len());
    rows
}

fn finish_row(mut row: Row<'_>) -> Row<'_> {
    sort_by_anchor_x(&mut row.members);
    row
}

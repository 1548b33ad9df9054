use crate::level::error::ConvertError;
use crate::level::types::{Circle, Marker, MarkerKind, Point};
use tracing::warn;

/// Split circles into the start position and the remaining markers.
///
/// A level without a start circle is allowed; the start record is simply
/// left out. More than one start circle is an error.
pub fn classify(circles: &[Circle]) -> Result<(Option<Point>, Vec<Marker>), ConvertError> {
    let mut starts = Vec::new();
    let mut markers = Vec::new();

    for circle in circles {
        let position = Point::new(circle.cx, circle.cy);
        match MarkerKind::from_label(&circle.label) {
            MarkerKind::Start => starts.push(position),
            kind => markers.push(Marker { kind, position }),
        }
    }

    match starts.as_slice() {
        [] => {
            warn!("No circle labelled 'start'; level has no start position");
            Ok((None, markers))
        }
        [start] => Ok((Some(*start), markers)),
        _ => Err(ConvertError::DuplicateStart(starts.len())),
    }
}

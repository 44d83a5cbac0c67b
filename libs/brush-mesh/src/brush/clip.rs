//! Successive clipping of a seed square against every other side.

use config::constants::GeometryConfig;

use super::Brush;
use crate::geometry::Winding;
use crate::trace::{TraceEvent, TraceSink};

/// Clips the base winding of `side` by every non-parallel side of the brush
/// and snaps the result.
///
/// Returns an empty winding once a clip removes everything.
pub(super) fn clip_face(
    brush: &Brush,
    side: usize,
    config: &GeometryConfig,
    trace: &mut dyn TraceSink,
) -> Winding {
    let plane = brush.sides[side].plane;
    let mut winding = plane.base_winding(config.base_winding_size);

    if trace.enabled() {
        trace.record(TraceEvent::Winding {
            side,
            clip_side: None,
            clip_plane: None,
            points: winding.points().to_vec(),
        });
    }

    for (other, clipper) in brush.sides.iter().enumerate() {
        if plane.is_parallel_to(&clipper.plane, config.epsilon) {
            continue;
        }

        let clipped = winding.clip_owned(&clipper.plane, config.epsilon);

        if trace.enabled() {
            trace.record(TraceEvent::Winding {
                side,
                clip_side: Some(other),
                clip_plane: Some(clipper.plane),
                points: clipped
                    .as_ref()
                    .map(|w| w.points().to_vec())
                    .unwrap_or_default(),
            });
        }

        match clipped {
            Some(next) => winding = next,
            None => return Winding::default(),
        }
    }

    winding.snapped(config.snap_resolution)
}

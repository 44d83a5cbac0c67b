//! # Reconstruction Trace
//!
//! Optional step records for step-through visualization of a map build.
//!
//! Geometry code writes to a [`TraceSink`] it is handed; it never depends on
//! what the sink does with the records, and a disabled sink makes the build
//! skip assembling them altogether.

use glam::DVec3;

use crate::geometry::Plane;

/// One step of the reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A solid is about to be emitted.
    ///
    /// The counters hold the number of triangles emitted before this solid.
    SolidStart {
        solid_id: i64,
        face_triangles: usize,
        displacement_triangles: usize,
        centroid: Option<DVec3>,
    },
    /// Snapshot of a face winding, either the seed square (`clip_side` is
    /// `None`) or the result of clipping it against another side.
    ///
    /// An empty point list means the face was clipped away.
    Winding {
        side: usize,
        clip_side: Option<usize>,
        clip_plane: Option<Plane>,
        points: Vec<DVec3>,
    },
    /// Triple-intersection candidates gathered so far for a face.
    Candidates {
        side: usize,
        plane: Plane,
        accepted: Vec<DVec3>,
        rejected: Vec<DVec3>,
    },
    /// Triangles appended to the face or displacement buffer.
    TrianglesAdded { count: usize, displacement: bool },
    /// A displacement face has been fully tessellated.
    DisplacementDone,
}

/// Receiver of trace records.
pub trait TraceSink {
    /// Returns false when records would be discarded anyway.
    fn enabled(&self) -> bool {
        true
    }

    /// Consumes one record.
    fn record(&mut self, event: TraceEvent);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&mut self, _event: TraceEvent) {}
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Per-solid record buffer, replayed into the caller's sink once the solid
/// is merged into the map.
#[derive(Debug, Default)]
pub(crate) struct SolidTrace {
    enabled: bool,
    events: Vec<TraceEvent>,
}

impl SolidTrace {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            events: Vec::new(),
        }
    }

    pub(crate) fn replay(self, sink: &mut dyn TraceSink) {
        for event in self.events {
            sink.record(event);
        }
    }
}

impl TraceSink for SolidTrace {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn record(&mut self, event: TraceEvent) {
        if self.enabled {
            self.events.push(event);
        }
    }
}

//! Virtual timeline: merged tag coverage, real/virtual clock mapping, and
//! snap points for jump navigation.

mod mapping;
mod merger;
mod snap;

use serde::Serialize;

use crate::types::{Tag, ValidSegment};

use merger::SegmentAccumulator;

pub use mapping::{next_segment_after, real_to_virtual, segment_at, virtual_to_real};
pub use snap::{SnapPoints, DEFAULT_SNAP_TOLERANCE};

/// Pure function collapsing tags into disjoint, time-ordered segments.
///
/// Tags with non-finite bounds or `end <= start` are skipped.
pub fn merge_segments(tags: &[Tag]) -> Vec<ValidSegment> {
    let mut intervals: Vec<_> = tags
        .iter()
        .map(Tag::interval)
        .filter(|interval| interval.is_well_formed())
        .collect();
    intervals.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut accumulator = SegmentAccumulator::new();
    for interval in intervals {
        accumulator.handle_interval(interval);
    }
    accumulator.into_segments()
}

/// Total covered length, i.e. the length of the virtual timeline.
pub fn virtual_duration(segments: &[ValidSegment]) -> f64 {
    segments.iter().map(ValidSegment::duration).sum()
}

/// Everything derived from one tag set. Rebuilt whole, never patched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Timeline {
    segments: Vec<ValidSegment>,
    virtual_duration: f64,
    snap_points: SnapPoints,
}

impl Timeline {
    pub fn build(tags: &[Tag]) -> Self {
        let segments = merge_segments(tags);
        let virtual_duration = virtual_duration(&segments);
        let snap_points = SnapPoints::build(&segments, tags, virtual_duration);
        Self {
            segments,
            virtual_duration,
            snap_points,
        }
    }

    pub fn segments(&self) -> &[ValidSegment] {
        &self.segments
    }

    pub fn virtual_duration(&self) -> f64 {
        self.virtual_duration
    }

    pub fn snap_points(&self) -> &SnapPoints {
        &self.snap_points
    }

    pub fn real_to_virtual(&self, real: f64) -> f64 {
        real_to_virtual(real, &self.segments)
    }

    pub fn virtual_to_real(&self, virtual_time: f64) -> f64 {
        virtual_to_real(virtual_time, &self.segments)
    }

    pub fn segment_at(&self, real: f64) -> Option<&ValidSegment> {
        segment_at(real, &self.segments)
    }

    pub fn next_segment_after(&self, real: f64) -> Option<&ValidSegment> {
        next_segment_after(real, &self.segments)
    }
}

use serde::Serialize;

use crate::types::{Tag, ValidSegment};

use super::mapping::real_to_virtual;

/// Default distance a cursor must clear before a snap point counts as "next".
pub const DEFAULT_SNAP_TOLERANCE: f64 = 0.1;

/// Sorted, deduplicated virtual-time positions eligible for jump navigation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SnapPoints {
    points: Vec<f64>,
}

impl SnapPoints {
    pub fn build(segments: &[ValidSegment], tags: &[Tag], virtual_duration: f64) -> Self {
        let mut points = Vec::with_capacity(2 + segments.len() * 2 + tags.len() * 2);
        points.push(0.0);
        points.push(virtual_duration);
        for segment in segments {
            points.push(segment.virtual_start);
            points.push(segment.virtual_end());
        }
        for tag in tags {
            points.push(real_to_virtual(tag.start, segments));
            points.push(real_to_virtual(tag.end, segments));
        }
        points.retain(|point| point.is_finite());
        points.sort_by(f64::total_cmp);
        points.dedup();
        Self { points }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest point strictly greater than `position + tolerance`.
    pub fn next_after(&self, position: f64, tolerance: f64) -> Option<f64> {
        let threshold = position + tolerance;
        if threshold.is_nan() {
            return None;
        }
        let idx = self.points.partition_point(|&point| point <= threshold);
        self.points.get(idx).copied()
    }

    /// Largest point strictly less than `position - tolerance`.
    pub fn previous_before(&self, position: f64, tolerance: f64) -> Option<f64> {
        let threshold = position - tolerance;
        let idx = self.points.partition_point(|&point| point < threshold);
        idx.checked_sub(1).map(|prev| self.points[prev])
    }
}

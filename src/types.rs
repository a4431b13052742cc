//! Core types for the tagged-video timeline

use serde::{Deserialize, Serialize};

/// A labeled real-time range `[start, end)` marking a region of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub color: String,
    pub start: f64, // seconds
    pub end: f64,   // seconds
}

impl Tag {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
        start: f64,
        end: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: color.into(),
            start,
            end,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Generic `(start, end)` pair used for merging and overlap tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// Half-open overlap: intervals that only touch at an endpoint do not overlap.
    pub fn overlaps(self, other: Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Finite bounds with positive width.
    pub fn is_well_formed(self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start < self.end
    }
}

/// A maximal run of real time covered by one or more tags, placed on the
/// virtual timeline at `virtual_start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidSegment {
    pub real_start: f64,
    pub real_end: f64,
    pub virtual_start: f64,
}

impl ValidSegment {
    pub fn duration(&self) -> f64 {
        self.real_end - self.real_start
    }

    pub fn virtual_end(&self) -> f64 {
        self.virtual_start + self.duration()
    }

    /// Closed containment on the real clock, both boundaries included.
    pub fn contains_real(&self, real: f64) -> bool {
        real >= self.real_start && real <= self.real_end
    }

    pub fn contains_virtual(&self, virtual_time: f64) -> bool {
        virtual_time >= self.virtual_start && virtual_time <= self.virtual_end()
    }
}

/// A visual lane holding mutually non-overlapping tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub index: usize,
    pub tags: Vec<Tag>,
}

impl Track {
    pub fn new(index: usize, first: Tag) -> Self {
        Self {
            index,
            tags: vec![first],
        }
    }

    /// True when `tag` overlaps nothing already on this lane.
    pub fn accepts(&self, tag: &Tag) -> bool {
        !self
            .tags
            .iter()
            .any(|existing| existing.interval().overlaps(tag.interval()))
    }
}

/// A real-time range `[start, end)` that must never play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    pub start: f64,
    pub end: f64,
}

impl Cut {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::{Interval, Tag, Track, ValidSegment};

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = Interval::new(0.0, 10.0);
        assert!(!a.overlaps(Interval::new(10.0, 20.0)));
        assert!(a.overlaps(Interval::new(5.0, 20.0)));
        assert!(a.overlaps(Interval::new(2.0, 3.0)));
    }

    #[test]
    fn segment_contains_both_boundaries() {
        let segment = ValidSegment {
            real_start: 60.0,
            real_end: 140.0,
            virtual_start: 25.0,
        };
        assert!(segment.contains_real(60.0));
        assert!(segment.contains_real(140.0));
        assert!(!segment.contains_real(140.5));
        assert_eq!(segment.virtual_end(), 105.0);
        assert!(segment.contains_virtual(105.0));
    }

    #[test]
    fn track_rejects_overlapping_tag() {
        let track = Track::new(0, Tag::new("a", "A", "#fff", 0.0, 10.0));
        assert!(!track.accepts(&Tag::new("b", "B", "#fff", 5.0, 20.0)));
        assert!(track.accepts(&Tag::new("c", "C", "#fff", 10.0, 20.0)));
    }

    #[test]
    fn malformed_interval_detected() {
        assert!(!Interval::new(5.0, 5.0).is_well_formed());
        assert!(!Interval::new(f64::NAN, 5.0).is_well_formed());
        assert!(Interval::new(-1.0, 5.0).is_well_formed());
    }
}

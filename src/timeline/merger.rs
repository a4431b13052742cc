use crate::types::{Interval, ValidSegment};

pub(super) struct SegmentAccumulator {
    merged: Vec<Interval>,
    current: Option<Interval>,
}

impl SegmentAccumulator {
    pub(super) fn new() -> Self {
        Self {
            merged: Vec::new(),
            current: None,
        }
    }

    /// Expects intervals in ascending start order.
    pub(super) fn handle_interval(&mut self, interval: Interval) {
        if let Some(current) = self.current.as_mut() {
            // Adjacent counts as overlapping: `<=`, not `<`.
            if interval.start <= current.end {
                current.end = current.end.max(interval.end);
                return;
            }
        }
        self.finish_current();
        self.current = Some(interval);
    }

    pub(super) fn finish_current(&mut self) {
        if let Some(current) = self.current.take() {
            self.merged.push(current);
        }
    }

    pub(super) fn into_segments(mut self) -> Vec<ValidSegment> {
        self.finish_current();
        let mut cumulative = 0.0;
        self.merged
            .into_iter()
            .map(|interval| {
                let segment = ValidSegment {
                    real_start: interval.start,
                    real_end: interval.end,
                    virtual_start: cumulative,
                };
                cumulative += interval.duration();
                segment
            })
            .collect()
    }
}

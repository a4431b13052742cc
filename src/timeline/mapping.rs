use crate::types::ValidSegment;

/// Maps a media position onto the virtual timeline.
///
/// Positions inside a gap collapse to the virtual end of the nearest preceding
/// segment, or `0.0` when nothing precedes them.
pub fn real_to_virtual(real: f64, segments: &[ValidSegment]) -> f64 {
    // First segment that has not ended before `real`.
    let idx = segments.partition_point(|segment| segment.real_end < real);
    if let Some(segment) = segments.get(idx) {
        if real >= segment.real_start {
            return segment.virtual_start + (real - segment.real_start);
        }
    }
    idx.checked_sub(1)
        .and_then(|prev| segments.get(prev))
        .map(ValidSegment::virtual_end)
        .unwrap_or(0.0)
}

/// Maps a virtual position back onto the media clock.
///
/// A virtual boundary shared by two segments resolves to the earlier one.
/// Values outside the virtual range are a caller error and yield `0.0`.
pub fn virtual_to_real(virtual_time: f64, segments: &[ValidSegment]) -> f64 {
    let idx = segments.partition_point(|segment| segment.virtual_end() < virtual_time);
    match segments.get(idx) {
        Some(segment) if segment.contains_virtual(virtual_time) => {
            segment.real_start + (virtual_time - segment.virtual_start)
        }
        _ => 0.0,
    }
}

/// Segment containing `real`, if any.
pub fn segment_at(real: f64, segments: &[ValidSegment]) -> Option<&ValidSegment> {
    let idx = segments.partition_point(|segment| segment.real_end < real);
    segments
        .get(idx)
        .filter(|segment| segment.contains_real(real))
}

/// First segment starting strictly after `real`.
pub fn next_segment_after(real: f64, segments: &[ValidSegment]) -> Option<&ValidSegment> {
    let idx = segments.partition_point(|segment| segment.real_start <= real);
    segments.get(idx)
}

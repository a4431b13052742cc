//! Lane layout for tags that overlap in real time.

use crate::types::{Tag, Track};

/// Half-open overlap test between two tags.
pub fn overlaps(a: &Tag, b: &Tag) -> bool {
    a.interval().overlaps(b.interval())
}

/// Greedy first-fit lane assignment.
///
/// Tags are visited in ascending start order (stable, so equal starts keep
/// their input order) and each lands on the lowest-indexed track it does not
/// collide with. Every tag is placed exactly once, including malformed ones.
pub fn allocate_tracks(tags: &[Tag]) -> Vec<Track> {
    let mut sorted: Vec<&Tag> = tags.iter().collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut tracks: Vec<Track> = Vec::new();
    for tag in sorted {
        match tracks.iter_mut().find(|track| track.accepts(tag)) {
            Some(track) => track.tags.push(tag.clone()),
            None => {
                let index = tracks.len();
                tracks.push(Track::new(index, tag.clone()));
            }
        }
    }
    tracks
}

/// Track holding the tag with `id`.
pub fn track_of<'a>(tracks: &'a [Track], id: &str) -> Option<&'a Track> {
    tracks
        .iter()
        .find(|track| track.tags.iter().any(|tag| tag.id == id))
}

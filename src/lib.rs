//! Virtual timelines for tagged video.
//!
//! Tags mark regions of interest on a single video. The [`timeline`] module
//! merges them into a gap-free virtual clock with real/virtual mapping and
//! snap points, [`tracks`] lays overlapping tags out on parallel lanes, and
//! [`playback`] drives an external media primitive so untagged gaps are
//! skipped during playback.

pub mod cli;
pub mod config;
pub mod playback;
pub mod sanitize;
pub mod time;
pub mod timeline;
pub mod tracks;
pub mod types;

pub use types::{Cut, Interval, Tag, Track, ValidSegment};

//! Playback coordination against an external media primitive.
//!
//! The coordinator is the only piece that talks to the media clock. It reads
//! real positions, maps them through the [`Timeline`](crate::timeline::Timeline),
//! skips untagged gaps, and publishes virtual progress in [`PlaybackState`].

pub mod coordinator;
pub mod keys;
pub mod simulated;

use std::sync::mpsc::Sender;

use serde::Serialize;
use thiserror::Error;

pub use coordinator::{PlaybackCoordinator, PositionOutcome};
pub use keys::{Key, KeyAction};
pub use simulated::SimulatedMedia;

/// Rates offered by the playback-rate selector.
pub const PLAYBACK_RATES: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Result type for playback commands.
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    #[error("media refused to play: {0}")]
    PlayRejected(String),

    #[error("media refused fullscreen change: {0}")]
    FullscreenRejected(String),

    #[error("volume must be a finite number, got {0}")]
    InvalidVolume(f64),

    #[error("playback rate must be finite and positive, got {0}")]
    InvalidPlaybackRate(f64),
}

/// Notifications delivered by the media primitive on its own cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    PositionChanged,
    DurationKnown(f64),
    BufferingStarted,
    BufferingEnded,
    PlayStateChanged { playing: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// The decoder/renderer seen from the core: queries, commands, and an event feed.
pub trait MediaPrimitive {
    fn current_time(&self) -> f64;
    /// `None` until the media has reported its length.
    fn duration(&self) -> Option<f64>;
    fn is_paused(&self) -> bool;

    fn seek(&mut self, real: f64);
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f64);
    fn set_playback_rate(&mut self, rate: f64);
    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<()>;

    fn subscribe(&mut self, sink: Sender<MediaEvent>) -> SubscriptionId;
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// Explicit UI-facing playback record owned by the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Position on the virtual timeline.
    pub progress: f64,
    pub real_duration: f64,
    pub virtual_duration: f64,
    pub volume: f64,
    pub playback_rate: f64,
    pub is_fullscreen: bool,
    pub is_buffering: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            progress: 0.0,
            real_duration: 0.0,
            virtual_duration: 0.0,
            volume: 1.0,
            playback_rate: 1.0,
            is_fullscreen: false,
            is_buffering: false,
        }
    }
}

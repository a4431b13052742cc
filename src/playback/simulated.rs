use std::sync::mpsc::Sender;

use super::{MediaEvent, MediaPrimitive, PlaybackError, Result, SubscriptionId};

/// In-process media clock. Time only moves when [`advance`](Self::advance)
/// is called, which makes it usable both for dry runs and as a test double.
#[derive(Debug)]
pub struct SimulatedMedia {
    position: f64,
    duration: f64,
    duration_known: bool,
    paused: bool,
    volume: f64,
    playback_rate: f64,
    fullscreen: bool,
    refuse_play: bool,
    seeks: Vec<f64>,
    subscribers: Vec<(SubscriptionId, Sender<MediaEvent>)>,
    next_subscription: u64,
}

impl SimulatedMedia {
    pub fn new(duration: f64) -> Self {
        Self {
            position: 0.0,
            duration,
            duration_known: true,
            paused: true,
            volume: 1.0,
            playback_rate: 1.0,
            fullscreen: false,
            refuse_play: false,
            seeks: Vec::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Duration stays hidden until [`reveal_duration`](Self::reveal_duration).
    pub fn with_pending_duration(mut self) -> Self {
        self.duration_known = false;
        self
    }

    /// Makes every `play` call fail, like an autoplay policy would.
    pub fn refusing_play(mut self) -> Self {
        self.refuse_play = true;
        self
    }

    pub fn reveal_duration(&mut self) {
        self.duration_known = true;
        self.emit(MediaEvent::DurationKnown(self.duration));
    }

    /// Moves the clock forward by `dt` seconds of wall time, scaled by the
    /// playback rate, then reports the new position.
    pub fn advance(&mut self, dt: f64) {
        if self.paused {
            return;
        }
        self.position = (self.position + dt * self.playback_rate).min(self.duration);
        self.emit(MediaEvent::PositionChanged);
        if self.position >= self.duration {
            self.paused = true;
            self.emit(MediaEvent::PlayStateChanged { playing: false });
        }
    }

    pub fn set_buffering(&mut self, buffering: bool) {
        self.emit(if buffering {
            MediaEvent::BufferingStarted
        } else {
            MediaEvent::BufferingEnded
        });
    }

    /// Every seek target issued so far, oldest first.
    pub fn seeks(&self) -> &[f64] {
        &self.seeks
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn emit(&mut self, event: MediaEvent) {
        self.subscribers.retain(|(_, sink)| sink.send(event).is_ok());
    }
}

impl MediaPrimitive for SimulatedMedia {
    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration_known.then_some(self.duration)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn seek(&mut self, real: f64) {
        self.position = real.clamp(0.0, self.duration);
        self.seeks.push(self.position);
        self.emit(MediaEvent::PositionChanged);
    }

    fn play(&mut self) -> Result<()> {
        if self.refuse_play {
            return Err(PlaybackError::PlayRejected(
                "playback not allowed".to_string(),
            ));
        }
        if self.paused {
            self.paused = false;
            self.emit(MediaEvent::PlayStateChanged { playing: true });
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.emit(MediaEvent::PlayStateChanged { playing: false });
        }
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.playback_rate = rate;
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<()> {
        self.fullscreen = fullscreen;
        Ok(())
    }

    fn subscribe(&mut self, sink: Sender<MediaEvent>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, sink));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(existing, _)| *existing != id);
    }
}

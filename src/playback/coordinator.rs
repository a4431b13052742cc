use std::sync::mpsc::{channel, Receiver};

use tracing::{debug, info, warn};

use crate::sanitize::cut_containing;
use crate::timeline::{Timeline, DEFAULT_SNAP_TOLERANCE};
use crate::types::{Cut, Tag};

use super::keys::{Key, KeyAction};
use super::{
    MediaEvent, MediaPrimitive, PlaybackError, PlaybackState, Result, SubscriptionId,
};

/// What a position notification led to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionOutcome {
    /// Inside a segment; carries the published virtual progress.
    Progress(f64),
    /// Outside tagged content (or inside a cut); carries the real seek target.
    SkippedTo(f64),
    /// Past the last segment; media was paused. Carries the virtual progress.
    ReachedEnd(f64),
}

struct Attachment<M> {
    media: M,
    subscription: SubscriptionId,
    events: Receiver<MediaEvent>,
}

pub struct PlaybackCoordinator<M: MediaPrimitive> {
    tags: Vec<Tag>,
    timeline: Timeline,
    generation: u64,
    cuts: Vec<Cut>,
    snap_tolerance: f64,
    state: PlaybackState,
    attached: Option<Attachment<M>>,
}

impl<M: MediaPrimitive> PlaybackCoordinator<M> {
    pub fn new(tags: Vec<Tag>) -> Self {
        let timeline = Timeline::build(&tags);
        let state = PlaybackState {
            virtual_duration: timeline.virtual_duration(),
            ..PlaybackState::default()
        };
        Self {
            tags,
            timeline,
            generation: 0,
            cuts: Vec::new(),
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            state,
            attached: None,
        }
    }

    pub fn with_cuts(mut self, cuts: Vec<Cut>) -> Self {
        self.cuts = cuts;
        self
    }

    pub fn with_snap_tolerance(mut self, tolerance: f64) -> Self {
        self.snap_tolerance = tolerance;
        self
    }

    /// Subscribes to `media` and mirrors its current state. Any previously
    /// attached media is detached and returned.
    pub fn attach(&mut self, mut media: M) -> Option<M> {
        let previous = self.detach();
        let (sink, events) = channel();
        let subscription = media.subscribe(sink);
        if let Some(duration) = media.duration() {
            self.state.real_duration = duration;
        }
        self.state.is_playing = !media.is_paused();
        info!(
            subscription = subscription.0,
            real_duration = self.state.real_duration,
            "media attached"
        );
        self.attached = Some(Attachment {
            media,
            subscription,
            events,
        });
        previous
    }

    /// Unsubscribes and hands the media back.
    pub fn detach(&mut self) -> Option<M> {
        let Attachment {
            mut media,
            subscription,
            ..
        } = self.attached.take()?;
        media.unsubscribe(subscription);
        info!(subscription = subscription.0, "media detached");
        Some(media)
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    pub fn media(&self) -> Option<&M> {
        self.attached.as_ref().map(|attached| &attached.media)
    }

    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.attached.as_mut().map(|attached| &mut attached.media)
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Bumped each time the tag set is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.timeline = Timeline::build(&tags);
        self.tags = tags;
        self.generation += 1;
        self.state.virtual_duration = self.timeline.virtual_duration();
        if let Some(attached) = self.attached.as_ref() {
            let real = attached.media.current_time();
            if real.is_finite() {
                self.state.progress = self.timeline.real_to_virtual(real);
            }
        }
        debug!(
            generation = self.generation,
            segments = self.timeline.segments().len(),
            virtual_duration = self.state.virtual_duration,
            "timeline rebuilt"
        );
    }

    /// Handles every event queued so far without blocking. Events raised
    /// while handling (e.g. by a seek) wait for the next call.
    pub fn pump(&mut self) -> Vec<PositionOutcome> {
        let pending: Vec<MediaEvent> = match self.attached.as_ref() {
            Some(attached) => attached.events.try_iter().collect(),
            None => return Vec::new(),
        };
        pending
            .into_iter()
            .filter_map(|event| self.handle_event(event))
            .collect()
    }

    pub fn handle_event(&mut self, event: MediaEvent) -> Option<PositionOutcome> {
        match event {
            MediaEvent::PositionChanged => return self.on_position_changed(),
            MediaEvent::DurationKnown(duration) => self.state.real_duration = duration,
            MediaEvent::BufferingStarted => self.state.is_buffering = true,
            MediaEvent::BufferingEnded => self.state.is_buffering = false,
            MediaEvent::PlayStateChanged { playing } => self.state.is_playing = playing,
        }
        None
    }

    fn on_position_changed(&mut self) -> Option<PositionOutcome> {
        let attached = self.attached.as_mut()?;
        let real = attached.media.current_time();
        if !real.is_finite() {
            warn!(real, "media reported a non-finite position; ignored");
            return None;
        }

        if let Some(cut) = cut_containing(real, &self.cuts) {
            let target = cut.end;
            let duration = self.state.real_duration;
            if duration > 0.0 && target >= duration {
                attached.media.pause();
                self.state.is_playing = false;
                self.state.progress = self.timeline.real_to_virtual(real);
                info!(real, target, "cut runs to the end of the media; paused");
                return Some(PositionOutcome::ReachedEnd(self.state.progress));
            }
            debug!(real, target, "position inside cut; skipping");
            attached.media.seek(target);
            return Some(PositionOutcome::SkippedTo(target));
        }

        if self.timeline.segment_at(real).is_none() {
            if let Some(next) = self.timeline.next_segment_after(real) {
                let target = next.real_start;
                debug!(real, target, "position in untagged gap; skipping");
                attached.media.seek(target);
                return Some(PositionOutcome::SkippedTo(target));
            }
            attached.media.pause();
            self.state.is_playing = false;
            self.state.progress = self.timeline.real_to_virtual(real);
            info!(
                real,
                progress = self.state.progress,
                "end of tagged content; paused"
            );
            return Some(PositionOutcome::ReachedEnd(self.state.progress));
        }

        self.state.progress = self.timeline.real_to_virtual(real);
        Some(PositionOutcome::Progress(self.state.progress))
    }

    pub fn toggle_play(&mut self) -> Result<()> {
        let Some(attached) = self.attached.as_mut() else {
            return Ok(());
        };
        let media = &mut attached.media;
        if media.is_paused() {
            if let Err(err) = media.play() {
                warn!(error = %err, "play request rejected");
                self.state.is_playing = !media.is_paused();
                return Err(err);
            }
        } else {
            media.pause();
        }
        self.state.is_playing = !media.is_paused();
        Ok(())
    }

    /// Seeks to a position on the virtual timeline.
    pub fn seek_virtual(&mut self, virtual_time: f64) {
        let Some(attached) = self.attached.as_mut() else {
            return;
        };
        let real = self.timeline.virtual_to_real(virtual_time);
        debug!(virtual_time, real, "seek");
        attached.media.seek(real);
        self.state.progress = virtual_time;
    }

    /// Jumps to the next snap point; returns it, or `None` if nothing moved.
    pub fn next_point(&mut self) -> Option<f64> {
        if !self.is_attached() {
            return None;
        }
        let target = self
            .timeline
            .snap_points()
            .next_after(self.state.progress, self.snap_tolerance)?;
        self.seek_virtual(target);
        Some(target)
    }

    pub fn previous_point(&mut self) -> Option<f64> {
        if !self.is_attached() {
            return None;
        }
        let target = self
            .timeline
            .snap_points()
            .previous_before(self.state.progress, self.snap_tolerance)?;
        self.seek_virtual(target);
        Some(target)
    }

    /// Clamps into `0..=1`.
    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        if !volume.is_finite() {
            return Err(PlaybackError::InvalidVolume(volume));
        }
        let Some(attached) = self.attached.as_mut() else {
            return Ok(());
        };
        let volume = volume.clamp(0.0, 1.0);
        attached.media.set_volume(volume);
        self.state.volume = volume;
        Ok(())
    }

    pub fn set_playback_rate(&mut self, rate: f64) -> Result<()> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(PlaybackError::InvalidPlaybackRate(rate));
        }
        let Some(attached) = self.attached.as_mut() else {
            return Ok(());
        };
        attached.media.set_playback_rate(rate);
        self.state.playback_rate = rate;
        Ok(())
    }

    pub fn toggle_fullscreen(&mut self) -> Result<()> {
        let Some(attached) = self.attached.as_mut() else {
            return Ok(());
        };
        let fullscreen = !self.state.is_fullscreen;
        attached.media.set_fullscreen(fullscreen)?;
        self.state.is_fullscreen = fullscreen;
        Ok(())
    }

    /// Returns `true` when the key belongs to the player.
    pub fn handle_key(&mut self, key: Key) -> Result<bool> {
        let Some(action) = KeyAction::for_key(key) else {
            return Ok(false);
        };
        match action {
            KeyAction::TogglePlay => self.toggle_play()?,
            KeyAction::NextPoint => {
                self.next_point();
            }
            KeyAction::PreviousPoint => {
                self.previous_point();
            }
        }
        Ok(true)
    }
}

impl<M: MediaPrimitive> Drop for PlaybackCoordinator<M> {
    fn drop(&mut self) {
        self.detach();
    }
}

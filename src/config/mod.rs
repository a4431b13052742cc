use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::sanitize::{validate_cuts, validate_tags};
use crate::timeline::DEFAULT_SNAP_TOLERANCE;
use crate::types::{Cut, Tag};

/// Tag set and playback settings for one video, parsed from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub source: Option<String>,
    /// Real media length in seconds, when known up front.
    #[serde(default, alias = "realDuration")]
    pub duration: Option<f64>,
    #[serde(default = "default_snap_tolerance", alias = "snapTolerance")]
    pub snap_tolerance: f64,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub cuts: Vec<Cut>,
}

fn default_snap_tolerance() -> f64 {
    DEFAULT_SNAP_TOLERANCE
}

impl PlayerProfile {
    pub fn from_json(raw: &str) -> Result<Self> {
        let profile: PlayerProfile =
            serde_json::from_str(raw).context("Failed to parse profile JSON")?;
        Ok(profile)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile file {:?}", path))?;
        Self::from_json(&data).with_context(|| format!("Invalid profile in {:?}", path))
    }

    /// File wins over inline JSON; with neither, the demo profile is used.
    pub fn from_sources(path: Option<&Path>, json: Option<&str>) -> Result<Self> {
        let profile = match (path, json) {
            (Some(p), _) => Self::from_file(p)?,
            (None, Some(raw)) => Self::from_json(raw)?,
            (None, None) => Self::demo(),
        };
        profile.validate().context("Profile validation failed")?;
        info!(
            tags = profile.tags.len(),
            cuts = profile.cuts.len(),
            duration = ?profile.duration,
            "profile loaded"
        );
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(duration) = self.duration {
            ensure!(
                duration.is_finite() && duration > 0.0,
                "Duration must be positive, got: {}",
                duration
            );
        }
        ensure!(
            self.snap_tolerance.is_finite() && self.snap_tolerance >= 0.0,
            "Snap tolerance must be non-negative, got: {}",
            self.snap_tolerance
        );
        validate_tags(&self.tags, self.duration)?;
        validate_cuts(&self.cuts, self.duration)?;
        Ok(())
    }

    /// Sample talk with nine overlapping chapters over a 596 s video.
    pub fn demo() -> Self {
        let tags = [
            ("intro", "Intro", 10.0, 35.0, "#22c55e"),
            ("main-topic", "Main Topic", 60.0, 140.0, "#3b82f6"),
            ("explanation-1", "Explanation Part 1", 120.0, 210.0, "#f59e0b"),
            ("live-demo", "Live Demo", 200.0, 280.0, "#ef4444"),
            ("communication", "Effective Communication", 80.0, 280.0, "#6366f1"),
            ("leadership", "Leadership", 290.0, 350.0, "#0ea5e9"),
            ("bonus", "Bonus", 370.0, 500.0, "#a855f7"),
            ("teamwork", "Teamwork", 380.0, 550.0, "#4d7c0f"),
            ("conclusion", "Conclusion", 520.0, 596.0, "#14b8a6"),
        ]
        .into_iter()
        .map(|(id, label, start, end, color)| Tag::new(id, label, color, start, end))
        .collect();

        Self {
            source: Some(
                "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4"
                    .to_string(),
            ),
            duration: Some(596.0),
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            tags,
            cuts: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerProfile;

    #[test]
    fn demo_profile_is_valid() {
        let profile = PlayerProfile::demo();
        assert_eq!(profile.tags.len(), 9);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn parses_camel_case_fields_and_defaults() {
        let json = r##"{
            "realDuration": 120,
            "snapTolerance": 0.25,
            "tags": [
                {"id": "a", "label": "A", "start": 0, "end": 10, "color": "#fff"},
                {"id": "b", "label": "B", "start": 20, "end": 30}
            ]
        }"##;
        let profile = PlayerProfile::from_json(json).unwrap();
        assert_eq!(profile.duration, Some(120.0));
        assert_eq!(profile.snap_tolerance, 0.25);
        assert_eq!(profile.tags[1].color, "");
        assert!(profile.cuts.is_empty());
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn rejects_tag_past_duration() {
        let json = r#"{"duration": 10, "tags": [{"id": "a", "label": "A", "start": 0, "end": 11}]}"#;
        let profile = PlayerProfile::from_json(json).unwrap();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("past the media duration"));
    }

    #[test]
    fn inline_json_used_when_no_file() {
        let json = r#"{"tags": [{"id": "x", "label": "X", "start": 1, "end": 2}]}"#;
        let profile = PlayerProfile::from_sources(None, Some(json)).unwrap();
        assert_eq!(profile.tags[0].id, "x");
        assert_eq!(profile.snap_tolerance, 0.1);
    }

    #[test]
    fn rejects_cut_past_duration() {
        let json = r#"{
            "duration": 100,
            "tags": [{"id": "all", "label": "All", "start": 0, "end": 100}],
            "cuts": [{"start": 90, "end": 200}]
        }"#;
        let profile = PlayerProfile::from_json(json).unwrap();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("cut 0 ends at 200"));
    }
}

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use crate::time::parse_time_to_seconds;

/// Tagged-video timeline tool
///
/// Collapses tagged ranges of a video into a virtual timeline, lays tags out
/// on parallel tracks, and dry-runs gap-skipping playback.
#[derive(Parser, Debug)]
#[command(name = "tagplayer")]
#[command(version)]
#[command(about = "Virtual timeline and track layout for tagged video", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Path to a JSON profile (tags, duration, cuts)
    #[arg(long, value_name = "PATH", conflicts_with = "profile_json", global = true)]
    pub profile: Option<PathBuf>,

    /// Inline JSON profile
    #[arg(long, value_name = "JSON", global = true)]
    pub profile_json: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show merged segments and virtual duration.
    Segments,
    /// Show the track layout.
    Tracks,
    /// List snap points on the virtual timeline.
    Snap,
    /// Convert a time between the real and virtual clocks.
    Map(MapArgs),
    /// Play the profile against a simulated media clock.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    /// Real media time (seconds or HH:MM:SS.mmm)
    #[arg(long = "real", value_name = "TIME", conflicts_with = "virtual_time")]
    pub real_time: Option<String>,

    /// Virtual timeline time (seconds or HH:MM:SS.mmm)
    #[arg(long = "virtual", value_name = "TIME")]
    pub virtual_time: Option<String>,
}

/// Direction of a single clock conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapRequest {
    RealToVirtual(f64),
    VirtualToReal(f64),
}

impl MapArgs {
    pub fn request(&self) -> Result<MapRequest> {
        match (&self.real_time, &self.virtual_time) {
            (Some(real), None) => Ok(MapRequest::RealToVirtual(parse_time_to_seconds(real)?)),
            (None, Some(virtual_time)) => Ok(MapRequest::VirtualToReal(parse_time_to_seconds(
                virtual_time,
            )?)),
            _ => bail!("provide exactly one of --real or --virtual"),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Real start position (seconds or HH:MM:SS.mmm)
    #[arg(long, value_name = "TIME", default_value = "0")]
    pub from: String,

    /// Simulated seconds between position notifications
    #[arg(long, default_value_t = 0.25)]
    pub tick: f64,

    /// Playback rate applied before starting
    #[arg(long, default_value_t = 1.0)]
    pub rate: f64,
}

impl SimulateArgs {
    pub fn start(&self) -> Result<f64> {
        parse_time_to_seconds(&self.from)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tick.is_finite() && self.tick > 0.0) {
            bail!("Tick must be positive, got: {}", self.tick);
        }
        Ok(())
    }
}

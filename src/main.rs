use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use tagplayer::cli::{Cli, Command, MapRequest, SimulateArgs};
use tagplayer::config::PlayerProfile;
use tagplayer::playback::{MediaPrimitive, PlaybackCoordinator, PositionOutcome, SimulatedMedia};
use tagplayer::time::format_clock;
use tagplayer::timeline::Timeline;
use tagplayer::tracks::allocate_tracks;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let profile = PlayerProfile::from_sources(
        cli.profile.profile.as_deref(),
        cli.profile.profile_json.as_deref(),
    )
    .context("Failed to load player profile")?;

    match &cli.command {
        Command::Segments => print_segments(&profile, cli.json),
        Command::Tracks => print_tracks(&profile, cli.json),
        Command::Snap => print_snap_points(&profile, cli.json),
        Command::Map(args) => print_mapping(&profile, args.request()?, cli.json),
        Command::Simulate(args) => simulate(&profile, args, cli.json),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_segments(profile: &PlayerProfile, as_json: bool) -> Result<()> {
    let timeline = Timeline::build(&profile.tags);
    if as_json {
        let body = json!({
            "segments": timeline.segments(),
            "virtual_duration": timeline.virtual_duration(),
            "real_duration": profile.duration,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Segments: {}", timeline.segments().len());
    for (i, segment) in timeline.segments().iter().enumerate() {
        println!(
            "  [{}] real {:.3}s - {:.3}s -> virtual {:.3}s - {:.3}s",
            i,
            segment.real_start,
            segment.real_end,
            segment.virtual_start,
            segment.virtual_end()
        );
    }
    if let Some(duration) = profile.duration {
        println!("Real duration: {} ({:.3}s)", format_clock(duration), duration);
    }
    println!(
        "Virtual duration: {} ({:.3}s)",
        format_clock(timeline.virtual_duration()),
        timeline.virtual_duration()
    );
    Ok(())
}

fn print_tracks(profile: &PlayerProfile, as_json: bool) -> Result<()> {
    let tracks = allocate_tracks(&profile.tags);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&tracks)?);
        return Ok(());
    }

    println!("Tracks: {}", tracks.len());
    for track in &tracks {
        println!("  Track {}:", track.index);
        for tag in &track.tags {
            println!(
                "    {} \"{}\" {:.3}s - {:.3}s",
                tag.id, tag.label, tag.start, tag.end
            );
        }
    }
    Ok(())
}

fn print_snap_points(profile: &PlayerProfile, as_json: bool) -> Result<()> {
    let timeline = Timeline::build(&profile.tags);
    let points = timeline.snap_points();
    if as_json {
        println!("{}", serde_json::to_string_pretty(points)?);
        return Ok(());
    }

    println!("Snap points: {}", points.len());
    for point in points.as_slice() {
        println!("  {} ({:.3}s)", format_clock(*point), point);
    }
    Ok(())
}

fn print_mapping(profile: &PlayerProfile, request: MapRequest, as_json: bool) -> Result<()> {
    let timeline = Timeline::build(&profile.tags);
    let (real, virtual_time) = match request {
        MapRequest::RealToVirtual(real) => (real, timeline.real_to_virtual(real)),
        MapRequest::VirtualToReal(virtual_time) => {
            (timeline.virtual_to_real(virtual_time), virtual_time)
        }
    };
    if as_json {
        let body = json!({ "real": real, "virtual": virtual_time });
        println!("{}", serde_json::to_string(&body)?);
        return Ok(());
    }

    match request {
        MapRequest::RealToVirtual(_) => {
            println!("real {:.3}s -> virtual {:.3}s", real, virtual_time)
        }
        MapRequest::VirtualToReal(_) => {
            println!("virtual {:.3}s -> real {:.3}s", virtual_time, real)
        }
    }
    Ok(())
}

fn simulate(profile: &PlayerProfile, args: &SimulateArgs, as_json: bool) -> Result<()> {
    args.validate()?;
    let start = args.start()?;
    let timeline = Timeline::build(&profile.tags);
    let duration = profile
        .duration
        .or_else(|| timeline.segments().last().map(|segment| segment.real_end))
        .unwrap_or(0.0);

    let mut coordinator = PlaybackCoordinator::new(profile.tags.clone())
        .with_cuts(profile.cuts.clone())
        .with_snap_tolerance(profile.snap_tolerance);
    coordinator.attach(SimulatedMedia::new(duration));
    coordinator.set_playback_rate(args.rate)?;
    if let Some(media) = coordinator.media_mut() {
        media.seek(start);
    }
    coordinator.toggle_play()?;

    let mut skips = Vec::new();
    let mut ticks = 0usize;
    let max_ticks = (duration / (args.tick * args.rate)).ceil() as usize + 16;
    loop {
        for outcome in coordinator.pump() {
            if let PositionOutcome::SkippedTo(target) = outcome {
                if !as_json {
                    println!("  skip -> {:.3}s", target);
                }
                skips.push(target);
            }
        }
        if !coordinator.state().is_playing || ticks >= max_ticks {
            break;
        }
        if let Some(media) = coordinator.media_mut() {
            media.advance(args.tick);
        }
        ticks += 1;
    }

    let final_real = coordinator
        .media()
        .map(|media| media.current_time())
        .unwrap_or(0.0);
    let state = coordinator.state().clone();
    if as_json {
        let body = json!({
            "skips": skips,
            "ticks": ticks,
            "final_real": final_real,
            "state": state,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!(
        "Stopped after {} ticks at real {:.3}s, virtual {} / {}",
        ticks,
        final_real,
        format_clock(state.progress),
        format_clock(state.virtual_duration)
    );
    Ok(())
}

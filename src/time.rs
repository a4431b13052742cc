//! Clock parsing and display.

use anyhow::{ensure, Context, Result};

/// Parses `12.5`, `MM:SS`, or `HH:MM:SS.mmm` into seconds.
pub fn parse_time_to_seconds(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.contains(':') {
        return parse_hms_time(raw);
    }

    let seconds: f64 = raw
        .parse()
        .with_context(|| format!("Failed to parse seconds value '{}'", raw))?;
    ensure!(seconds.is_finite(), "Time values must be finite");
    ensure!(seconds >= 0.0, "Time values must be non-negative");
    Ok(seconds)
}

fn parse_hms_time(raw: &str) -> Result<f64> {
    let parts: Vec<&str> = raw.split(':').collect();
    ensure!(
        (2..=3).contains(&parts.len()),
        "Time format must be MM:SS or HH:MM:SS"
    );

    let component = |value: &str, label: &str| -> Result<f64> {
        let parsed = value
            .parse::<f64>()
            .with_context(|| format!("Invalid {} component '{}'", label, value))?;
        ensure!(
            parsed.is_finite() && parsed >= 0.0,
            "{} must be non-negative",
            label
        );
        Ok(parsed)
    };

    let seconds = component(parts[parts.len() - 1], "seconds")?;
    let minutes = component(parts[parts.len() - 2], "minutes")?;
    let hours = if parts.len() == 3 {
        component(parts[0], "hours")?
    } else {
        0.0
    };

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// `m:ss`, flooring both fields. Minutes are not wrapped into hours.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

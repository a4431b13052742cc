//! Ingestion policy for tag sets and forced cuts.

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{Cut, Tag};

/// Result type for tag ingestion.
pub type Result<T> = std::result::Result<T, TagError>;

/// Reasons a tag set is rejected before it reaches the timeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TagError {
    #[error("tag '{id}' has a non-finite bound")]
    NonFinite { id: String },

    #[error("tag '{id}' starts before zero ({start})")]
    NegativeStart { id: String, start: f64 },

    #[error("tag '{id}' does not end after it starts ({start} >= {end})")]
    Inverted { id: String, start: f64, end: f64 },

    #[error("tag '{id}' ends at {end}, past the media duration {duration}")]
    PastDuration { id: String, end: f64, duration: f64 },

    #[error("duplicate tag id '{0}'")]
    DuplicateId(String),
}

/// Rejects the first tag that violates the input contract.
///
/// `duration` is the real media length when known; without it the upper
/// bound is not checked.
pub fn validate_tags(tags: &[Tag], duration: Option<f64>) -> Result<()> {
    let mut seen = HashSet::with_capacity(tags.len());
    for tag in tags {
        validate_tag(tag, duration)?;
        if !seen.insert(tag.id.as_str()) {
            return Err(TagError::DuplicateId(tag.id.clone()));
        }
    }
    Ok(())
}

fn validate_tag(tag: &Tag, duration: Option<f64>) -> Result<()> {
    if !tag.start.is_finite() || !tag.end.is_finite() {
        return Err(TagError::NonFinite { id: tag.id.clone() });
    }
    if tag.start < 0.0 {
        return Err(TagError::NegativeStart {
            id: tag.id.clone(),
            start: tag.start,
        });
    }
    if tag.start >= tag.end {
        return Err(TagError::Inverted {
            id: tag.id.clone(),
            start: tag.start,
            end: tag.end,
        });
    }
    if let Some(duration) = duration {
        if tag.end > duration {
            return Err(TagError::PastDuration {
                id: tag.id.clone(),
                end: tag.end,
                duration,
            });
        }
    }
    Ok(())
}

/// Reasons a cut list is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CutError {
    #[error("cut {index} must have finite bounds with start < end")]
    Malformed { index: usize },

    #[error("cut {index} ends at {end}, past the media duration {duration}")]
    PastDuration {
        index: usize,
        end: f64,
        duration: f64,
    },
}

/// Same contract as [`validate_tags`], for cuts identified by position.
pub fn validate_cuts(cuts: &[Cut], duration: Option<f64>) -> std::result::Result<(), CutError> {
    for (index, cut) in cuts.iter().enumerate() {
        if !(cut.start.is_finite() && cut.end.is_finite() && cut.start < cut.end) {
            return Err(CutError::Malformed { index });
        }
        if let Some(duration) = duration {
            if cut.end > duration {
                return Err(CutError::PastDuration {
                    index,
                    end: cut.end,
                    duration,
                });
            }
        }
    }
    Ok(())
}

/// First cut containing `time`. Non-finite times are never inside a cut.
pub fn cut_containing(time: f64, cuts: &[Cut]) -> Option<&Cut> {
    cuts.iter().find(|cut| cut.contains(time))
}

/// Moves `time` to the end of the cut containing it, if any.
pub fn skip_cuts(time: f64, cuts: &[Cut]) -> f64 {
    cut_containing(time, cuts).map_or(time, |cut| cut.end)
}

//! Widget configuration: copy, asset path and placement tuning.
//!
//! Values come from an optional JSON file and are then overridden by
//! command-line flags.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::positioning::prober::{DEFAULT_MAX_ATTEMPTS, DEFAULT_PADDING};
use crate::positioning::{Prober, Rect, Size};

/// Default delay before the first placement
pub const DEFAULT_PLACEMENT_DELAY_MS: u64 = 100;

/// Text, asset and placement settings for the widget
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    pub question: String,
    pub subtitle: String,
    pub hint: String,
    pub yes_label: String,
    pub no_label: String,
    pub answer_title: String,
    pub answer_subtitle: String,
    pub answer_closing: String,
    /// Static image shown by reference on the answered screen
    pub answer_image: String,
    /// Cells kept clear around obstacles and the container edge
    pub padding: f32,
    pub max_attempts: u32,
    /// Cells around the "No" button that count as "approaching"
    pub proximity: u16,
    /// 0 places on the first rendered frame instead of after a delay
    pub placement_delay_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            question: "Will you be my Valentine?".to_string(),
            subtitle: "There's only one right answer...".to_string(),
            hint: "(Hint: The \"No\" button is a bit shy...)".to_string(),
            yes_label: "Yes!".to_string(),
            no_label: "No".to_string(),
            answer_title: "Perfect Choice!".to_string(),
            answer_subtitle: "I knew you'd say yes!".to_string(),
            answer_closing: "Can't wait to celebrate with you!".to_string(),
            answer_image: "/assets/generated/valentine-good-choice-meme.dim_1024x1024.png"
                .to_string(),
            padding: DEFAULT_PADDING,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            proximity: 1,
            placement_delay_ms: DEFAULT_PLACEMENT_DELAY_MS,
        }
    }
}

impl WidgetConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn prober(&self) -> Prober {
        Prober::new(self.padding, self.max_attempts)
    }

    /// `None` means "place as soon as a frame has been laid out"
    pub fn placement_delay(&self) -> Option<Duration> {
        match self.placement_delay_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

/// Parse `WIDTHxHEIGHT`, e.g. `800x600`
pub fn parse_size(value: &str) -> Result<Size> {
    let invalid = || AppError::InvalidArgument {
        what: "size",
        value: value.to_string(),
        expected: "WIDTHxHEIGHT with non-negative numbers",
    };

    let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = parse_extent(width).ok_or_else(invalid)?;
    let height = parse_extent(height).ok_or_else(invalid)?;
    Ok(Size::new(width, height))
}

/// Parse `LEFT,TOP,WIDTH,HEIGHT`, e.g. `350,275,100,50`
pub fn parse_rect(value: &str) -> Result<Rect> {
    let invalid = || AppError::InvalidArgument {
        what: "rect",
        value: value.to_string(),
        expected: "LEFT,TOP,WIDTH,HEIGHT",
    };

    let parts: Vec<f32> = value
        .split(',')
        .map(|part| part.trim().parse::<f32>().ok().filter(|n| n.is_finite()))
        .collect::<Option<_>>()
        .ok_or_else(invalid)?;

    match parts.as_slice() {
        [left, top, width, height] if *width >= 0.0 && *height >= 0.0 => {
            Ok(Rect::new(*left, *top, *width, *height))
        }
        _ => Err(invalid()),
    }
}

fn parse_extent(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
}

//! Color module for the Valentine prompt.
//!
//! This module provides:
//! - The romantic theme in true color and basic 16-color variants
//! - Heartbeat color blending
//! - Color mode detection for different terminal capabilities

use palette::{LinSrgb, Mix, Srgb};
use ratatui::style::Color;

/// Color depth/mode for different terminal capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Full 24-bit RGB color support
    #[default]
    TrueColor,
    /// Basic 16 ANSI colors
    Basic16,
}

impl ColorMode {
    /// Guess from `COLORTERM`; most modern terminals advertise `truecolor`
    pub fn detect() -> Self {
        match std::env::var("COLORTERM") {
            Ok(value) if value.contains("truecolor") || value.contains("24bit") => {
                ColorMode::TrueColor
            }
            _ => ColorMode::Basic16,
        }
    }
}

/// Colors used by every view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    /// Hearts and the "Yes" button
    pub primary: Color,
    /// Heart at the peak of a beat
    pub primary_bright: Color,
    /// Headings
    pub dark: Color,
    /// Body text and the "No" button
    pub medium: Color,
    /// Hints and footer
    pub muted: Color,
    pub on_primary: Color,
    /// Status bar background
    pub bar: Color,
    /// Debug overlay outlines
    pub debug: Color,
}

/// Default theme (TrueColor)
pub const THEME: Theme = Theme {
    background: Color::Rgb(255, 240, 245),
    primary: Color::Rgb(225, 29, 72),
    primary_bright: Color::Rgb(255, 110, 150),
    dark: Color::Rgb(136, 19, 55),
    medium: Color::Rgb(190, 80, 110),
    muted: Color::Rgb(215, 150, 170),
    on_primary: Color::Rgb(255, 255, 255),
    bar: Color::Rgb(250, 215, 225),
    debug: Color::Rgb(90, 140, 220),
};

/// Theme for basic 16-color terminals
pub const THEME_BASIC: Theme = Theme {
    background: Color::Reset,
    primary: Color::Red,
    primary_bright: Color::LightRed,
    dark: Color::Magenta,
    medium: Color::LightMagenta,
    muted: Color::Gray,
    on_primary: Color::White,
    bar: Color::Reset,
    debug: Color::Blue,
};

/// Get the theme for a specific color mode
pub fn theme_for_mode(mode: ColorMode) -> &'static Theme {
    match mode {
        ColorMode::TrueColor => &THEME,
        ColorMode::Basic16 => &THEME_BASIC,
    }
}

/// Blend two RGB colors in linear space (`t` = 0.0 gives `from`)
///
/// Non-RGB colors cannot be blended and snap at the halfway point.
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    if t <= 0.0 {
        return from;
    }
    if t >= 1.0 {
        return to;
    }
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let a: LinSrgb = Srgb::new(r1, g1, b1).into_format::<f32>().into_linear();
            let b: LinSrgb = Srgb::new(r2, g2, b2).into_format::<f32>().into_linear();
            let mixed: Srgb<u8> = Srgb::<f32>::from_linear(a.mix(b, t)).into_format();
            Color::Rgb(mixed.red, mixed.green, mixed.blue)
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

/// Heart color for a heartbeat value in `0.0..=1.0`
pub fn heart_color(theme: &Theme, beat: f32) -> Color {
    blend(theme.primary, theme.primary_bright, beat)
}

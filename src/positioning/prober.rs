//! Randomized first-fit placement of the evasive button.
//!
//! A candidate offset is drawn uniformly inside the container (inset by the
//! padding) and accepted as soon as it clears every obstacle. After the attempt
//! budget runs out the bottom-right corner is used without further checks.
//!
//! When the element does not fit with padding on an axis, that axis drops the
//! padding and draws from `[0, container - element]`. An element larger than the
//! container is pinned to offset 0 on that axis.

use rand::Rng;
use serde::Serialize;
use tracing::trace;

use super::{Position, Rect, Size};

/// Padding (in cells) kept around obstacles and container edges
pub const DEFAULT_PADDING: f32 = 1.0;

/// Random draws before falling back to the corner
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// How a probe arrived at its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A random candidate cleared every obstacle
    Accepted,
    /// Attempts were exhausted; the corner position was used unchecked
    Fallback,
}

/// Result of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probe {
    pub position: Position,
    /// Number of random candidates drawn
    pub attempts: u32,
    pub outcome: Outcome,
}

impl Probe {
    pub fn is_fallback(&self) -> bool {
        self.outcome == Outcome::Fallback
    }
}

/// Allowed range of offsets along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    min: f32,
    max: f32,
}

impl Span {
    fn along(container: f32, element: f32, padding: f32) -> Self {
        let padded_max = container - element - padding;
        if padded_max >= padding {
            Self {
                min: padding,
                max: padded_max,
            }
        } else {
            Self {
                min: 0.0,
                max: (container - element).max(0.0),
            }
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }
}

/// Placement parameters for the evasive element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prober {
    padding: f32,
    max_attempts: u32,
}

impl Prober {
    /// Negative or non-finite padding is treated as zero; at least one attempt is always made.
    pub fn new(padding: f32, max_attempts: u32) -> Self {
        Self {
            padding: if padding.is_finite() { padding.max(0.0) } else { 0.0 },
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Find an offset for `movable` inside `container` that clears all `obstacles`.
    ///
    /// Obstacles are in the same coordinate space as `container`; the returned
    /// position is relative to the container's top-left corner.
    pub fn probe<R: Rng + ?Sized>(
        &self,
        container: &Rect,
        movable: Size,
        obstacles: &[Rect],
        rng: &mut R,
    ) -> Probe {
        let x_span = Span::along(container.width, movable.width, self.padding);
        let y_span = Span::along(container.height, movable.height, self.padding);

        for attempt in 1..=self.max_attempts {
            let candidate = Position::new(x_span.sample(rng), y_span.sample(rng));
            let rect = candidate.rect_in(container, movable);

            if obstacles
                .iter()
                .all(|obstacle| rect.clears(obstacle, self.padding))
            {
                trace!(attempt, x = candidate.x, y = candidate.y, "candidate accepted");
                return Probe {
                    position: candidate,
                    attempts: attempt,
                    outcome: Outcome::Accepted,
                };
            }
        }

        Probe {
            position: Position::new(x_span.max, y_span.max),
            attempts: self.max_attempts,
            outcome: Outcome::Fallback,
        }
    }

    /// The corner used when no candidate is accepted
    pub fn fallback(&self, container: &Rect, movable: Size) -> Position {
        Position::new(
            Span::along(container.width, movable.width, self.padding).max,
            Span::along(container.height, movable.height, self.padding).max,
        )
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING, DEFAULT_MAX_ATTEMPTS)
    }
}

/// Convenience wrapper returning only the position
pub fn find_safe_position<R: Rng + ?Sized>(
    container: &Rect,
    movable: Size,
    obstacles: &[Rect],
    padding: f32,
    max_attempts: u32,
    rng: &mut R,
) -> Position {
    Prober::new(padding, max_attempts)
        .probe(container, movable, obstacles, rng)
        .position
}

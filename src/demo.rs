//! Simulated visitor for `--demo`.
//!
//! A pursuer pointer walks toward the "No" button with a little wobble and
//! pauses after every dodge, as if surprised. Once it has watched the button
//! escape `give_up_after` times it heads for "Yes" and presses it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::layout::Rect as CellRect;
use tracing::{debug, info};

use crate::input::InputEvent;

/// Dodges the pursuer tolerates before giving up
pub const DEFAULT_GIVE_UP_AFTER: u32 = 8;

/// Pointer speed in cells per second
const SPEED: f32 = 28.0;

/// Random hesitation after each dodge, in seconds
const HESITATION: (f32, f32) = (0.35, 0.9);

/// How far the aim point drifts from the target's center, in cells
const WOBBLE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Chasing,
    GivingUp,
    Done,
}

/// Scripted pointer that chases the "No" button
#[derive(Debug)]
pub struct Pursuer {
    rng: StdRng,
    pointer: (f32, f32),
    last_cell: Option<(u16, u16)>,
    give_up_after: u32,
    seen_dodges: u32,
    pause: f32,
    phase: Phase,
}

impl Pursuer {
    pub fn new(seed: u64, give_up_after: u32, start: (u16, u16)) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pointer: (start.0 as f32, start.1 as f32),
            last_cell: None,
            give_up_after,
            seen_dodges: 0,
            // Let the screen settle before the chase starts
            pause: 1.0,
            phase: Phase::Chasing,
        }
    }

    /// Whether the pursuer has pressed "Yes"
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Advance by `dt` seconds and return the pointer event to inject, if any.
    ///
    /// `no` is where the "No" button currently sits, `yes` the "Yes" button,
    /// and `dodges` the controller's dodge count.
    pub fn step(&mut self, dt: f32, no: CellRect, yes: CellRect, dodges: u32) -> Option<InputEvent> {
        if self.phase == Phase::Done {
            return None;
        }

        if dodges > self.seen_dodges {
            self.seen_dodges = dodges;
            self.pause = self.rng.gen_range(HESITATION.0..HESITATION.1);
            debug!(dodges, "pursuer hesitates");
        }
        if self.phase == Phase::Chasing && dodges >= self.give_up_after {
            info!(dodges, "pursuer gives up and heads for yes");
            self.phase = Phase::GivingUp;
        }

        if self.pause > 0.0 {
            self.pause -= dt;
            return None;
        }

        let target = match self.phase {
            Phase::GivingUp => yes,
            _ => no,
        };
        if target.is_empty() {
            return None;
        }

        let aim = self.aim_at(target);
        let (dx, dy) = (aim.0 - self.pointer.0, aim.1 - self.pointer.1);
        let distance = (dx * dx + dy * dy).sqrt();
        let stride = SPEED * dt.max(0.0);
        if distance <= stride || distance == 0.0 {
            self.pointer = aim;
        } else {
            self.pointer.0 += dx / distance * stride;
            self.pointer.1 += dy / distance * stride;
        }

        let cell = (
            self.pointer.0.round().max(0.0) as u16,
            self.pointer.1.round().max(0.0) as u16,
        );

        if self.phase == Phase::GivingUp && target.contains(cell.into()) {
            self.phase = Phase::Done;
            return Some(InputEvent::PointerPressed { x: cell.0, y: cell.1 });
        }

        if self.last_cell == Some(cell) {
            return None;
        }
        self.last_cell = Some(cell);
        Some(InputEvent::PointerMoved { x: cell.0, y: cell.1 })
    }

    /// Center of `target`, nudged by a small random wobble while chasing
    fn aim_at(&mut self, target: CellRect) -> (f32, f32) {
        let center = (
            target.x as f32 + target.width.saturating_sub(1) as f32 / 2.0,
            target.y as f32 + target.height.saturating_sub(1) as f32 / 2.0,
        );
        if self.phase == Phase::GivingUp {
            return center;
        }
        (
            center.0 + self.rng.gen_range(-WOBBLE..=WOBBLE),
            center.1 + self.rng.gen_range(-WOBBLE..=WOBBLE) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no() -> CellRect {
        CellRect::new(40, 15, 6, 3)
    }

    fn yes() -> CellRect {
        CellRect::new(34, 10, 12, 3)
    }

    #[test]
    fn test_pursuer_approaches_no_button() {
        let mut pursuer = Pursuer::new(7, 3, (0, 0));
        let mut last = None;
        for _ in 0..200 {
            if let Some(InputEvent::PointerMoved { x, y }) = pursuer.step(0.05, no(), yes(), 0) {
                last = Some((x, y));
            }
        }

        let (x, y) = last.expect("pursuer never moved");
        let near = CellRect::new(no().x - 3, no().y - 2, no().width + 6, no().height + 4);
        assert!(near.contains((x, y).into()), "ended at ({x}, {y})");
        assert!(!pursuer.is_done());
    }

    #[test]
    fn test_pursuer_waits_before_starting() {
        let mut pursuer = Pursuer::new(1, 3, (0, 0));
        assert_eq!(pursuer.step(0.1, no(), yes(), 0), None);
    }

    #[test]
    fn test_pursuer_gives_up_and_presses_yes_once() {
        let mut pursuer = Pursuer::new(3, 2, (0, 0));
        let mut presses = Vec::new();
        for _ in 0..400 {
            if let Some(InputEvent::PointerPressed { x, y }) = pursuer.step(0.05, no(), yes(), 2) {
                presses.push((x, y));
            }
        }

        assert_eq!(presses.len(), 1);
        assert!(yes().contains(presses[0].into()));
        assert!(pursuer.is_done());
        assert_eq!(pursuer.step(0.05, no(), yes(), 2), None);
    }

    #[test]
    fn test_pursuer_hesitates_after_dodge() {
        let mut pursuer = Pursuer::new(5, 10, (0, 0));
        for _ in 0..40 {
            pursuer.step(0.05, no(), yes(), 0);
        }
        // A dodge is noticed and the next frame is spent hesitating
        assert_eq!(pursuer.step(0.05, no(), yes(), 1), None);
    }

    #[test]
    fn test_empty_target_is_ignored() {
        let mut pursuer = Pursuer::new(5, 10, (0, 0));
        pursuer.pause = 0.0;
        assert_eq!(pursuer.step(0.05, CellRect::default(), yes(), 0), None);
    }
}

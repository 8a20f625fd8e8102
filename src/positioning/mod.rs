mod interpolation;
pub mod prober;
pub mod rect;

pub use interpolation::*;
pub use prober::{find_safe_position, Outcome, Probe, Prober};
pub use rect::{Rect, Size};

use serde::Serialize;

/// Top-left offset of the movable element, relative to the container origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert to terminal cell offsets, rounding to the nearest cell
    pub fn to_terminal(&self) -> (u16, u16) {
        let col = self.x.round().clamp(0.0, u16::MAX as f32) as u16;
        let row = self.y.round().clamp(0.0, u16::MAX as f32) as u16;
        (col, row)
    }

    /// Linear interpolation toward another position
    pub fn lerp(&self, target: &Position, t: f32) -> Position {
        let t = t.clamp(0.0, 1.0);
        Position {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }

    /// The rect occupied by an element of `size` placed at this offset inside `container`
    pub fn rect_in(&self, container: &Rect, size: Size) -> Rect {
        Rect::new(
            container.left + self.x,
            container.top + self.y,
            size.width,
            size.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_terminal_rounds_and_clamps() {
        assert_eq!(Position::new(3.4, 7.6).to_terminal(), (3, 8));
        assert_eq!(Position::new(-2.0, 1.0).to_terminal(), (0, 1));
    }

    #[test]
    fn test_rect_in_translates_by_container_origin() {
        let container = Rect::new(10.0, 5.0, 80.0, 20.0);
        let rect = Position::new(4.0, 2.0).rect_in(&container, Size::new(6.0, 1.0));
        assert_eq!(rect.left, 14.0);
        assert_eq!(rect.top, 7.0);
        assert_eq!(rect.right(), 20.0);
        assert_eq!(rect.bottom(), 8.0);
    }

    #[test]
    fn test_lerp_clamps_factor() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(10.0, 4.0);
        assert_eq!(a.lerp(&b, 2.0), b);
        assert_eq!(a.lerp(&b, 0.5), Position::new(5.0, 2.0));
    }
}

use serde::Serialize;

/// Width and height of an element. Negative or non-finite extents collapse to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Axis-aligned box in screen space.
///
/// Only the origin and extent are stored, so `right == left + width` and
/// `bottom == top + height` hold for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left: sanitize_coord(left),
            top: sanitize_coord(top),
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    /// Build from edges. Inverted edges produce a zero-sized rect at `left`/`top`.
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Grow by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Rect {
        Rect::new(
            self.left - margin,
            self.top - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    /// Separating-axis test against `obstacle` grown by `padding`.
    ///
    /// True when this rect lies strictly to one side of the inflated obstacle.
    pub fn clears(&self, obstacle: &Rect, padding: f32) -> bool {
        self.right() < obstacle.left - padding
            || self.left > obstacle.right() + padding
            || self.bottom() < obstacle.top - padding
            || self.top > obstacle.bottom() + padding
    }

    /// Whether the point lies inside this rect (right and bottom edges exclusive)
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Convert from a ratatui cell rect
    pub fn from_cells(area: ratatui::layout::Rect) -> Self {
        Self::new(
            area.x as f32,
            area.y as f32,
            area.width as f32,
            area.height as f32,
        )
    }

    /// Snap to the nearest terminal cells, clipped to the `u16` range
    pub fn to_cells(&self) -> ratatui::layout::Rect {
        let x = self.left.round().clamp(0.0, u16::MAX as f32) as u16;
        let y = self.top.round().clamp(0.0, u16::MAX as f32) as u16;
        let width = self.width.round().clamp(0.0, (u16::MAX - x) as f32) as u16;
        let height = self.height.round().clamp(0.0, (u16::MAX - y) as f32) as u16;
        ratatui::layout::Rect::new(x, y, width, height)
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn sanitize_coord(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_follow_origin_and_extent() {
        let rect = Rect::new(350.0, 275.0, 100.0, 50.0);
        assert_eq!(rect.right(), 450.0);
        assert_eq!(rect.bottom(), 325.0);
    }

    #[test]
    fn test_negative_and_nan_extents_collapse() {
        let rect = Rect::new(1.0, 2.0, -5.0, f32::NAN);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
        assert!(rect.is_empty());

        let inverted = Rect::from_edges(10.0, 10.0, 4.0, 20.0);
        assert_eq!(inverted.width, 0.0);
        assert_eq!(inverted.height, 10.0);
    }

    #[test]
    fn test_clears_respects_padding() {
        let obstacle = Rect::new(10.0, 10.0, 10.0, 10.0);

        // Two units left of the obstacle: clear with padding 1, not with padding 3
        let left = Rect::new(0.0, 10.0, 8.0, 2.0);
        assert!(left.clears(&obstacle, 1.0));
        assert!(!left.clears(&obstacle, 3.0));

        // Overlapping rects are never clear
        let overlapping = Rect::new(15.0, 15.0, 10.0, 10.0);
        assert!(!overlapping.clears(&obstacle, 0.0));

        // Far below
        let below = Rect::new(12.0, 40.0, 2.0, 2.0);
        assert!(below.clears(&obstacle, 5.0));
    }

    #[test]
    fn test_touching_edges_do_not_clear() {
        let obstacle = Rect::new(10.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!touching.clears(&obstacle, 0.0));
    }

    #[test]
    fn test_inflate() {
        let rect = Rect::new(5.0, 5.0, 2.0, 2.0).inflate(1.0);
        assert_eq!(rect, Rect::new(4.0, 4.0, 4.0, 4.0));
    }

    #[test]
    fn test_cells_round_trip() {
        let area = ratatui::layout::Rect::new(3, 4, 20, 6);
        assert_eq!(Rect::from_cells(area).to_cells(), area);
        assert!(Rect::from_cells(area).contains_point(3.0, 4.0));
        assert!(!Rect::from_cells(area).contains_point(23.0, 4.0));
    }
}

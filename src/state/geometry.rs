use crate::positioning::Rect;

/// Bounding boxes of every element placement depends on, in screen cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Area the "No" button must stay inside
    pub container: Rect,
    /// The "No" button at its current spot
    pub movable: Rect,
    /// The "Yes" button
    pub affirm: Rect,
    /// The question heading
    pub question: Rect,
}

impl Geometry {
    /// False while the host still reports placeholder (zero-sized) boxes
    pub fn is_laid_out(&self) -> bool {
        !self.container.is_empty() && !self.movable.is_empty()
    }

    /// Elements the "No" button must keep clear of
    pub fn obstacles(&self) -> [Rect; 2] {
        [self.affirm, self.question]
    }
}

/// Supplies a fresh geometry snapshot on demand.
///
/// `None` means the elements are not mounted yet.
pub trait GeometrySource {
    fn snapshot(&self) -> Option<Geometry>;
}

impl GeometrySource for Geometry {
    fn snapshot(&self) -> Option<Geometry> {
        Some(*self)
    }
}

impl GeometrySource for Option<Geometry> {
    fn snapshot(&self) -> Option<Geometry> {
        *self
    }
}

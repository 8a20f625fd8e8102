use super::Position;

/// Duration of the hop between two committed positions, in seconds
pub const GLIDE_SECONDS: f32 = 0.3;

/// Ease out cubic - fast start, slow end
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Eased interpolation between positions
pub fn smooth_lerp(from: &Position, to: &Position, t: f32) -> Position {
    from.lerp(to, ease_out_cubic(t))
}

/// Visual transition of the button toward its committed position.
///
/// Purely cosmetic: hit testing and placement always use the committed target.
#[derive(Debug, Clone, PartialEq)]
pub struct Glide {
    from: Position,
    to: Position,
    elapsed: f32,
    duration: f32,
}

impl Glide {
    /// A glide that is already at rest on `position`
    pub fn at(position: Position) -> Self {
        Self {
            from: position,
            to: position,
            elapsed: GLIDE_SECONDS,
            duration: GLIDE_SECONDS,
        }
    }

    /// Start moving from wherever the glide currently is toward `target`
    pub fn retarget(&mut self, target: Position) {
        self.from = self.current();
        self.to = target;
        self.elapsed = 0.0;
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    pub fn current(&self) -> Position {
        if self.duration <= 0.0 {
            return self.to;
        }
        smooth_lerp(&self.from, &self.to, self.elapsed / self.duration)
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }
}

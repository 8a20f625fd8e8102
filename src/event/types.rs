use serde::{Deserialize, Serialize};

/// What made the "No" button run away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Pointer entered the button's proximity zone
    PointerEnter,
    /// Pointer moved while inside the proximity zone
    PointerMove,
    /// Button pressed on the button
    PointerDown,
    /// Pointer dragged across the button with a button held
    Drag,
    /// Keyboard focus moved to the button
    Keyboard,
}

impl TriggerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerKind::PointerEnter => "pointer enter",
            TriggerKind::PointerMove => "pointer move",
            TriggerKind::PointerDown => "pointer down",
            TriggerKind::Drag => "drag",
            TriggerKind::Keyboard => "keyboard",
        }
    }
}

/// Events delivered to the main loop from background tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The deferred initial placement fired
    PlacementDue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_kind_serializes_snake_case() {
        let json = serde_json::to_string(&TriggerKind::PointerEnter).unwrap();
        assert_eq!(json, r#""pointer_enter""#);

        let kind: TriggerKind = serde_json::from_str(r#""pointer_down""#).unwrap();
        assert_eq!(kind, TriggerKind::PointerDown);
    }
}

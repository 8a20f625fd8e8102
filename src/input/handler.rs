use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Processed input events for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit the application
    Quit,
    /// Answer "Yes"
    Affirm,
    /// Move keyboard focus to "No"
    FocusNo,
    /// Toggle the debug overlay
    ToggleDebug,
    /// Toggle help overlay
    ToggleHelp,
    /// Close help (any key when help is shown)
    CloseHelp,
    /// Pointer moved to a cell
    PointerMoved { x: u16, y: u16 },
    /// Left button pressed on a cell
    PointerPressed { x: u16, y: u16 },
    /// Pointer moved with the left button held
    PointerDragged { x: u16, y: u16 },
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// No event
    None,
}

/// Input handler for processing terminal events
pub struct InputHandler {
    help_visible: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            help_visible: false,
        }
    }

    /// Set help visibility state
    pub fn set_help_visible(&mut self, visible: bool) {
        self.help_visible = visible;
    }

    /// Poll for input events with timeout
    pub fn poll(&mut self, timeout: Duration) -> Option<InputEvent> {
        if event::poll(timeout).ok()? {
            self.translate(event::read().ok()?)
        } else {
            None
        }
    }

    /// Map a raw terminal event
    pub fn translate(&self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                Some(self.handle_key(key_event))
            }
            Event::Mouse(mouse_event) => Some(self.handle_mouse(mouse_event)),
            Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
            _ => None,
        }
    }

    /// Handle keyboard input
    fn handle_key(&self, event: KeyEvent) -> InputEvent {
        // Ctrl+C always quits, even with help open
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return InputEvent::Quit;
        }

        // If help is visible, any key closes it
        if self.help_visible {
            return InputEvent::CloseHelp;
        }

        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,

            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => InputEvent::Affirm,

            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Tab | KeyCode::BackTab => {
                InputEvent::FocusNo
            }

            KeyCode::Char('d') => InputEvent::ToggleDebug,

            KeyCode::Char('?') => InputEvent::ToggleHelp,

            _ => InputEvent::None,
        }
    }

    /// Handle mouse input
    fn handle_mouse(&self, event: MouseEvent) -> InputEvent {
        match event.kind {
            MouseEventKind::Moved => InputEvent::PointerMoved {
                x: event.column,
                y: event.row,
            },
            MouseEventKind::Down(MouseButton::Left) => InputEvent::PointerPressed {
                x: event.column,
                y: event.row,
            },
            MouseEventKind::Drag(MouseButton::Left) => InputEvent::PointerDragged {
                x: event.column,
                y: event.row,
            },
            _ => InputEvent::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_answer_and_focus_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.translate(key(KeyCode::Char('y'))), Some(InputEvent::Affirm));
        assert_eq!(handler.translate(key(KeyCode::Enter)), Some(InputEvent::Affirm));
        assert_eq!(handler.translate(key(KeyCode::Tab)), Some(InputEvent::FocusNo));
        assert_eq!(handler.translate(key(KeyCode::Char('q'))), Some(InputEvent::Quit));
        assert_eq!(handler.translate(key(KeyCode::Char('z'))), Some(InputEvent::None));
    }

    #[test]
    fn test_help_swallows_keys_except_ctrl_c() {
        let mut handler = InputHandler::new();
        handler.set_help_visible(true);
        assert_eq!(handler.translate(key(KeyCode::Char('y'))), Some(InputEvent::CloseHelp));

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handler.translate(ctrl_c), Some(InputEvent::Quit));
    }

    #[test]
    fn test_mouse_events() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.translate(mouse(MouseEventKind::Moved, 4, 9)),
            Some(InputEvent::PointerMoved { x: 4, y: 9 })
        );
        assert_eq!(
            handler.translate(mouse(MouseEventKind::Down(MouseButton::Left), 1, 2)),
            Some(InputEvent::PointerPressed { x: 1, y: 2 })
        );
        assert_eq!(
            handler.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 3)),
            Some(InputEvent::PointerDragged { x: 3, y: 3 })
        );
        assert_eq!(
            handler.translate(mouse(MouseEventKind::ScrollUp, 0, 0)),
            Some(InputEvent::None)
        );
    }

    #[test]
    fn test_resize() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.translate(Event::Resize(120, 40)),
            Some(InputEvent::Resize { width: 120, height: 40 })
        );
    }
}

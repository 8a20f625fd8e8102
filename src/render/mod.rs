pub mod answered;
pub mod colors;
pub mod scene;
pub mod symbols;
pub mod ui;

use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Span};

pub use answered::AnsweredView;
pub use colors::{heart_color, theme_for_mode, ColorMode, Theme};
pub use scene::{ButtonWidget, DebugOverlay, QuestionView, SceneLayout};
pub use symbols::detect_unicode;
pub use ui::{HelpOverlay, StatusBar};

/// Display width of `text` in terminal cells
pub fn text_width(text: &str) -> u16 {
    Span::raw(text).width().min(u16::MAX as usize) as u16
}

/// Write `text` starting at (`x`, `y`), clipped to `clip`
pub fn draw_text(buf: &mut Buffer, clip: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y < clip.y || y >= clip.bottom() {
        return;
    }
    let mut cx = x;
    for ch in text.chars() {
        if cx >= clip.right() {
            break;
        }
        if cx >= clip.x {
            if let Some(cell) = buf.cell_mut((cx, y)) {
                cell.set_char(ch).set_style(style);
            }
        }
        cx = cx.saturating_add(1);
    }
}

/// Write `text` horizontally centered in `area` on row `y`
pub fn draw_centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    let x = area.x + area.width.saturating_sub(text_width(text)) / 2;
    draw_text(buf, area, x, y, text, style);
}

/// Paint every cell in `area` with `style`
pub fn fill(buf: &mut Buffer, area: Rect, style: Style) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(' ').set_style(style);
            }
        }
    }
}

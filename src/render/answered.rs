use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::config::WidgetConfig;

use super::colors::{heart_color, Theme};
use super::symbols::{heart_art, HEART};
use super::{draw_centered, draw_text, fill, text_width};

/// Width of the framed image reference
const IMAGE_FRAME_WIDTH: u16 = 68;
const IMAGE_FRAME_HEIGHT: u16 = 5;

/// The terminal screen shown after "Yes"
pub struct AnsweredView<'a> {
    config: &'a WidgetConfig,
    theme: &'a Theme,
    beat: f32,
    use_unicode: bool,
}

impl<'a> AnsweredView<'a> {
    pub fn new(config: &'a WidgetConfig, theme: &'a Theme) -> Self {
        Self {
            config,
            theme,
            beat: 0.0,
            use_unicode: true,
        }
    }

    pub fn beat(mut self, beat: f32) -> Self {
        self.beat = beat;
        self
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }
}

impl Widget for AnsweredView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let background = Style::default().bg(theme.background);
        fill(buf, area, background);

        let art = heart_art(self.use_unicode);
        let big_heart = area.height >= 17;
        let heart_rows = if big_heart { art.len() as u16 + 1 } else { 1 };
        let content_height = heart_rows + 2 + 1 + IMAGE_FRAME_HEIGHT + 1 + 1;
        let mut y = area.y + area.height.saturating_sub(content_height) / 2;

        let heart_style = background.fg(heart_color(theme, self.beat));
        if big_heart {
            for line in art {
                draw_centered(buf, area, y, line, heart_style);
                y += 1;
            }
            y += 1;
        } else {
            let heart = HEART.render(self.use_unicode).to_string();
            draw_centered(buf, area, y, &heart, heart_style);
            y += 1;
        }

        let heart = HEART.render(self.use_unicode);
        let title = format!("{} {}", self.config.answer_title, heart);
        draw_centered(buf, area, y, &title, background.fg(theme.dark).add_modifier(Modifier::BOLD));
        y += 1;
        draw_centered(buf, area, y, &self.config.answer_subtitle, background.fg(theme.medium));
        y += 2;

        // The image itself is an external asset; show where it lives
        let frame_width = IMAGE_FRAME_WIDTH.min(area.width);
        let frame = Rect::new(
            area.x + (area.width - frame_width) / 2,
            y,
            frame_width,
            IMAGE_FRAME_HEIGHT,
        )
        .intersection(area);
        let frame_style = background.fg(theme.primary);
        fill(buf, frame, background);
        if frame.height > 0 && frame.width > 1 {
            let edge = "─".repeat(frame.width.saturating_sub(2) as usize);
            draw_text(buf, area, frame.x, frame.y, &format!("╭{edge}╮"), frame_style);
            if frame.height > 1 {
                draw_text(buf, area, frame.x, frame.bottom() - 1, &format!("╰{edge}╯"), frame_style);
            }
            for row in frame.y + 1..frame.bottom().saturating_sub(1) {
                draw_text(buf, area, frame.x, row, "│", frame_style);
                draw_text(buf, area, frame.right() - 1, row, "│", frame_style);
            }
        }
        let inner = Rect::new(
            frame.x + 1,
            frame.y,
            frame.width.saturating_sub(2),
            frame.height,
        );
        draw_centered(buf, inner, frame.y + 1, "[ image ]", background.fg(theme.muted));
        let path = truncate_left(&self.config.answer_image, inner.width.saturating_sub(2));
        draw_centered(buf, inner, frame.y + 3, &path, background.fg(theme.medium));
        y += IMAGE_FRAME_HEIGHT + 1;

        let closing = format!("{} {}", self.config.answer_closing, heart);
        draw_centered(
            buf,
            area,
            y,
            &closing,
            background.fg(theme.medium).add_modifier(Modifier::ITALIC),
        );
    }
}

/// Keep the end of `text`, which is the informative part of a path
fn truncate_left(text: &str, max_width: u16) -> String {
    if text_width(text) <= max_width {
        return text.to_string();
    }
    let keep = max_width.saturating_sub(1) as usize;
    let chars: Vec<char> = text.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(keep)..].iter().collect();
    format!("…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colors::THEME;

    fn screen_text(buf: &Buffer, area: Rect) -> String {
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_title_and_image_reference() {
        let config = WidgetConfig::default();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        AnsweredView::new(&config, &THEME).render(area, &mut buf);

        let text = screen_text(&buf, area);
        assert!(text.contains("Perfect Choice!"));
        assert!(text.contains("I knew you'd say yes!"));
        assert!(text.contains("valentine-good-choice-meme.dim_1024x1024.png"));
    }

    #[test]
    fn test_small_area_does_not_panic() {
        let config = WidgetConfig::default();
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        AnsweredView::new(&config, &THEME).use_unicode(false).render(area, &mut buf);
    }

    #[test]
    fn test_truncate_left_keeps_file_name() {
        assert_eq!(truncate_left("/a/b/c.png", 20), "/a/b/c.png");
        assert_eq!(truncate_left("/assets/long/name.png", 9), "…name.png");
    }
}

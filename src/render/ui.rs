use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::colors::Theme;
use super::symbols::{HEART, ROUNDED_BORDER};
use super::{draw_centered, draw_text, fill, text_width};

/// Status bar at the bottom of the screen
pub struct StatusBar<'a> {
    theme: &'a Theme,
    dodges: u32,
    answered: bool,
    debug: bool,
    demo: bool,
    use_unicode: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            dodges: 0,
            answered: false,
            debug: false,
            demo: false,
            use_unicode: true,
        }
    }

    pub fn dodges(mut self, dodges: u32) -> Self {
        self.dodges = dodges;
        self
    }

    pub fn answered(mut self, answered: bool) -> Self {
        self.answered = answered;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let theme = self.theme;
        let bar = Rect::new(area.x, area.y, area.width, 1);
        let bg_style = Style::default().bg(theme.bar);
        fill(buf, bar, bg_style);

        let label_style = bg_style.fg(theme.muted);
        let value_style = bg_style.fg(theme.medium);
        let accent_style = bg_style.fg(theme.primary).add_modifier(Modifier::BOLD);

        let mut segments: Vec<(String, Style)> = vec![
            (format!("{} VALENTINE", HEART.render(self.use_unicode)), accent_style),
            (format!("Dodges: {}", self.dodges), value_style),
        ];
        if self.answered {
            segments.push(("ANSWERED".to_string(), accent_style));
        }
        if self.demo {
            segments.push(("[DEMO]".to_string(), bg_style.fg(theme.dark)));
        }
        if self.debug {
            segments.push(("[DEBUG]".to_string(), bg_style.fg(theme.debug)));
        }

        let help_text = "?:help q:quit";
        let help_x = bar.right().saturating_sub(text_width(help_text) + 1);

        let mut x = bar.x + 1;
        for (text, style) in segments {
            if x >= help_x {
                break;
            }
            let clip = Rect::new(bar.x, bar.y, help_x.saturating_sub(bar.x), 1);
            draw_text(buf, clip, x, bar.y, &text, style);
            x = x.saturating_add(text_width(&text) + 2);
        }

        draw_text(buf, bar, help_x, bar.y, help_text, label_style);
    }
}

/// Keybindings shown in the help box
const CONTROLS: [(&str, &str); 8] = [
    ("y, Enter", "Answer yes"),
    ("n, Tab", "Try to focus No"),
    ("mouse", "Chase the No button"),
    ("click", "Press a button"),
    ("d", "Toggle probe overlay"),
    ("?", "Toggle this help"),
    ("q, Esc", "Quit"),
    ("Ctrl+C", "Quit from anywhere"),
];

/// Help overlay widget
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
    use_unicode: bool,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            use_unicode: true,
        }
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;

        let box_width = 44u16.min(area.width);
        let box_height = (CONTROLS.len() as u16 + 5).min(area.height);
        if box_width < 4 || box_height < 3 {
            return;
        }
        let box_x = area.x + (area.width - box_width) / 2;
        let box_y = area.y + (area.height - box_height) / 2;
        let panel = Rect::new(box_x, box_y, box_width, box_height);

        let box_bg = Style::default().bg(theme.background);
        fill(buf, panel, box_bg);

        // Border
        let border = &ROUNDED_BORDER;
        let border_style = box_bg.fg(theme.primary);
        let right = panel.right() - 1;
        let bottom = panel.bottom() - 1;
        let unicode = self.use_unicode;
        for x in panel.left()..panel.right() {
            buf[(x, box_y)]
                .set_char(border.horizontal.render(unicode))
                .set_style(border_style);
            buf[(x, bottom)]
                .set_char(border.horizontal.render(unicode))
                .set_style(border_style);
        }
        for y in panel.top()..panel.bottom() {
            buf[(box_x, y)]
                .set_char(border.vertical.render(unicode))
                .set_style(border_style);
            buf[(right, y)]
                .set_char(border.vertical.render(unicode))
                .set_style(border_style);
        }
        buf[(box_x, box_y)]
            .set_char(border.top_left.render(unicode))
            .set_style(border_style);
        buf[(right, box_y)]
            .set_char(border.top_right.render(unicode))
            .set_style(border_style);
        buf[(box_x, bottom)]
            .set_char(border.bottom_left.render(unicode))
            .set_style(border_style);
        buf[(right, bottom)]
            .set_char(border.bottom_right.render(unicode))
            .set_style(border_style);

        let title = format!(" {} Controls ", HEART.render(unicode));
        draw_centered(
            buf,
            panel,
            box_y,
            &title,
            box_bg.fg(theme.primary).add_modifier(Modifier::BOLD),
        );

        let inner = Rect::new(box_x + 1, box_y + 1, box_width - 2, box_height - 2);
        let key_style = box_bg.fg(theme.dark).add_modifier(Modifier::BOLD);
        let desc_style = box_bg.fg(theme.medium);

        let mut y = box_y + 2;
        for (key, desc) in CONTROLS {
            if y >= bottom.saturating_sub(1) {
                break;
            }
            draw_text(buf, inner, box_x + 3, y, key, key_style);
            draw_text(buf, inner, box_x + 14, y, desc, desc_style);
            y += 1;
        }

        if box_height > 4 {
            draw_centered(buf, inner, bottom - 1, "Press any key to close", box_bg.fg(theme.muted));
        }
    }
}

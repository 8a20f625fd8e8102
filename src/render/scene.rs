//! Layout and drawing of the interactive question screen.
//!
//! [`SceneLayout`] is the only place that knows where things are on screen.
//! It is recomputed from the terminal area whenever geometry is needed, so
//! placement always sees the current layout.

use ratatui::{
    buffer::Buffer,
    layout::Rect as CellRect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::config::WidgetConfig;
use crate::positioning::{Probe, Position, Rect};
use crate::state::Geometry;

use super::colors::{heart_color, Theme};
use super::symbols::{heart_art, BorderSymbols, HEART, ROUNDED_BORDER};
use super::{draw_centered, draw_text, fill, text_width};

/// Horizontal space between a button's border and its label
const BUTTON_PAD_X: u16 = 2;
const BUTTON_HEIGHT: u16 = 3;
const FULL_HEART_ROWS: u16 = 5;
const FULL_HEART_WIDTH: u16 = 7;

/// Outer size of a bordered button with `label`
pub fn button_size(label: &str) -> (u16, u16) {
    (text_width(label) + 2 * BUTTON_PAD_X + 2, BUTTON_HEIGHT)
}

/// Cell rect of `width` x `height` centered horizontally in `container` at row `y`
fn centered(container: CellRect, y: u16, width: u16, height: u16) -> CellRect {
    let width = width.min(container.width);
    let x = container.x + (container.width - width) / 2;
    CellRect::new(x, y, width, height).intersection(container)
}

/// Screen positions of every element on the question screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    /// Everything above the status bar
    pub container: CellRect,
    pub heart: CellRect,
    pub question: CellRect,
    pub subtitle: CellRect,
    pub affirm: CellRect,
    /// Where "No" is drawn before its first placement
    pub no_home: CellRect,
    pub hint: CellRect,
    /// Unclipped outer size of the "No" button
    pub no_size: (u16, u16),
}

impl SceneLayout {
    /// Lay out the screen for a full terminal `area` (last row is the status bar)
    pub fn compute(area: CellRect, config: &WidgetConfig) -> Self {
        let container = CellRect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
        let (yes_w, yes_h) = button_size(&config.yes_label);
        let no_size = button_size(&config.no_label);
        let buttons_h = yes_h.max(no_size.1);

        // Full layout when it fits, otherwise a one-row heart and no gaps
        let roomy = FULL_HEART_ROWS + 1 + 2 + 2 + buttons_h + 2 + 1;
        let (heart_rows, heart_width, gap_small, gap_large) = if container.height >= roomy {
            (FULL_HEART_ROWS, FULL_HEART_WIDTH, 1, 2)
        } else {
            (1, 1, 0, 0)
        };
        let total = heart_rows + gap_small + 2 + gap_large + buttons_h + gap_large + 1;

        let mut y = container.y + container.height.saturating_sub(total) / 2;
        let heart = centered(container, y, heart_width, heart_rows);
        y = y.saturating_add(heart_rows + gap_small);
        let question = centered(container, y, text_width(&config.question), 1);
        y = y.saturating_add(1);
        let subtitle = centered(container, y, text_width(&config.subtitle), 1);
        y = y.saturating_add(1 + gap_large);
        let affirm = centered(container, y, yes_w, yes_h);
        let no_home = centered(container, y, no_size.0, no_size.1);
        y = y.saturating_add(buttons_h + gap_large);
        let hint = centered(container, y, text_width(&config.hint), 1);

        Self {
            container,
            heart,
            question,
            subtitle,
            affirm,
            no_home,
            hint,
            no_size,
        }
    }

    /// Where the "No" button is drawn for a container-relative position
    pub fn no_rect(&self, position: Option<Position>) -> CellRect {
        match position {
            Some(position) => {
                let (col, row) = position.to_terminal();
                CellRect::new(
                    self.container.x.saturating_add(col),
                    self.container.y.saturating_add(row),
                    self.no_size.0,
                    self.no_size.1,
                )
                .intersection(self.container)
            }
            None => self.no_home,
        }
    }

    /// Snapshot handed to the controller; `position` is the committed spot
    pub fn geometry(&self, position: Option<Position>) -> Geometry {
        let drawn = self.no_rect(position);
        Geometry {
            container: Rect::from_cells(self.container),
            movable: Rect::new(
                drawn.x as f32,
                drawn.y as f32,
                self.no_size.0 as f32,
                self.no_size.1 as f32,
            ),
            affirm: Rect::from_cells(self.affirm),
            question: Rect::from_cells(self.question),
        }
    }

    /// Whether cell (`x`, `y`) is within `proximity` cells of the "No" button
    pub fn near_no(&self, position: Option<Position>, x: u16, y: u16, proximity: u16) -> bool {
        Rect::from_cells(self.no_rect(position))
            .inflate(proximity as f32)
            .contains_point(x as f32, y as f32)
    }

    pub fn hits_affirm(&self, x: u16, y: u16) -> bool {
        Rect::from_cells(self.affirm).contains_point(x as f32, y as f32)
    }
}

/// A pill-shaped button with a centered label
pub struct ButtonWidget<'a> {
    label: &'a str,
    label_style: Style,
    border_style: Style,
    fill_style: Option<Style>,
    border: &'a BorderSymbols,
    use_unicode: bool,
}

impl<'a> ButtonWidget<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            label_style: Style::default(),
            border_style: Style::default(),
            fill_style: None,
            border: &ROUNDED_BORDER,
            use_unicode: true,
        }
    }

    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Solid background inside the border
    pub fn filled(mut self, style: Style) -> Self {
        self.fill_style = Some(style);
        self
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }
}

impl Widget for ButtonWidget<'_> {
    fn render(self, area: CellRect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 3 {
            // Too cramped for a border
            draw_centered(buf, area, area.y, self.label, self.label_style);
            return;
        }

        if let Some(style) = self.fill_style {
            fill(buf, area, style);
        }

        let u = self.use_unicode;
        let border = self.border;
        let (left, right) = (area.left(), area.right() - 1);
        let (top, bottom) = (area.top(), area.bottom() - 1);

        for x in left..=right {
            for y in [top, bottom] {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(border.horizontal.render(u)).set_style(self.border_style);
                }
            }
        }
        for y in top..=bottom {
            for x in [left, right] {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(border.vertical.render(u)).set_style(self.border_style);
                }
            }
        }
        for (x, y, symbol) in [
            (left, top, border.top_left),
            (right, top, border.top_right),
            (left, bottom, border.bottom_left),
            (right, bottom, border.bottom_right),
        ] {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(symbol.render(u)).set_style(self.border_style);
            }
        }

        let inner = CellRect::new(left + 1, top + 1, area.width - 2, area.height - 2);
        draw_centered(buf, inner, inner.y + inner.height / 2, self.label, self.label_style);
    }
}

/// The interactive question screen
pub struct QuestionView<'a> {
    config: &'a WidgetConfig,
    layout: &'a SceneLayout,
    theme: &'a Theme,
    /// Where "No" is drawn this frame (may be mid-glide)
    no_at: CellRect,
    beat: f32,
    use_unicode: bool,
    no_focused: bool,
}

impl<'a> QuestionView<'a> {
    pub fn new(config: &'a WidgetConfig, layout: &'a SceneLayout, theme: &'a Theme) -> Self {
        Self {
            config,
            layout,
            theme,
            no_at: layout.no_home,
            beat: 0.0,
            use_unicode: true,
            no_focused: false,
        }
    }

    pub fn no_at(mut self, area: CellRect) -> Self {
        self.no_at = area;
        self
    }

    /// Heartbeat intensity in `0.0..=1.0`
    pub fn beat(mut self, beat: f32) -> Self {
        self.beat = beat;
        self
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }

    pub fn no_focused(mut self, focused: bool) -> Self {
        self.no_focused = focused;
        self
    }
}

impl Widget for QuestionView<'_> {
    fn render(self, area: CellRect, buf: &mut Buffer) {
        let theme = self.theme;
        let layout = self.layout;
        let clip = layout.container.intersection(area);
        fill(buf, clip, Style::default().bg(theme.background));

        let heart_style = Style::default()
            .fg(heart_color(theme, self.beat))
            .bg(theme.background);
        if layout.heart.height >= FULL_HEART_ROWS {
            for (i, line) in heart_art(self.use_unicode).iter().enumerate() {
                draw_text(buf, clip, layout.heart.x, layout.heart.y + i as u16, line, heart_style);
            }
        } else {
            let heart = HEART.render(self.use_unicode).to_string();
            draw_centered(buf, clip, layout.heart.y, &heart, heart_style);
        }

        let question_style = Style::default()
            .fg(theme.dark)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD);
        draw_centered(buf, clip, layout.question.y, &self.config.question, question_style);

        let subtitle_style = Style::default().fg(theme.medium).bg(theme.background);
        draw_centered(buf, clip, layout.subtitle.y, &self.config.subtitle, subtitle_style);

        // "No" first so the unplaced button never hides "Yes"
        let mut no_label = Style::default().fg(theme.medium).bg(theme.background);
        if self.no_focused {
            no_label = no_label.add_modifier(Modifier::UNDERLINED);
        }
        ButtonWidget::new(&self.config.no_label)
            .label_style(no_label)
            .border_style(Style::default().fg(theme.muted).bg(theme.background))
            .filled(Style::default().bg(theme.background))
            .use_unicode(self.use_unicode)
            .render(self.no_at.intersection(clip), buf);

        let yes_fill = Style::default().fg(theme.on_primary).bg(theme.primary);
        ButtonWidget::new(&self.config.yes_label)
            .label_style(yes_fill.add_modifier(Modifier::BOLD))
            .border_style(yes_fill)
            .filled(yes_fill)
            .use_unicode(self.use_unicode)
            .render(layout.affirm.intersection(clip), buf);

        let hint_style = Style::default()
            .fg(theme.muted)
            .bg(theme.background)
            .add_modifier(Modifier::ITALIC);
        draw_centered(buf, clip, layout.hint.y, &self.config.hint, hint_style);
    }
}

/// Placement diagnostics: inflated obstacle outlines and the last probe
pub struct DebugOverlay<'a> {
    obstacles: &'a [Rect],
    padding: f32,
    max_attempts: u32,
    probe: Option<Probe>,
    theme: &'a Theme,
}

impl<'a> DebugOverlay<'a> {
    pub fn new(obstacles: &'a [Rect], padding: f32, max_attempts: u32, theme: &'a Theme) -> Self {
        Self {
            obstacles,
            padding,
            max_attempts,
            probe: None,
            theme,
        }
    }

    pub fn probe(mut self, probe: Option<Probe>) -> Self {
        self.probe = probe;
        self
    }
}

impl Widget for DebugOverlay<'_> {
    fn render(self, area: CellRect, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.debug);

        for obstacle in self.obstacles {
            let zone = obstacle.inflate(self.padding).to_cells().intersection(area);
            if zone.is_empty() {
                continue;
            }
            for y in zone.top()..zone.bottom() {
                for x in zone.left()..zone.right() {
                    let on_edge = y == zone.top()
                        || y == zone.bottom() - 1
                        || x == zone.left()
                        || x == zone.right() - 1;
                    if !on_edge {
                        continue;
                    }
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        // Only mark empty cells so text stays readable
                        if cell.symbol() == " " {
                            cell.set_char('·').set_fg(self.theme.debug);
                        }
                    }
                }
            }
        }

        let summary = match self.probe {
            Some(probe) => format!(
                "probe: {} {}/{} at ({:.1}, {:.1})",
                if probe.is_fallback() { "fallback" } else { "accepted" },
                probe.attempts,
                self.max_attempts,
                probe.position.x,
                probe.position.y,
            ),
            None => "probe: none yet".to_string(),
        };
        draw_text(buf, area, area.x + 1, area.y, &summary, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: u16, height: u16) -> SceneLayout {
        SceneLayout::compute(CellRect::new(0, 0, width, height), &WidgetConfig::default())
    }

    #[test]
    fn test_button_size() {
        assert_eq!(button_size("No"), (8, 3));
        assert_eq!(button_size("Yes!"), (10, 3));
    }

    #[test]
    fn test_layout_reserves_status_row() {
        let layout = layout(80, 24);
        assert_eq!(layout.container, CellRect::new(0, 0, 80, 23));
    }

    #[test]
    fn test_roomy_layout_stacks_elements() {
        let layout = layout(80, 24);
        assert_eq!(layout.heart.height, FULL_HEART_ROWS);
        assert!(layout.heart.bottom() <= layout.question.y);
        assert!(layout.question.y < layout.subtitle.y);
        assert!(layout.subtitle.bottom() < layout.affirm.y);
        assert!(layout.affirm.bottom() < layout.hint.y);
        assert!(layout.hint.bottom() <= layout.container.bottom());

        // Yes is centered
        let center = layout.affirm.x + layout.affirm.width / 2;
        assert!((39..=41).contains(&center));
    }

    #[test]
    fn test_short_terminal_compacts() {
        let layout = layout(80, 10);
        assert_eq!(layout.heart.height, 1);
        assert!(layout.hint.bottom() <= layout.container.bottom());
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let layout = layout(3, 2);
        let geometry = layout.geometry(None);
        assert!(layout.container.width <= 3);
        assert_eq!(geometry.movable.width, 8.0);
    }

    #[test]
    fn test_unplaced_no_is_centered_on_button_row() {
        let layout = layout(80, 24);
        assert_eq!(layout.no_rect(None), layout.no_home);
        assert_eq!(layout.no_home.y, layout.affirm.y);
    }

    #[test]
    fn test_placed_no_is_offset_from_container() {
        let layout = SceneLayout::compute(CellRect::new(2, 1, 80, 24), &WidgetConfig::default());
        let rect = layout.no_rect(Some(Position::new(10.0, 4.0)));
        assert_eq!(rect, CellRect::new(12, 5, 8, 3));
    }

    #[test]
    fn test_geometry_reports_real_sizes() {
        let layout = layout(80, 24);
        let geometry = layout.geometry(Some(Position::new(5.0, 2.0)));
        assert!(geometry.is_laid_out());
        assert_eq!(geometry.movable, Rect::new(5.0, 2.0, 8.0, 3.0));
        assert_eq!(geometry.affirm, Rect::from_cells(layout.affirm));
        assert_eq!(geometry.question, Rect::from_cells(layout.question));
    }

    #[test]
    fn test_zero_height_terminal_is_not_laid_out() {
        let layout = layout(80, 1);
        assert!(!layout.geometry(None).is_laid_out());
    }

    #[test]
    fn test_proximity() {
        let layout = layout(80, 24);
        let at = Some(Position::new(10.0, 4.0));
        // Button occupies columns 10..18, rows 4..7
        assert!(layout.near_no(at, 10, 4, 0));
        assert!(!layout.near_no(at, 9, 4, 0));
        assert!(layout.near_no(at, 9, 4, 1));
        assert!(layout.near_no(at, 18, 7, 1));
        assert!(!layout.near_no(at, 20, 4, 1));
    }

    #[test]
    fn test_question_view_draws_labels() {
        let config = WidgetConfig::default();
        let area = CellRect::new(0, 0, 80, 24);
        let layout = SceneLayout::compute(area, &config);
        let mut buf = Buffer::empty(area);
        QuestionView::new(&config, &layout, &crate::render::colors::THEME)
            .no_at(layout.no_rect(Some(Position::new(2.0, 2.0))))
            .render(area, &mut buf);

        let row: String = (0..80)
            .map(|x| buf[(x, layout.question.y)].symbol().to_string())
            .collect();
        assert!(row.contains("Will you be my Valentine?"));

        let no_row: String = (2..10).map(|x| buf[(x, 3)].symbol().to_string()).collect();
        assert!(no_row.contains("No"));

        let yes_row: String = (layout.affirm.left()..layout.affirm.right())
            .map(|x| buf[(x, layout.affirm.y + 1)].symbol().to_string())
            .collect();
        assert!(yes_row.contains("Yes!"));
    }
}

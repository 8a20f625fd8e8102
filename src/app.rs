use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use tracing::{debug, info};

use crate::animation::{AnimationLoop, HeartPulse, FRAME_DURATION};
use crate::config::WidgetConfig;
use crate::demo::{Pursuer, DEFAULT_GIVE_UP_AFTER};
use crate::event::{create_event_queue, AppEvent, EventReceiver, EventSender, TriggerKind};
use crate::input::{InputEvent, InputHandler};
use crate::positioning::{Glide, Position};
use crate::render::{
    detect_unicode, theme_for_mode, AnsweredView, ColorMode, DebugOverlay, HelpOverlay,
    QuestionView, SceneLayout, StatusBar, Theme,
};
use crate::state::{Command, Controller, DeferredPlacement, Effect};

/// Most input events handled between two frames
const MAX_INPUTS_PER_FRAME: usize = 64;

/// Extra beats per minute the heart gains per dodge
const EXCITEMENT_PER_DODGE: f32 = 6.0;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub widget: WidgetConfig,
    pub demo_mode: bool,
    /// Dodges before the demo pursuer gives up
    pub demo_give_up: u32,
    /// Fixed RNG seed for reproducible placement
    pub seed: Option<u64>,
    /// Start with the probe overlay visible
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            widget: WidgetConfig::default(),
            demo_mode: false,
            demo_give_up: DEFAULT_GIVE_UP_AFTER,
            seed: None,
            debug: false,
        }
    }
}

/// Map a pointer event to a controller command.
///
/// Returns the command (if any) and whether the pointer is now near "No".
/// A press on "Yes" wins over an overlapping "No".
pub fn pointer_command(
    layout: &SceneLayout,
    position: Option<Position>,
    event: &InputEvent,
    proximity: u16,
    was_near: bool,
) -> (Option<Command>, bool) {
    let (x, y, kind) = match *event {
        InputEvent::PointerMoved { x, y } => {
            let kind = if was_near {
                TriggerKind::PointerMove
            } else {
                TriggerKind::PointerEnter
            };
            (x, y, kind)
        }
        InputEvent::PointerPressed { x, y } => {
            if layout.hits_affirm(x, y) {
                return (Some(Command::Affirm), false);
            }
            (x, y, TriggerKind::PointerDown)
        }
        InputEvent::PointerDragged { x, y } => (x, y, TriggerKind::Drag),
        _ => return (None, was_near),
    };

    if layout.near_no(position, x, y, proximity) {
        let command = Command::Evade {
            kind,
            pointer: Some((x, y)),
        };
        (Some(command), true)
    } else {
        (None, false)
    }
}

/// Main application state
pub struct App {
    config: AppConfig,
    controller: Controller,
    animation_loop: AnimationLoop,
    input_handler: InputHandler,
    pulse: HeartPulse,

    // Visual position of "No"; hit testing uses the committed position
    glide: Option<Glide>,

    // Demo pointer
    pursuer: Option<Pursuer>,

    // Terminal area of the last frame or resize
    area: Rect,

    // Whether the pointer was near "No" on the previous pointer event
    pointer_near: bool,
    no_focused: bool,
    show_help: bool,
    debug: bool,

    theme: &'static Theme,
    unicode: bool,

    running: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let controller = Controller::new(config.widget.prober(), rng);
        let pursuer = config.demo_mode.then(|| {
            let seed = config.seed.unwrap_or(0).wrapping_add(1);
            Pursuer::new(seed, config.demo_give_up, (0, 0))
        });

        Self {
            debug: config.debug,
            config,
            controller,
            animation_loop: AnimationLoop::new(),
            input_handler: InputHandler::new(),
            pulse: HeartPulse::default(),
            glide: None,
            pursuer,
            area: Rect::default(),
            pointer_near: false,
            no_focused: false,
            show_help: false,
            theme: theme_for_mode(ColorMode::detect()),
            unicode: detect_unicode(),
            running: true,
        }
    }

    /// Run the application
    pub async fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = restore_terminal(&mut stdout);
            return Err(e);
        }
        let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = restore_terminal(&mut io::stdout());
                return Err(e);
            }
        };

        let result = self.event_loop(&mut terminal).await;

        // Cleanup terminal, whatever the loop returned
        let cleanup = restore_terminal(terminal.backend_mut()).and_then(|_| terminal.show_cursor());
        result.and(cleanup)
    }

    async fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        let (event_tx, mut event_rx) = create_event_queue();

        let delay = self.config.widget.placement_delay();
        let mut deferred = match delay {
            Some(delay) => DeferredPlacement::schedule(delay, event_tx.clone()),
            None => DeferredPlacement::idle(),
        };
        // Without a delay the first rendered frame is the layout-ready signal
        let mut place_after_frame = delay.is_none();

        info!(demo = self.config.demo_mode, seed = ?self.config.seed, "started");

        while self.running {
            self.handle_input();

            self.process_incoming_events(&mut event_rx, &mut deferred, &event_tx, delay);

            if self.animation_loop.should_render() {
                let dt = self.animation_loop.delta_time();
                self.update(dt);

                terminal.draw(|frame| {
                    self.area = frame.area();
                    self.render(frame.area(), frame.buffer_mut());
                })?;
                self.animation_loop.frame_rendered();

                if place_after_frame {
                    place_after_frame = self.place_initial() == Effect::NotReady;
                }
            }

            tokio::time::sleep(self.animation_loop.time_until_next_frame()).await;
        }

        deferred.cancel();
        info!(
            dodges = self.controller.state().dodges,
            answered = self.controller.state().is_answered(),
            "exiting"
        );
        Ok(())
    }

    /// Process events from the queue
    fn process_incoming_events(
        &mut self,
        rx: &mut EventReceiver,
        deferred: &mut DeferredPlacement,
        tx: &EventSender,
        delay: Option<Duration>,
    ) {
        while let Ok(event) = rx.try_recv() {
            match event {
                AppEvent::PlacementDue => {
                    if self.place_initial() == Effect::NotReady {
                        deferred.rearm(delay.unwrap_or(FRAME_DURATION), tx.clone());
                    }
                }
            }
        }
    }

    /// Handle user input
    fn handle_input(&mut self) {
        let timeout = Duration::from_millis(1);

        for _ in 0..MAX_INPUTS_PER_FRAME {
            match self.input_handler.poll(timeout) {
                Some(event) => self.handle_input_event(event),
                None => break,
            }
        }
    }

    fn handle_input_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.running = false,

            InputEvent::Affirm => {
                self.dispatch(Command::Affirm);
            }

            InputEvent::FocusNo => {
                self.no_focused = true;
                self.dispatch(Command::Evade {
                    kind: TriggerKind::Keyboard,
                    pointer: None,
                });
            }

            InputEvent::ToggleDebug => self.debug = !self.debug,

            InputEvent::ToggleHelp => {
                self.show_help = !self.show_help;
                self.input_handler.set_help_visible(self.show_help);
            }

            InputEvent::CloseHelp => {
                self.show_help = false;
                self.input_handler.set_help_visible(false);
            }

            InputEvent::PointerMoved { .. }
            | InputEvent::PointerPressed { .. }
            | InputEvent::PointerDragged { .. } => {
                self.no_focused = false;
                let layout = self.layout();
                let (command, near) = pointer_command(
                    &layout,
                    self.controller.state().position(),
                    &event,
                    self.config.widget.proximity,
                    self.pointer_near,
                );
                self.pointer_near = near;
                if let Some(command) = command {
                    self.dispatch(command);
                }
            }

            InputEvent::Resize { width, height } => {
                debug!(width, height, "terminal resized");
                self.area = Rect::new(0, 0, width, height);
            }

            InputEvent::None => {}
        }
    }

    /// Layout for the current terminal area
    fn layout(&self) -> SceneLayout {
        SceneLayout::compute(self.area, &self.config.widget)
    }

    /// Run `command` against a fresh geometry snapshot
    fn dispatch(&mut self, command: Command) -> Effect {
        let geometry = self.layout().geometry(self.controller.state().position());
        let effect = self.controller.handle(command, &geometry);
        if let Effect::Moved(probe) = effect {
            self.glide_to(probe.position);
            if self.controller.state().dodges > 0 {
                self.pulse.excite(EXCITEMENT_PER_DODGE);
            }
        }
        effect
    }

    fn place_initial(&mut self) -> Effect {
        let effect = self.dispatch(Command::InitialPlacement);
        if effect == Effect::NotReady {
            debug!("layout not ready, initial placement postponed");
        }
        effect
    }

    /// Start the visual transition toward `target`
    fn glide_to(&mut self, target: Position) {
        match self.glide.as_mut() {
            Some(glide) => glide.retarget(target),
            None => {
                // First move starts from the centered home spot
                let layout = self.layout();
                let home = Position::new(
                    layout.no_home.x.saturating_sub(layout.container.x) as f32,
                    layout.no_home.y.saturating_sub(layout.container.y) as f32,
                );
                let mut glide = Glide::at(home);
                glide.retarget(target);
                self.glide = Some(glide);
            }
        }
    }

    /// Advance animations and the demo pointer by `dt` seconds
    fn update(&mut self, dt: f32) {
        if let Some(glide) = self.glide.as_mut().filter(|glide| !glide.is_settled()) {
            glide.tick(dt);
        }
        self.pulse.update(dt);

        let layout = self.layout();
        let state = *self.controller.state();
        let no = layout.no_rect(state.position());
        let injected = self
            .pursuer
            .as_mut()
            .and_then(|pursuer| pursuer.step(dt, no, layout.affirm, state.dodges));
        if let Some(event) = injected {
            self.handle_input_event(event);
        }
    }

    /// Where "No" is drawn this frame
    fn visual_no_rect(&self, layout: &SceneLayout) -> Rect {
        let committed = self.controller.state().position();
        match (&self.glide, committed) {
            (Some(glide), Some(_)) => layout.no_rect(Some(glide.current())),
            _ => layout.no_rect(committed),
        }
    }

    /// Render the entire UI.
    ///
    /// Layers, bottom to top: question or answer screen, probe overlay,
    /// status bar, help.
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let widget = &self.config.widget;
        let layout = SceneLayout::compute(area, widget);
        let state = self.controller.state();
        let beat = self.pulse.value();

        if state.is_answered() {
            AnsweredView::new(widget, theme)
                .beat(beat)
                .use_unicode(self.unicode)
                .render(layout.container, buf);
        } else {
            QuestionView::new(widget, &layout, theme)
                .no_at(self.visual_no_rect(&layout))
                .beat(beat)
                .use_unicode(self.unicode)
                .no_focused(self.no_focused)
                .render(layout.container, buf);

            if self.debug {
                let obstacles = layout.geometry(state.position()).obstacles();
                let prober = self.controller.prober();
                DebugOverlay::new(&obstacles, prober.padding(), prober.max_attempts(), theme)
                    .probe(state.last_probe)
                    .render(layout.container, buf);
            }
        }

        if area.height > 0 {
            let status_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            StatusBar::new(theme)
                .dodges(state.dodges)
                .answered(state.is_answered())
                .debug(self.debug)
                .demo(self.config.demo_mode)
                .use_unicode(self.unicode)
                .render(status_area, buf);
        }

        if self.show_help {
            HelpOverlay::new(theme).use_unicode(self.unicode).render(area, buf);
        }
    }
}

/// Leave the alternate screen and give the terminal back to the shell
fn restore_terminal<W: io::Write>(out: &mut W) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            seed: Some(42),
            ..AppConfig::default()
        }
    }

    fn laid_out_app() -> App {
        let mut app = App::new(config());
        app.handle_input_event(InputEvent::Resize {
            width: 80,
            height: 24,
        });
        app
    }

    fn no_center(app: &App) -> (u16, u16) {
        let rect = app.layout().no_rect(app.controller.state().position());
        (rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    #[test]
    fn test_pointer_enter_then_move() {
        let layout = SceneLayout::compute(Rect::new(0, 0, 80, 24), &WidgetConfig::default());
        let home = layout.no_home;
        let event = InputEvent::PointerMoved { x: home.x, y: home.y };

        let (command, near) = pointer_command(&layout, None, &event, 1, false);
        assert!(near);
        assert!(matches!(
            command,
            Some(Command::Evade {
                kind: TriggerKind::PointerEnter,
                ..
            })
        ));

        let (command, _) = pointer_command(&layout, None, &event, 1, true);
        assert!(matches!(
            command,
            Some(Command::Evade {
                kind: TriggerKind::PointerMove,
                ..
            })
        ));
    }

    #[test]
    fn test_pointer_far_away_does_nothing() {
        let layout = SceneLayout::compute(Rect::new(0, 0, 80, 24), &WidgetConfig::default());
        let event = InputEvent::PointerMoved { x: 0, y: 0 };
        assert_eq!(pointer_command(&layout, None, &event, 1, true), (None, false));
    }

    #[test]
    fn test_press_on_yes_affirms() {
        let layout = SceneLayout::compute(Rect::new(0, 0, 80, 24), &WidgetConfig::default());
        let yes = layout.affirm;
        let event = InputEvent::PointerPressed { x: yes.x, y: yes.y };
        assert_eq!(
            pointer_command(&layout, None, &event, 1, false),
            (Some(Command::Affirm), false)
        );
    }

    #[test]
    fn test_drag_near_no_evades() {
        let layout = SceneLayout::compute(Rect::new(0, 0, 80, 24), &WidgetConfig::default());
        let position = Some(Position::new(2.0, 2.0));
        let no = layout.no_rect(position);
        let event = InputEvent::PointerDragged { x: no.x, y: no.y };
        let (command, near) = pointer_command(&layout, position, &event, 0, false);
        assert!(near);
        assert_eq!(
            command,
            Some(Command::Evade {
                kind: TriggerKind::Drag,
                pointer: Some((no.x, no.y)),
            })
        );
    }

    #[test]
    fn test_placement_waits_for_layout() {
        let mut app = App::new(config());
        assert_eq!(app.place_initial(), Effect::NotReady);

        app.handle_input_event(InputEvent::Resize {
            width: 80,
            height: 24,
        });
        assert!(matches!(app.place_initial(), Effect::Moved(_)));
        assert!(app.controller.state().is_positioned());
        assert_eq!(app.controller.state().dodges, 0);
        assert!(app.glide.is_some());
    }

    #[test]
    fn test_pointer_chase_then_yes() {
        let mut app = laid_out_app();
        app.place_initial();

        let (x, y) = no_center(&app);
        app.handle_input_event(InputEvent::PointerMoved { x, y });
        assert_eq!(app.controller.state().dodges, 1);

        app.handle_input_event(InputEvent::Affirm);
        assert!(app.controller.state().is_answered());

        // Late triggers after the answer are ignored
        app.handle_input_event(InputEvent::FocusNo);
        app.handle_input_event(InputEvent::PointerPressed { x, y });
        assert_eq!(app.controller.state().dodges, 1);
    }

    #[test]
    fn test_keyboard_focus_evades() {
        let mut app = laid_out_app();
        app.place_initial();
        app.handle_input_event(InputEvent::FocusNo);
        assert_eq!(app.controller.state().dodges, 1);
        assert!(app.no_focused);
    }

    #[test]
    fn test_toggles_and_quit() {
        let mut app = laid_out_app();
        app.handle_input_event(InputEvent::ToggleDebug);
        assert!(app.debug);
        app.handle_input_event(InputEvent::ToggleHelp);
        assert!(app.show_help);
        app.handle_input_event(InputEvent::CloseHelp);
        assert!(!app.show_help);
        app.handle_input_event(InputEvent::Quit);
        assert!(!app.running);
    }

    #[test]
    fn test_render_both_screens() {
        let mut app = laid_out_app();
        app.place_initial();
        app.debug = true;
        app.show_help = true;

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);

        app.handle_input_event(InputEvent::Affirm);
        app.show_help = false;
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Perfect Choice!"));
    }

    #[test]
    fn test_demo_pursuer_eventually_answers() {
        let mut app = App::new(AppConfig {
            demo_mode: true,
            demo_give_up: 2,
            seed: Some(9),
            ..AppConfig::default()
        });
        app.handle_input_event(InputEvent::Resize {
            width: 80,
            height: 24,
        });
        app.place_initial();

        for _ in 0..2000 {
            app.update(1.0 / 30.0);
            if app.controller.state().is_answered() {
                break;
            }
        }
        assert!(app.controller.state().is_answered());
        assert!(app.controller.state().dodges >= 2);
    }
}

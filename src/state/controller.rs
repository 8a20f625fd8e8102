//! Answer state and the "No" button's committed position.
//!
//! Commands are applied to an owned [`WidgetState`] value which returns its
//! successor, so the whole state machine can be driven without a terminal:
//!
//! ```text
//! Unanswered(unplaced) -> Unanswered(placed) -> Unanswered(placed)* -> Answered
//! ```
//!
//! `Answered` is terminal; every command after it is a no-op.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::event::TriggerKind;
use crate::positioning::{Position, Probe, Prober, Rect};

use super::geometry::GeometrySource;

/// Whether the question has been answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Unanswered,
    Answered,
}

/// Where the "No" button sits
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    /// Never placed; drawn centered
    #[default]
    Unplaced,
    Placed(Position),
}

/// Inputs to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// "Yes" was chosen
    Affirm,
    /// The pointer (or focus) came for the "No" button
    Evade {
        kind: TriggerKind,
        /// Pointer cell in screen space, avoided as an extra obstacle
        pointer: Option<(u16, u16)>,
    },
    /// First placement once real geometry exists
    InitialPlacement,
}

/// What applying a command did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Unchanged,
    /// A new position was committed
    Moved(Probe),
    /// Geometry was missing or zero-sized; retry later
    NotReady,
    Answered,
}

/// Snapshot of everything the views need
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WidgetState {
    pub interaction: InteractionState,
    pub placement: Placement,
    /// Evasions committed so far (initial placement excluded)
    pub dodges: u32,
    pub last_probe: Option<Probe>,
}

impl WidgetState {
    pub fn is_answered(&self) -> bool {
        self.interaction == InteractionState::Answered
    }

    pub fn is_positioned(&self) -> bool {
        matches!(self.placement, Placement::Placed(_))
    }

    /// Committed position, if placed and still interactive
    pub fn position(&self) -> Option<Position> {
        match (self.interaction, self.placement) {
            (InteractionState::Unanswered, Placement::Placed(position)) => Some(position),
            _ => None,
        }
    }

    /// Apply `command` and return the successor state
    pub fn apply<G, R>(
        self,
        command: Command,
        geometry: &G,
        prober: &Prober,
        rng: &mut R,
    ) -> (WidgetState, Effect)
    where
        G: GeometrySource + ?Sized,
        R: Rng + ?Sized,
    {
        if self.is_answered() {
            debug!(?command, "ignoring command after answer");
            return (self, Effect::Unchanged);
        }

        match command {
            Command::Affirm => {
                info!(dodges = self.dodges, "answered yes");
                let next = WidgetState {
                    interaction: InteractionState::Answered,
                    ..self
                };
                (next, Effect::Answered)
            }

            Command::Evade { kind, pointer } => match self.place(geometry, prober, rng, pointer) {
                Some(probe) => {
                    debug!(trigger = kind.label(), x = probe.position.x, y = probe.position.y, "dodged");
                    let next = WidgetState {
                        placement: Placement::Placed(probe.position),
                        dodges: self.dodges + 1,
                        last_probe: Some(probe),
                        ..self
                    };
                    (next, Effect::Moved(probe))
                }
                None => (self, Effect::Unchanged),
            },

            Command::InitialPlacement => {
                if self.is_positioned() {
                    return (self, Effect::Unchanged);
                }
                match self.place(geometry, prober, rng, None) {
                    Some(probe) => {
                        info!(x = probe.position.x, y = probe.position.y, "initial placement");
                        let next = WidgetState {
                            placement: Placement::Placed(probe.position),
                            last_probe: Some(probe),
                            ..self
                        };
                        (next, Effect::Moved(probe))
                    }
                    None => (self, Effect::NotReady),
                }
            }
        }
    }

    fn place<G, R>(
        &self,
        geometry: &G,
        prober: &Prober,
        rng: &mut R,
        pointer: Option<(u16, u16)>,
    ) -> Option<Probe>
    where
        G: GeometrySource + ?Sized,
        R: Rng + ?Sized,
    {
        let Some(geometry) = geometry.snapshot().filter(|g| g.is_laid_out()) else {
            debug!("geometry not ready, skipping placement");
            return None;
        };

        let mut obstacles = geometry.obstacles().to_vec();
        if let Some((x, y)) = pointer {
            obstacles.push(Rect::new(x as f32, y as f32, 1.0, 1.0));
        }

        let probe = prober.probe(&geometry.container, geometry.movable.size(), &obstacles, rng);
        if probe.is_fallback() {
            warn!(attempts = probe.attempts, "no clear spot found, using corner fallback");
        }
        Some(probe)
    }
}

/// Owns the widget state together with its placement parameters and RNG
pub struct Controller<R = StdRng> {
    state: WidgetState,
    prober: Prober,
    rng: R,
}

impl<R: Rng> Controller<R> {
    pub fn new(prober: Prober, rng: R) -> Self {
        Self {
            state: WidgetState::default(),
            prober,
            rng,
        }
    }

    /// Apply a command against a fresh geometry snapshot
    pub fn handle<G: GeometrySource + ?Sized>(&mut self, command: Command, geometry: &G) -> Effect {
        let (next, effect) = self.state.apply(command, geometry, &self.prober, &mut self.rng);
        self.state = next;
        effect
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn prober(&self) -> &Prober {
        &self.prober
    }
}

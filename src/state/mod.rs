pub mod controller;
pub mod deferred;
pub mod geometry;

pub use controller::{Command, Controller, Effect, InteractionState, Placement, WidgetState};
pub use deferred::DeferredPlacement;
pub use geometry::{Geometry, GeometrySource};

pub mod types;
pub mod queue;

pub use types::*;
pub use queue::{create_event_queue, EventReceiver, EventSender};

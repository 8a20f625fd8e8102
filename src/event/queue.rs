use tokio::sync::mpsc;
use super::types::AppEvent;

/// Event queue buffer size
const QUEUE_SIZE: usize = 64;

/// Creates a new event queue channel pair
pub fn create_event_queue() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel(QUEUE_SIZE);
    (EventSender(tx), EventReceiver(rx))
}

/// Sender side of the event queue
#[derive(Clone)]
pub struct EventSender(pub mpsc::Sender<AppEvent>);

impl EventSender {
    pub async fn send(&self, event: AppEvent) -> Result<(), mpsc::error::SendError<AppEvent>> {
        self.0.send(event).await
    }
}

/// Receiver side of the event queue
pub struct EventReceiver(pub mpsc::Receiver<AppEvent>);

impl EventReceiver {
    pub async fn recv(&mut self) -> Option<AppEvent> {
        self.0.recv().await
    }

    pub fn try_recv(&mut self) -> Result<AppEvent, mpsc::error::TryRecvError> {
        self.0.try_recv()
    }
}

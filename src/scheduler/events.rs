use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use tracing::debug;

use crate::aircraft::flight_state::{FlightPhase, FlightState};

/// Notifications published by a running simulation.
#[derive(Debug, Clone)]
pub enum FlightEvent {
    /// Whole-tick snapshot, published after every applied tick.
    StateChanged(Arc<FlightState>),
    PhaseChanged { from: FlightPhase, to: FlightPhase },
    Status(String),
    /// The loop gave up; carries the rendered error.
    Fault(String),
}

impl FlightEvent {
    /// Text suitable for speech output, if the event has any.
    pub fn narration(&self) -> Option<String> {
        match self {
            FlightEvent::StateChanged(_) => None,
            FlightEvent::PhaseChanged { to, .. } => Some(format!("Flight phase: {}", to)),
            FlightEvent::Status(message) => Some(message.clone()),
            FlightEvent::Fault(message) => Some(format!("Simulation error: {}", message)),
        }
    }
}

/// Fan-out to any number of subscribers over bounded queues. Publishing never
/// blocks: a full queue loses the event, a closed one is dropped.
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<FlightEvent>>>,
    capacity: usize,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        EventBus {
            subscribers: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn subscribe(&self) -> Receiver<FlightEvent> {
        let (sender, receiver) = bounded(self.capacity);
        self.subscribers.lock().push(sender);
        receiver
    }

    pub fn publish(&self, event: FlightEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|subscriber| match subscriber.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                debug!(event = ?dropped, "subscriber queue full, event dropped");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

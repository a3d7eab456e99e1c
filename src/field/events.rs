//! Notifications emitted by the field to external listeners

use std::sync::Arc;
use tokio::sync::broadcast;

use super::mounter::MountedInstance;
use crate::domain::FieldValue;

const EVENT_BUFFER: usize = 32;

#[derive(Debug, Clone)]
pub enum FieldEvent {
    /// A form was mounted. Fired once per successful, non-superseded mount.
    FormLoad(Arc<MountedInstance>),
    /// The value was written through the value-update channel
    ValueChanged(FieldValue),
}

impl FieldEvent {
    /// Host-facing event name
    pub fn name(&self) -> &'static str {
        match self {
            FieldEvent::FormLoad(_) => "formLoad",
            FieldEvent::ValueChanged(_) => "change",
        }
    }
}

/// Broadcast hub for field events
#[derive(Debug, Clone)]
pub struct FieldEvents {
    sender: broadcast::Sender<FieldEvent>,
}

impl FieldEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FieldEvent> {
        self.sender.subscribe()
    }

    /// Deliver to current subscribers; returns how many received it.
    /// Having no listener is not an error.
    pub fn emit(&self, event: FieldEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for FieldEvents {
    fn default() -> Self {
        Self::new()
    }
}

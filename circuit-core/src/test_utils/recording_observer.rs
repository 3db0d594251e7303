//! RecordingObserver — records every event it sees.

use crate::error::ObserverError;
use crate::event::StepEvent;
use crate::observer::RunObserver;
use async_trait::async_trait;
use std::sync::Mutex;

/// An observer that records every event in order.
/// Use `.events()` to inspect what was recorded.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<StepEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot of all recorded events.
    pub fn events(&self) -> Vec<StepEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl RunObserver for RecordingObserver {
    async fn on_event(&self, event: &StepEvent) -> Result<(), ObserverError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

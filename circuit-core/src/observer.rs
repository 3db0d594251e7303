//! The observer interface: watching a run step by step.

use crate::error::ObserverError;
use crate::event::StepEvent;
use async_trait::async_trait;

/// Receives every [`StepEvent`] of a run, in order.
///
/// Observers watch; they cannot steer the run. The engine awaits each
/// observer before the next step, so handlers SHOULD complete quickly.
///
/// Implementations:
/// - `TracingObserver` (circuit-runtime): structured `tracing` events
/// - presentation layers that redraw the board per step
/// - `RecordingObserver` (test-utils): records events for assertions
#[async_trait]
pub trait RunObserver: Send + Sync {
    /// Called once per event.
    /// Returning an error does NOT stop the run; it is logged.
    async fn on_event(&self, event: &StepEvent) -> Result<(), ObserverError>;
}

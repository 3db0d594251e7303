//! Concrete [`RunObserver`] using the [`tracing`] crate.
//!
//! Emits one structured `tracing` event per step event. Wire to any
//! `tracing`-compatible subscriber.

use async_trait::async_trait;
use circuit_core::{ObserverError, RunObserver, StepEvent};

/// A [`RunObserver`] that emits structured [`tracing`] events.
///
/// Never fails; it only watches.
///
/// # Levels
///
/// | Event | Level |
/// |-------|-------|
/// | PositionChanged, MoveBlocked, CircuitActivated, ActivationIgnored | `DEBUG` |
/// | Completed, Cancelled | `INFO` |
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use circuit_engine::Engine;
/// use circuit_runtime::TracingObserver;
///
/// let mut engine = Engine::default();
/// engine.add_observer(Arc::new(TracingObserver::new()));
/// ```
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TracingObserver {
    /// Create a new `TracingObserver`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RunObserver for TracingObserver {
    async fn on_event(&self, event: &StepEvent) -> Result<(), ObserverError> {
        let name = event.name();
        match event {
            StepEvent::PositionChanged {
                step,
                command,
                from,
                to,
            } => {
                tracing::debug!(step, %command, from = %from, to = %to, "{name}");
            }
            StepEvent::MoveBlocked {
                step,
                command,
                position,
                target,
            } => {
                tracing::debug!(step, %command, position = %position, target = %target, "{name}");
            }
            StepEvent::CircuitActivated {
                step,
                cell,
                activations,
            } => {
                tracing::debug!(step, cell = %cell, activated = activations.len(), "{name}");
            }
            StepEvent::ActivationIgnored { step, position } => {
                tracing::debug!(step, position = %position, "{name}");
            }
            StepEvent::Completed {
                position,
                activations,
            } => {
                tracing::info!(position = %position, activated = activations.len(), "{name}");
            }
            StepEvent::Cancelled { applied, position } => {
                tracing::info!(applied, position = %position, "{name}");
            }
            other => {
                tracing::trace!(event = ?other, "circuit.step.other");
            }
        }
        Ok(())
    }
}

#![deny(missing_docs)]
//! Observer registry for circuit runs.
//!
//! The [`ObserverRegistry`] collects multiple [`RunObserver`]
//! implementations into an ordered pipeline. Each step event is
//! dispatched to every observer in registration order. Observer errors
//! are logged and the pipeline continues (errors don't halt the run).

use circuit_core::{RunObserver, StepEvent};
use std::sync::Arc;

/// A registry that fans step events out to an ordered list of observers.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn RunObserver>>,
}

impl ObserverRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer to the end of the pipeline.
    pub fn add(&mut self, observer: Arc<dyn RunObserver>) {
        self.observers.push(observer);
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Dispatch one event to every observer, in registration order.
    ///
    /// Returns the number of observers that failed. Failures are logged
    /// at `WARN` and never stop the dispatch.
    pub async fn dispatch(&self, event: &StepEvent) -> usize {
        let mut failures = 0;
        for (index, observer) in self.observers.iter().enumerate() {
            if let Err(e) = observer.on_event(event).await {
                failures += 1;
                tracing::warn!(
                    observer = index,
                    event = event.name(),
                    error = %e,
                    "circuit.observer.failed"
                );
            }
        }
        failures
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

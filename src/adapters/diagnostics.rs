use std::sync::{Mutex, PoisonError};
use tracing::{error, warn};

use crate::domain::DiagnosticsPort;
use crate::error::FormSelectError;

/// Reports swallowed errors as structured `tracing` events.
///
/// Fetch-layer problems are logged as errors; lookup problems caused by the
/// current selection or page layout are warnings.
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticsPort for TracingDiagnostics {
    fn report(&self, field: &str, failure: &FormSelectError) {
        let kind = failure.kind();
        match failure {
            FormSelectError::SourceUnavailable(_)
            | FormSelectError::SourceMalformed(_)
            | FormSelectError::RenderFailure(_) => {
                error!(field = field, kind = kind, "{}", failure)
            }
            FormSelectError::DescriptorNotFound(_)
            | FormSelectError::DefinitionMissing(_)
            | FormSelectError::ContainerMissing(_) => {
                warn!(field = field, kind = kind, "{}", failure)
            }
        }
    }
}

/// Keeps every report for later inspection and forwards it to tracing
#[derive(Default)]
pub struct RecordingDiagnostics {
    reports: Mutex<Vec<(String, FormSelectError)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports so far, oldest first
    pub fn reports(&self) -> Vec<(String, FormSelectError)> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Just the errors, oldest first
    pub fn errors(&self) -> Vec<FormSelectError> {
        self.reports().into_iter().map(|(_, e)| e).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl DiagnosticsPort for RecordingDiagnostics {
    fn report(&self, field: &str, failure: &FormSelectError) {
        TracingDiagnostics.report(field, failure);
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((field.to_string(), failure.clone()));
    }
}

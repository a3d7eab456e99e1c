//! Resolving a selected form and mounting it into the page

use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

use super::catalog::CatalogLoader;
use super::events::{FieldEvent, FieldEvents};
use crate::config::FormSelectConfig;
use crate::domain::{DiagnosticsPort, DocumentPort, FormRendererPort, RenderConfig, RenderedForm};
use crate::error::FormSelectError;

/// A form currently live in a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedInstance {
    pub form_id: String,
    pub container: String,
    /// Sequence number of the mount attempt that produced it
    pub sequence: u64,
    pub form: RenderedForm,
}

/// Holder of at most one live value.
///
/// Installing a value releases the previous one in the same step.
#[derive(Debug)]
pub struct MountSlot<T> {
    current: Mutex<Option<Arc<T>>>,
}

impl<T> MountSlot<T> {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    pub fn current(&self) -> Option<Arc<T>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_occupied(&self) -> bool {
        self.current().is_some()
    }

    /// Empty the slot, returning what it held
    pub fn release(&self) -> Option<Arc<T>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Release the held value and install `value`, returning the released one
    pub fn replace(&self, value: Arc<T>) -> Option<Arc<T>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(value)
    }
}

impl<T> Default for MountSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one `mount` call
#[derive(Debug, Clone)]
pub enum MountOutcome {
    Mounted(Arc<MountedInstance>),
    /// The render finished after a newer mount started; its result was dropped
    Superseded { sequence: u64 },
    Failed(FormSelectError),
}

impl MountOutcome {
    pub fn is_mounted(&self) -> bool {
        matches!(self, MountOutcome::Mounted(_))
    }

    pub fn error(&self) -> Option<&FormSelectError> {
        match self {
            MountOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Mounts the definition of a selected form into the configured container.
///
/// Every attempt that gets as far as clearing the container takes a new
/// sequence number. A render that completes after a newer attempt took its
/// number is discarded without touching the page, the slot or the listeners.
pub struct DefinitionMounter {
    config: Arc<FormSelectConfig>,
    document: Arc<dyn DocumentPort>,
    renderer: Arc<dyn FormRendererPort>,
    diagnostics: Arc<dyn DiagnosticsPort>,
    events: FieldEvents,
    render_config: RenderConfig,
    slot: MountSlot<MountedInstance>,
    sequence: AtomicU64,
}

impl DefinitionMounter {
    pub fn new(
        config: Arc<FormSelectConfig>,
        document: Arc<dyn DocumentPort>,
        renderer: Arc<dyn FormRendererPort>,
        diagnostics: Arc<dyn DiagnosticsPort>,
        events: FieldEvents,
    ) -> Self {
        Self {
            config,
            document,
            renderer,
            diagnostics,
            events,
            render_config: RenderConfig::default(),
            slot: MountSlot::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Resolve `id` against the catalog and mount its definition
    pub async fn mount(&self, catalog: &CatalogLoader, id: &str) -> MountOutcome {
        let definition = match self.resolve(catalog, id) {
            Ok(definition) => definition,
            Err(e) => return self.fail(e),
        };

        let container = self.config.form_container.as_str();
        if !self.document.has_element(container) {
            return self.fail(FormSelectError::ContainerMissing(container.to_string()));
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.slot.release() {
            debug!(field = %self.config.key, form_id = %previous.form_id, "Releasing mounted form");
        }
        self.document.clear_element(container);

        let rendered = self
            .renderer
            .create_form(container, &definition, &self.render_config)
            .await;

        if !self.is_current(sequence) {
            debug!(
                field = %self.config.key,
                form_id = id,
                sequence,
                "Discarding superseded form render"
            );
            if let Err(e) = rendered {
                self.diagnostics
                    .report(&self.config.key, &e.into_render_failure());
            }
            return MountOutcome::Superseded { sequence };
        }

        match rendered {
            Ok(form) => {
                self.document.replace_content(container, &form.markup);
                let instance = Arc::new(MountedInstance {
                    form_id: id.to_string(),
                    container: container.to_string(),
                    sequence,
                    form,
                });
                self.slot.replace(instance.clone());
                info!(field = %self.config.key, form_id = id, container, "Form loaded successfully");
                self.events.emit(FieldEvent::FormLoad(instance.clone()));
                MountOutcome::Mounted(instance)
            }
            Err(e) => self.fail(e.into_render_failure()),
        }
    }

    fn resolve(&self, catalog: &CatalogLoader, id: &str) -> Result<Value, FormSelectError> {
        let descriptor = catalog
            .find_by_id(id)
            .ok_or_else(|| FormSelectError::DescriptorNotFound(id.to_string()))?;

        descriptor
            .definition(&self.config.definition_property)
            .cloned()
            .ok_or_else(|| FormSelectError::DefinitionMissing(id.to_string()))
    }

    fn is_current(&self, sequence: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == sequence
    }

    fn fail(&self, error: FormSelectError) -> MountOutcome {
        self.diagnostics.report(&self.config.key, &error);
        MountOutcome::Failed(error)
    }

    /// The instance currently mounted, if any
    pub fn mounted(&self) -> Option<Arc<MountedInstance>> {
        self.slot.current()
    }

    /// Number of mount attempts that reached the render step
    pub fn attempts(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

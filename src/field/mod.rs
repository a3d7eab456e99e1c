//! The form select field.
//!
//! [`FormSelect`] composes three parts around the cached catalog and the
//! host-owned field value:
//! - [`CatalogLoader`] fetches and caches the selectable forms
//! - [`SelectionView`] keeps the dropdown in step with catalog and value
//! - [`DefinitionMounter`] mounts the selected form into its container
//!
//! Data only flows forward: the loader feeds the view, the view (or a
//! programmatic `set_value`) triggers the mounter, and the mounter never
//! writes to the catalog.

pub mod catalog;
pub mod events;
pub mod mounter;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{CatalogLoader, LoadOutcome};
pub use events::{FieldEvent, FieldEvents};
pub use mounter::{DefinitionMounter, MountOutcome, MountSlot, MountedInstance};
pub use selection::SelectionView;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::FormSelectConfig;
use crate::domain::{
    Catalog, CatalogSourcePort, DiagnosticsPort, DocumentPort, FieldValue, FormRendererPort,
    SelectControlPort, SetValueFlags,
};
use crate::host::{FieldBase, FieldComponent, HostOptions, InputInfo};

/// External collaborators a field is wired to
#[derive(Clone)]
pub struct Collaborators {
    pub source: Arc<dyn CatalogSourcePort>,
    pub document: Arc<dyn DocumentPort>,
    pub renderer: Arc<dyn FormRendererPort>,
    pub diagnostics: Arc<dyn DiagnosticsPort>,
}

/// Dropdown field that mounts the selected form into a separate container
pub struct FormSelect {
    config: Arc<FormSelectConfig>,
    base: FieldBase,
    loader: CatalogLoader,
    view: SelectionView,
    mounter: DefinitionMounter,
    events: FieldEvents,
}

impl FormSelect {
    pub fn new(
        config: FormSelectConfig,
        options: HostOptions,
        initial: FieldValue,
        collaborators: Collaborators,
    ) -> Self {
        let config = Arc::new(config);
        let events = FieldEvents::new();
        let base = FieldBase::new(config.key.clone(), config.label.clone(), options, initial);
        let loader = CatalogLoader::new(
            collaborators.source,
            collaborators.diagnostics.clone(),
            config.key.clone(),
            config.value_property.clone(),
        );
        let view = SelectionView::new(config.clone());
        let mounter = DefinitionMounter::new(
            config.clone(),
            collaborators.document,
            collaborators.renderer,
            collaborators.diagnostics,
            events.clone(),
        );

        Self {
            config,
            base,
            loader,
            view,
            mounter,
            events,
        }
    }

    pub fn config(&self) -> &FormSelectConfig {
        &self.config
    }

    /// Listen for `formLoad` and value change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<FieldEvent> {
        self.events.subscribe()
    }

    /// Reload the catalog from the configured source and, on success,
    /// repopulate the dropdown
    pub async fn load_forms(&self) -> LoadOutcome {
        let outcome = self.loader.load(&self.config.data_url).await;
        if outcome.is_loaded() {
            self.refresh();
        }
        outcome
    }

    /// Repopulate the dropdown from the cached catalog. `None` before attach.
    pub fn refresh(&self) -> Option<usize> {
        self.view.refresh(&self.loader.snapshot(), &self.base.data_value())
    }

    /// Handle a user-driven change of the control's selection.
    ///
    /// Writes the selected value through the value-update channel and mounts
    /// it when non-empty. Returns `None` when nothing was mounted.
    pub async fn on_select_change(&self) -> Option<MountOutcome> {
        let value = self.view.selected()?;
        if self.base.update_value(value.clone()) {
            self.events.emit(FieldEvent::ValueChanged(value.clone()));
        }

        match value.as_option() {
            Some(id) => Some(self.mount(id).await),
            None => None,
        }
    }

    /// Mount the form with identifier `id`
    pub async fn mount(&self, id: &str) -> MountOutcome {
        self.mounter.mount(&self.loader, id).await
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.loader.snapshot()
    }

    pub fn mounted(&self) -> Option<Arc<MountedInstance>> {
        self.mounter.mounted()
    }

    pub fn mount_attempts(&self) -> u64 {
        self.mounter.attempts()
    }

    /// Input description: a select with the host's defaults
    pub fn input_info(&self) -> InputInfo {
        InputInfo {
            input_type: "select".to_string(),
            ..self.base.input_info()
        }
    }
}

#[async_trait]
impl FieldComponent for FormSelect {
    fn component_type(&self) -> &str {
        &self.config.component_type
    }

    async fn init(&self) {
        self.load_forms().await;
    }

    fn render(&self) -> String {
        self.base
            .render(&self.view.render_markup(self.base.options().read_only))
    }

    async fn attach(&self, control: Arc<dyn SelectControlPort>) -> bool {
        self.view.attach(control);
        self.refresh();
        true
    }

    fn get_value(&self) -> FieldValue {
        self.base.data_value()
    }

    async fn on_change(&self) {
        if self.base.options().read_only {
            debug!(field = %self.config.key, "Ignoring change on read-only field");
            return;
        }
        self.on_select_change().await;
    }

    async fn set_value(&self, value: FieldValue, flags: SetValueFlags) -> bool {
        let changed = self.base.set_value(value.clone(), flags);
        if !self.view.is_attached() {
            return changed;
        }
        self.view.display(&value);

        match value.as_option() {
            Some(id) if !flags.no_load => {
                self.mount(id).await;
            }
            Some(id) => debug!(field = %self.config.key, form_id = id, "Value restored without mounting"),
            None => {}
        }

        changed
    }
}

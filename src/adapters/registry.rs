//! Process-wide registry of field component types.
//!
//! Components are registered once at startup and never removed. The core
//! field logic does not depend on this module; it only wires the
//! `formselect` type to [`FormSelect`] for hosts that instantiate fields by
//! type name.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::info;

use crate::config::{FormSelectConfig, COMPONENT_TYPE};
use crate::domain::FieldValue;
use crate::error::RegistryError;
use crate::field::{Collaborators, FormSelect};
use crate::host::{FieldComponent, HostOptions};

/// Builds a component from its JSON definition
pub type ComponentFactory = fn(
    &Value,
    HostOptions,
    FieldValue,
    Collaborators,
) -> Result<Arc<dyn FieldComponent>, RegistryError>;

#[derive(Clone)]
pub struct ComponentEntry {
    pub builder_info: Value,
    pub edit_form: Value,
    pub factory: ComponentFactory,
}

static REGISTRY: OnceLock<RwLock<HashMap<String, ComponentEntry>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<String, ComponentEntry>> {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

fn build_form_select(
    component: &Value,
    options: HostOptions,
    initial: FieldValue,
    collaborators: Collaborators,
) -> Result<Arc<dyn FieldComponent>, RegistryError> {
    let config = FormSelectConfig::from_value(component)?;
    Ok(Arc::new(FormSelect::new(config, options, initial, collaborators)))
}

/// Register the `formselect` component. Returns false when it already was.
pub fn register() -> bool {
    let mut entries = registry().write().unwrap_or_else(PoisonError::into_inner);
    if entries.contains_key(COMPONENT_TYPE) {
        return false;
    }
    entries.insert(
        COMPONENT_TYPE.to_string(),
        ComponentEntry {
            builder_info: FormSelectConfig::builder_info(),
            edit_form: FormSelectConfig::edit_form(),
            factory: build_form_select,
        },
    );
    info!(component = COMPONENT_TYPE, "Registered field component");
    true
}

pub fn lookup(component_type: &str) -> Option<ComponentEntry> {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(component_type)
        .cloned()
}

/// Instantiate a component from its JSON definition, dispatching on `type`
pub fn create(
    component: &Value,
    options: HostOptions,
    initial: FieldValue,
    collaborators: Collaborators,
) -> Result<Arc<dyn FieldComponent>, RegistryError> {
    let component_type = component
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or(COMPONENT_TYPE);
    let entry = lookup(component_type)
        .ok_or_else(|| RegistryError::UnknownType(component_type.to_string()))?;
    (entry.factory)(component, options, initial, collaborators)
}

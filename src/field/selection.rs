//! Dropdown rendering and synchronization

use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::config::FormSelectConfig;
use crate::domain::{Catalog, FieldValue, SelectControlPort, SelectOption};
use crate::host::escape_html;

/// Keeps the select control's options and selection consistent with the
/// catalog and the field value.
pub struct SelectionView {
    config: Arc<FormSelectConfig>,
    control: RwLock<Option<Arc<dyn SelectControlPort>>>,
}

impl SelectionView {
    pub fn new(config: Arc<FormSelectConfig>) -> Self {
        Self {
            config,
            control: RwLock::new(None),
        }
    }

    /// Control markup: one labeled select holding only the placeholder option
    pub fn render_markup(&self, disabled: bool) -> String {
        let key = escape_html(&self.config.key);
        format!(
            "<div ref=\"element\"><select ref=\"select\" class=\"form-control\" id=\"{key}\"{disabled}><option value=\"\">{placeholder}</option></select></div>",
            key = key,
            disabled = if disabled { " disabled" } else { "" },
            placeholder = escape_html(&self.config.placeholder),
        )
    }

    /// Bind the rendered control, replacing any previous one
    pub fn attach(&self, control: Arc<dyn SelectControlPort>) {
        *self.control.write().unwrap_or_else(PoisonError::into_inner) = Some(control);
    }

    pub fn control(&self) -> Option<Arc<dyn SelectControlPort>> {
        self.control
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_attached(&self) -> bool {
        self.control().is_some()
    }

    /// Repopulate the options from `catalog` and select `value`.
    ///
    /// Everything after the placeholder is removed first, so repeated calls
    /// with the same inputs leave the same options. Returns the resulting
    /// option count, or `None` when no control is attached yet.
    pub fn refresh(&self, catalog: &Catalog, value: &FieldValue) -> Option<usize> {
        let control = self.control()?;

        while control.option_count() > 1 {
            control.remove_option(1);
        }
        if control.option_count() == 0 {
            control.append_option(SelectOption::new("", self.config.placeholder.clone()));
        }

        for form in catalog.iter() {
            let Some(id) = form.id(&self.config.value_property) else {
                debug!(field = %self.config.key, "Skipping catalog entry without an identifier");
                continue;
            };
            let text = form.label(&self.config.search_field, &self.config.value_property);
            control.append_option(SelectOption::new(id, text));
        }

        control.set_value(value.as_str());
        Some(control.option_count())
    }

    /// Show `value` as the selected option without touching the option set
    pub fn display(&self, value: &FieldValue) {
        if let Some(control) = self.control() {
            control.set_value(value.as_str());
        }
    }

    /// Value currently selected in the control
    pub fn selected(&self) -> Option<FieldValue> {
        self.control().map(|control| FieldValue::from(control.value()))
    }
}

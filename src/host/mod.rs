//! Interface between the component and the host field framework.
//!
//! The host calls into a component through [`FieldComponent`]. Behavior every
//! field shares (label markup, data value storage, the value-update channel)
//! lives in [`FieldBase`]; components own one and compose it explicitly:
//! `render` builds the control markup and hands it to `FieldBase::render`,
//! which wraps it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{FieldValue, SelectControlPort, SetValueFlags};

/// Options the host passes to every component it instantiates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostOptions {
    /// Render the control disabled and ignore user changes
    pub read_only: bool,
}

/// Description of the field's input element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInfo {
    #[serde(rename = "type")]
    pub input_type: String,
    pub class: String,
    pub id: String,
}

/// Lifecycle hooks the host framework invokes on a component
#[async_trait]
pub trait FieldComponent: Send + Sync {
    /// Type name the component is registered under
    fn component_type(&self) -> &str;

    /// Called once after construction
    async fn init(&self);

    /// Markup for the field, including the host's wrapper
    fn render(&self) -> String;

    /// Bind the rendered control. Returns whether the control was accepted.
    async fn attach(&self, control: Arc<dyn SelectControlPort>) -> bool;

    fn get_value(&self) -> FieldValue;

    /// The bound control's selection was changed by the user
    async fn on_change(&self);

    /// Programmatic assignment. Returns whether the stored value changed.
    async fn set_value(&self, value: FieldValue, flags: SetValueFlags) -> bool;
}

/// Default field behavior supplied by the host
#[derive(Debug)]
pub struct FieldBase {
    key: String,
    label: String,
    options: HostOptions,
    data_value: RwLock<FieldValue>,
}

impl FieldBase {
    pub fn new(key: impl Into<String>, label: impl Into<String>, options: HostOptions, initial: FieldValue) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            options,
            data_value: RwLock::new(initial),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn options(&self) -> &HostOptions {
        &self.options
    }

    /// Wrap component markup with the field's label
    pub fn render(&self, content: &str) -> String {
        format!(
            "<div class=\"form-group formio-component formio-component-{key}\"><label class=\"col-form-label\" for=\"{key}\">{label}</label>{content}</div>",
            key = escape_html(&self.key),
            label = escape_html(&self.label),
            content = content,
        )
    }

    /// Host default input description; components adjust it
    pub fn input_info(&self) -> InputInfo {
        InputInfo {
            input_type: "input".to_string(),
            class: "form-control".to_string(),
            id: self.key.clone(),
        }
    }

    pub fn data_value(&self) -> FieldValue {
        self.data_value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Value-update channel used for user-driven changes.
    /// Returns whether the stored value changed.
    pub fn update_value(&self, value: FieldValue) -> bool {
        let mut current = self
            .data_value
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if *current == value {
            return false;
        }
        *current = value;
        true
    }

    /// Host default for programmatic assignment
    pub fn set_value(&self, value: FieldValue, _flags: SetValueFlags) -> bool {
        self.update_value(value)
    }
}

/// Escape text for use inside HTML content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> FieldBase {
        FieldBase::new("pickForm", "Pick <one>", HostOptions::default(), FieldValue::empty())
    }

    #[test]
    fn test_render_wraps_content_with_label() {
        let html = base().render("<select></select>");
        assert!(html.starts_with("<div class=\"form-group formio-component formio-component-pickForm\">"));
        assert!(html.contains("<label class=\"col-form-label\" for=\"pickForm\">Pick &lt;one&gt;</label>"));
        assert!(html.ends_with("<select></select></div>"));
    }

    #[test]
    fn test_update_value_reports_change() {
        let base = base();
        assert!(base.update_value(FieldValue::from("f1")));
        assert!(!base.update_value(FieldValue::from("f1")));
        assert_eq!(base.data_value(), FieldValue::from("f1"));
        assert!(base.update_value(FieldValue::empty()));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a & "b" <c>"#), "a &amp; &quot;b&quot; &lt;c&gt;");
    }

    #[test]
    fn test_host_options_from_json() {
        let options: HostOptions = serde_json::from_str(r#"{"readOnly": true}"#).unwrap();
        assert!(options.read_only);
        assert!(!HostOptions::default().read_only);
    }
}

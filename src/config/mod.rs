use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub mod validator;

use crate::cli::Cli;

pub const DEFAULT_DATA_URL: &str = "http://localhost:3000/forms";
pub const DEFAULT_VALUE_PROPERTY: &str = "formId";
pub const DEFAULT_FORM_CONTAINER: &str = "formio";
pub const DEFAULT_PLACEHOLDER: &str = "Select a form";
pub const DEFAULT_DEFINITION_PROPERTY: &str = "formDefinition";
pub const COMPONENT_TYPE: &str = "formselect";

/// Settings for the demo binary
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub field: FormSelectConfig,
    #[serde(default)]
    pub page: PageSettings,
}

/// Elements present on the page the field is hosted in
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageSettings {
    /// Ids of the elements forms can be mounted into
    #[serde(default = "default_containers")]
    pub containers: Vec<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            containers: default_containers(),
        }
    }
}

fn default_containers() -> Vec<String> {
    vec![DEFAULT_FORM_CONTAINER.to_string()]
}

/// Per-field configuration, as stored in the host's component JSON.
///
/// Keys are camelCase on the wire. The settings file may use either the
/// camelCase or the snake_case spelling; the settings loader lowercases keys,
/// so each field also answers to its all-lowercase form. Immutable once the
/// field is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormSelectConfig {
    #[serde(rename = "type", alias = "component_type")]
    pub component_type: String,
    pub key: String,
    pub label: String,
    pub placeholder: String,
    /// Catalog source locator
    #[serde(alias = "data_url", alias = "dataurl")]
    pub data_url: String,
    /// Field holding each form's identifier
    #[serde(alias = "value_property", alias = "valueproperty")]
    pub value_property: String,
    /// Field used as each option's display text
    #[serde(alias = "search_field", alias = "searchfield")]
    pub search_field: String,
    /// Id of the element the selected form is mounted into
    #[serde(alias = "form_container", alias = "formcontainer")]
    pub form_container: String,
    /// Field holding each form's embedded definition
    #[serde(alias = "definition_property", alias = "definitionproperty")]
    pub definition_property: String,
}

impl Default for FormSelectConfig {
    fn default() -> Self {
        Self {
            component_type: COMPONENT_TYPE.to_string(),
            key: "formselect".to_string(),
            label: "Form Select".to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            data_url: DEFAULT_DATA_URL.to_string(),
            value_property: DEFAULT_VALUE_PROPERTY.to_string(),
            search_field: DEFAULT_VALUE_PROPERTY.to_string(),
            form_container: DEFAULT_FORM_CONTAINER.to_string(),
            definition_property: DEFAULT_DEFINITION_PROPERTY.to_string(),
        }
    }
}

impl FormSelectConfig {
    /// Read a component JSON object, filling unspecified keys with defaults
    pub fn from_value(component: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(component)
    }

    /// Default component schema
    pub fn schema() -> Value {
        serde_json::to_value(Self::default()).unwrap_or(Value::Null)
    }

    /// Palette entry shown by the form builder
    pub fn builder_info() -> Value {
        json!({
            "title": "Form Select",
            "icon": "list",
            "group": "basic",
            "weight": 0,
            "schema": Self::schema(),
        })
    }

    /// Tabs of the builder's edit dialog for this component
    pub fn edit_form() -> Value {
        json!({
            "components": [
                {
                    "key": "data",
                    "components": [
                        text_setting("dataUrl", "Data URL", DEFAULT_DATA_URL),
                        text_setting("valueProperty", "Value Property", DEFAULT_VALUE_PROPERTY),
                        text_setting("searchField", "Search Field", DEFAULT_VALUE_PROPERTY),
                        {
                            "type": "textfield",
                            "key": "formContainer",
                            "label": "Form Container ID",
                            "input": true,
                            "placeholder": DEFAULT_FORM_CONTAINER,
                            "defaultValue": DEFAULT_FORM_CONTAINER,
                            "tooltip": "The ID of the HTML element where the selected form will be rendered",
                        },
                    ],
                },
                {
                    "key": "display",
                    "components": [
                        {"type": "textfield", "key": "label", "label": "Label", "input": true},
                        {
                            "type": "textfield",
                            "key": "placeholder",
                            "label": "Placeholder",
                            "input": true,
                            "defaultValue": DEFAULT_PLACEHOLDER,
                        },
                    ],
                },
                {"key": "validation", "ignore": false},
            ]
        })
    }
}

fn text_setting(key: &str, label: &str, default: &str) -> Value {
    json!({
        "type": "textfield",
        "key": key,
        "label": label,
        "input": true,
        "placeholder": default,
        "defaultValue": default,
    })
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, then env, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(cli.config.clone()).required(false))
            .add_source(Environment::with_prefix("FORMSELECT").separator("__"))
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.apply_cli_overrides(cli);
        settings.validate()?;

        Ok(settings)
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = std::path::Path::new(root).join("formselect");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("FORMSELECT").separator("__"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(data_url) = &cli.data_url {
            self.field.data_url = data_url.clone();
        }
        if let Some(value_property) = &cli.value_property {
            self.field.value_property = value_property.clone();
        }
        if let Some(search_field) = &cli.search_field {
            self.field.search_field = search_field.clone();
        }
        if let Some(container) = &cli.container {
            self.field.form_container = container.clone();
            if !self.page.containers.contains(container) {
                self.page.containers.push(container.clone());
            }
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(&self.field).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}

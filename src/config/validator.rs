use thiserror::Error;

use crate::config::FormSelectConfig;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &FormSelectConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let required = [
            ("key", &config.key),
            ("dataUrl", &config.data_url),
            ("valueProperty", &config.value_property),
            ("searchField", &config.search_field),
            ("formContainer", &config.form_container),
            ("definitionProperty", &config.definition_property),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(ValidationError::MissingField(field.to_string()));
            }
        }

        if !config.data_url.trim().is_empty() {
            if let Err(e) = Self::validate_data_url(&config.data_url) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_data_url(data_url: &str) -> Result<(), ValidationError> {
        let url = reqwest::Url::parse(data_url).map_err(|e| ValidationError::InvalidValue {
            field: "dataUrl".to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ValidationError::InvalidValue {
                field: "dataUrl".to_string(),
                reason: format!("Unsupported scheme '{}', expected http or https", other),
            }),
        }
    }
}

//! Error types for the form select component

use thiserror::Error;

/// Errors raised while loading the catalog or mounting a selected form.
///
/// None of these ever reach the host field framework: every operation that
/// produces one reports it to the diagnostics port and leaves the rest of
/// the component state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormSelectError {
    /// Transport-level failure while fetching the catalog
    #[error("Catalog source unavailable: {0}")]
    SourceUnavailable(String),

    /// The catalog response could not be parsed as a list of forms
    #[error("Catalog response malformed: {0}")]
    SourceMalformed(String),

    /// No catalog entry carries the requested identifier
    #[error("Form not found with ID: {0}")]
    DescriptorNotFound(String),

    /// The catalog entry has no embedded form definition
    #[error("Form definition not found for form with ID: {0}")]
    DefinitionMissing(String),

    /// The configured mount container is not present in the page
    #[error("Form container not found with ID: {0}")]
    ContainerMissing(String),

    /// The form renderer rejected the definition
    #[error("Error loading form: {0}")]
    RenderFailure(String),
}

impl FormSelectError {
    /// Stable snake-case name of the error kind, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceUnavailable(_) => "source_unavailable",
            Self::SourceMalformed(_) => "source_malformed",
            Self::DescriptorNotFound(_) => "descriptor_not_found",
            Self::DefinitionMissing(_) => "definition_missing",
            Self::ContainerMissing(_) => "container_missing",
            Self::RenderFailure(_) => "render_failure",
        }
    }

    /// Whether the error belongs to the catalog fetch layer
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::SourceUnavailable(_) | Self::SourceMalformed(_))
    }

    /// Re-tag any renderer error as a render failure
    pub(crate) fn into_render_failure(self) -> Self {
        match self {
            Self::RenderFailure(_) => self,
            other => Self::RenderFailure(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for FormSelectError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FormSelectError::SourceMalformed(err.to_string())
        } else if err.is_connect() {
            FormSelectError::SourceUnavailable(format!("Connection error: {}", err))
        } else {
            FormSelectError::SourceUnavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FormSelectError {
    fn from(err: serde_json::Error) -> Self {
        FormSelectError::SourceMalformed(err.to_string())
    }
}

/// Errors raised by the process-wide component registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No component was registered under this type name
    #[error("Unknown component type: {0}")]
    UnknownType(String),

    /// The component JSON could not be read as a field configuration
    #[error("Invalid component definition: {0}")]
    InvalidComponent(#[from] serde_json::Error),
}

/// Result type alias for form select operations
pub type FormSelectResult<T> = Result<T, FormSelectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(FormSelectError::DescriptorNotFound("x".into()).kind(), "descriptor_not_found");
        assert_eq!(FormSelectError::RenderFailure("x".into()).kind(), "render_failure");
    }

    #[test]
    fn test_fetch_layer_classification() {
        assert!(FormSelectError::SourceUnavailable("down".into()).is_fetch_error());
        assert!(FormSelectError::SourceMalformed("bad".into()).is_fetch_error());
        assert!(!FormSelectError::ContainerMissing("formio".into()).is_fetch_error());
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err: FormSelectError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), "source_malformed");
    }

    #[test]
    fn test_render_failure_retag() {
        let err = FormSelectError::SourceMalformed("nope".into()).into_render_failure();
        assert!(matches!(err, FormSelectError::RenderFailure(msg) if msg.contains("nope")));
    }
}

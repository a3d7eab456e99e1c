//! Core types and ports of the form select component.
//!
//! The component talks to four collaborators it does not own: the catalog
//! source, the page document, the form renderer and the diagnostics sink.
//! Each is a trait here; `crate::adapters` holds the concrete implementations.

use async_trait::async_trait;
use serde_json::Value;

pub mod descriptor;
pub mod render;
pub mod value;

pub use descriptor::{Catalog, FormDescriptor};
pub use render::{RenderConfig, RenderedForm, SanitizeConfig};
pub use value::{FieldValue, SetValueFlags};

use crate::error::{FormSelectError, FormSelectResult};

/// Source of the raw catalog document
#[async_trait]
pub trait CatalogSourcePort: Send + Sync {
    /// Fetch the catalog from `locator`, returning the decoded JSON body.
    ///
    /// Transport failures map to `SourceUnavailable`, undecodable bodies to
    /// `SourceMalformed`. Implementations impose no timeout and no retry.
    async fn fetch(&self, locator: &str) -> FormSelectResult<Value>;
}

/// DOM-like view of the page the form gets mounted into
pub trait DocumentPort: Send + Sync {
    /// Whether an element with this id exists
    fn has_element(&self, id: &str) -> bool;

    /// Remove all content of the element. Returns false when it does not exist.
    fn clear_element(&self, id: &str) -> bool;

    /// Replace the full content of the element. Returns false when it does not exist.
    fn replace_content(&self, id: &str, markup: &str) -> bool;

    /// Current content of the element
    fn element_content(&self, id: &str) -> Option<String>;
}

/// One `<option>` of a select control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            selected: false,
        }
    }
}

/// The rendered `<select>` element the field attaches to
pub trait SelectControlPort: Send + Sync {
    /// All options in document order, with the selected one flagged
    fn options(&self) -> Vec<SelectOption>;

    fn option_count(&self) -> usize {
        self.options().len()
    }

    /// Remove the option at `index`; out of range is a no-op
    fn remove_option(&self, index: usize);

    /// Append an option at the end
    fn append_option(&self, option: SelectOption);

    /// Value of the selected option, empty when nothing is selected
    fn value(&self) -> String;

    /// Select the first option whose value equals `value`. When none matches
    /// the control ends up with no selection.
    fn set_value(&self, value: &str);
}

/// Form rendering collaborator
///
/// Renderers build the form off-page and hand back its markup; attaching the
/// markup to the container is left to the caller so that a superseded render
/// never touches the page.
#[async_trait]
pub trait FormRendererPort: Send + Sync {
    async fn create_form(
        &self,
        container: &str,
        definition: &Value,
        config: &RenderConfig,
    ) -> FormSelectResult<RenderedForm>;
}

/// Diagnostic sink for errors the component swallows
pub trait DiagnosticsPort: Send + Sync {
    /// Report a failure of the field identified by `field`
    fn report(&self, field: &str, error: &FormSelectError);
}

//! Render configuration handed to the form renderer

use serde::{Deserialize, Serialize};

/// Markup sanitization allow-list extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeConfig {
    /// Tags allowed on top of the renderer's defaults
    pub add_tags: Vec<String>,
    /// Attributes allowed on top of the renderer's defaults
    pub add_attr: Vec<String>,
}

impl SanitizeConfig {
    /// Allow inline `svg`/`path` icons in embedded markup
    pub fn vector_graphics() -> Self {
        Self {
            add_tags: vec!["svg".to_string(), "path".to_string()],
            add_attr: vec!["d".to_string(), "viewBox".to_string()],
        }
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        self.add_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn allows_attr(&self, attr: &str) -> bool {
        self.add_attr.iter().any(|a| a.eq_ignore_ascii_case(attr))
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self::vector_graphics()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    pub sanitize_config: SanitizeConfig,
}

/// A form built by the renderer, not yet attached to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedForm {
    /// Markup to place in the container
    pub markup: String,
    /// Title from the definition, when it has one
    pub title: Option<String>,
    /// Keys of the top-level components, in order
    pub component_keys: Vec<String>,
}

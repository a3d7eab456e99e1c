use serde::{Deserialize, Serialize};

/// Identifier of the selected form, or empty.
///
/// The host framework owns this value; an empty string and an absent value
/// are the same thing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub struct FieldValue(Option<String>);

impl FieldValue {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The identifier, or `""` when empty
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    pub fn as_option(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        Self(value.filter(|v| !v.is_empty()))
    }
}

impl From<FieldValue> for Option<String> {
    fn from(value: FieldValue) -> Self {
        value.0
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Some(value).into()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags accepted by `set_value`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetValueFlags {
    /// Update the displayed selection without mounting the form
    #[serde(default)]
    pub no_load: bool,
}

impl SetValueFlags {
    pub fn no_load() -> Self {
        Self { no_load: true }
    }
}

//! Catalog entries and the catalog snapshot

use serde_json::Value;

use crate::error::{FormSelectError, FormSelectResult};

/// One selectable form, kept as the raw JSON object the source returned.
///
/// Field names are configurable per field, so lookups take the name to read.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDescriptor(Value);

impl FormDescriptor {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Text form of a scalar field. Strings come back as-is, numbers and
    /// booleans in their JSON spelling; anything else is `None`.
    pub fn field_text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Identifier under `value_property`
    pub fn id(&self, value_property: &str) -> Option<String> {
        self.field_text(value_property).filter(|id| !id.is_empty())
    }

    /// Display text: `search_field`, falling back to the identifier
    pub fn label(&self, search_field: &str, value_property: &str) -> String {
        self.field_text(search_field)
            .or_else(|| self.id(value_property))
            .unwrap_or_default()
    }

    /// Embedded form definition. Null, `false`, empty strings and empty
    /// objects or arrays all count as missing.
    pub fn definition(&self, definition_property: &str) -> Option<&Value> {
        let definition = self.0.get(definition_property)?;
        let present = match definition {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Number(_) => true,
        };
        present.then_some(definition)
    }
}

/// Ordered snapshot of the selectable forms.
///
/// Identifiers are expected to be unique but this is not checked: lookups
/// return the first entry in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<FormDescriptor>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(entries: Vec<FormDescriptor>) -> Self {
        Self { entries }
    }

    /// Parse a catalog response. It must be a JSON array of objects.
    pub fn from_value(raw: Value) -> FormSelectResult<Self> {
        let Value::Array(items) = raw else {
            return Err(FormSelectError::SourceMalformed(format!(
                "expected a JSON array of forms, got {}",
                json_kind(&raw)
            )));
        };

        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if item.is_object() {
                    Ok(FormDescriptor::new(item))
                } else {
                    Err(FormSelectError::SourceMalformed(format!(
                        "catalog entry {} is {}, expected an object",
                        index,
                        json_kind(&item)
                    )))
                }
            })
            .collect::<FormSelectResult<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// First entry whose identifier equals `id`
    pub fn find_by_id(&self, id: &str, value_property: &str) -> Option<&FormDescriptor> {
        self.entries
            .iter()
            .find(|form| form.id(value_property).as_deref() == Some(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

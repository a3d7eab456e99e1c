//! In-memory page model: element contents by id and a select control

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::{DocumentPort, SelectControlPort, SelectOption};

/// Page holding elements addressed by id, each with its inner markup
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    elements: Mutex<HashMap<String, String>>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with one empty element per id
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let document = Self::new();
        for id in ids {
            document.insert_element(id, "");
        }
        document
    }

    pub fn insert_element(&self, id: impl Into<String>, content: impl Into<String>) {
        self.lock().insert(id.into(), content.into());
    }

    pub fn remove_element(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentPort for InMemoryDocument {
    fn has_element(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    fn clear_element(&self, id: &str) -> bool {
        match self.lock().get_mut(id) {
            Some(content) => {
                content.clear();
                true
            }
            None => false,
        }
    }

    fn replace_content(&self, id: &str, markup: &str) -> bool {
        match self.lock().get_mut(id) {
            Some(content) => {
                *content = markup.to_string();
                true
            }
            None => false,
        }
    }

    fn element_content(&self, id: &str) -> Option<String> {
        self.lock().get(id).cloned()
    }
}

#[derive(Debug, Default)]
struct SelectState {
    options: Vec<(String, String)>,
    selected: Option<usize>,
}

/// Single-choice select control.
///
/// Follows browser rules: a non-empty select always has a selection unless
/// it was set to a value no option carries, and removing the selected option
/// falls back to the first one.
#[derive(Debug, Default)]
pub struct InMemorySelect {
    state: Mutex<SelectState>,
}

impl InMemorySelect {
    /// Control as rendered by the field: just the placeholder option
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        let select = Self::default();
        select.append_option(SelectOption::new("", placeholder));
        select
    }

    /// Simulate the user picking `value`
    pub fn choose(&self, value: &str) {
        self.set_value(value);
    }

    /// Display texts in document order
    pub fn texts(&self) -> Vec<String> {
        self.lock().options.iter().map(|(_, text)| text.clone()).collect()
    }

    /// Values in document order
    pub fn values(&self) -> Vec<String> {
        self.lock().options.iter().map(|(value, _)| value.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SelectState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SelectControlPort for InMemorySelect {
    fn options(&self) -> Vec<SelectOption> {
        let state = self.lock();
        state
            .options
            .iter()
            .enumerate()
            .map(|(index, (value, text))| SelectOption {
                value: value.clone(),
                text: text.clone(),
                selected: state.selected == Some(index),
            })
            .collect()
    }

    fn option_count(&self) -> usize {
        self.lock().options.len()
    }

    fn remove_option(&self, index: usize) {
        let mut state = self.lock();
        if index >= state.options.len() {
            return;
        }
        state.options.remove(index);
        state.selected = match state.selected {
            Some(selected) if selected == index => (!state.options.is_empty()).then_some(0),
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
    }

    fn append_option(&self, option: SelectOption) {
        let mut state = self.lock();
        state.options.push((option.value, option.text));
        if option.selected || (state.selected.is_none() && state.options.len() == 1) {
            state.selected = Some(state.options.len() - 1);
        }
    }

    fn value(&self) -> String {
        let state = self.lock();
        state
            .selected
            .and_then(|index| state.options.get(index))
            .map(|(value, _)| value.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, value: &str) {
        let mut state = self.lock();
        state.selected = state.options.iter().position(|(v, _)| v == value);
    }
}

//! Test doubles shared by the field tests

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use super::{Collaborators, FormSelect};
use crate::adapters::diagnostics::RecordingDiagnostics;
use crate::adapters::document::{InMemoryDocument, InMemorySelect};
use crate::adapters::renderer::StaticFormRenderer;
use crate::config::FormSelectConfig;
use crate::domain::{
    CatalogSourcePort, DocumentPort, FieldValue, FormRendererPort, RenderConfig, RenderedForm,
};
use crate::error::{FormSelectError, FormSelectResult};
use crate::host::HostOptions;

/// Source answering every fetch with the same response
pub struct StaticSource {
    response: Mutex<FormSelectResult<Value>>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn ok(value: Value) -> Self {
        Self {
            response: Mutex::new(Ok(value)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn err(error: FormSelectError) -> Self {
        Self {
            response: Mutex::new(Err(error)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn respond_with(&self, response: FormSelectResult<Value>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSourcePort for StaticSource {
    async fn fetch(&self, _locator: &str) -> FormSelectResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.lock().unwrap().clone()
    }
}

/// Source whose responses are released by the test, keyed by locator
#[derive(Default)]
pub struct GatedSource {
    gates: Mutex<HashMap<String, oneshot::Receiver<FormSelectResult<Value>>>>,
}

impl GatedSource {
    pub fn gate(&self, locator: &str) -> oneshot::Sender<FormSelectResult<Value>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(locator.to_string(), rx);
        tx
    }
}

#[async_trait]
impl CatalogSourcePort for GatedSource {
    async fn fetch(&self, locator: &str) -> FormSelectResult<Value> {
        let gate = self.gates.lock().unwrap().remove(locator);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FormSelectError::SourceUnavailable("gate dropped".into()))),
            None => Err(FormSelectError::SourceUnavailable(format!("no gate for {}", locator))),
        }
    }
}

/// Renderer whose results are released by the test, keyed by definition title
#[derive(Default)]
pub struct GatedRenderer {
    gates: Mutex<HashMap<String, oneshot::Receiver<FormSelectResult<RenderedForm>>>>,
    calls: AtomicUsize,
}

impl GatedRenderer {
    pub fn gate(&self, title: &str) -> oneshot::Sender<FormSelectResult<RenderedForm>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(title.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FormRendererPort for GatedRenderer {
    async fn create_form(
        &self,
        _container: &str,
        definition: &Value,
        _config: &RenderConfig,
    ) -> FormSelectResult<RenderedForm> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let title = definition["title"].as_str().unwrap_or_default().to_string();
        let gate = self.gates.lock().unwrap().remove(&title);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FormSelectError::RenderFailure("gate dropped".into()))),
            None => Err(FormSelectError::RenderFailure(format!("no gate for {}", title))),
        }
    }
}

pub fn rendered(title: &str) -> RenderedForm {
    RenderedForm {
        markup: format!("<form><h3>{}</h3></form>", title),
        title: Some(title.to_string()),
        component_keys: vec![],
    }
}

/// Two forms with embedded definitions plus one without
pub fn sample_catalog() -> Value {
    json!([
        {
            "formId": "f1",
            "name": "Intake",
            "formDefinition": {
                "title": "Intake",
                "components": [{"type": "textfield", "key": "firstName", "label": "First name"}]
            }
        },
        {
            "formId": "f2",
            "name": "Survey",
            "formDefinition": {
                "title": "Survey",
                "components": [{"type": "radio", "key": "rating", "label": "Rating"}]
            }
        },
        {"formId": "f3", "name": "Draft"}
    ])
}

pub fn sample_config() -> FormSelectConfig {
    FormSelectConfig {
        key: "pickForm".to_string(),
        search_field: "name".to_string(),
        ..Default::default()
    }
}

/// A field wired to in-memory collaborators
pub struct Harness {
    pub field: Arc<FormSelect>,
    pub document: Arc<InMemoryDocument>,
    pub diagnostics: Arc<RecordingDiagnostics>,
    pub control: Arc<InMemorySelect>,
}

impl Harness {
    pub fn new(source: Arc<dyn CatalogSourcePort>) -> Self {
        Self::with_renderer(source, Arc::new(StaticFormRenderer::new()))
    }

    pub fn with_renderer(
        source: Arc<dyn CatalogSourcePort>,
        renderer: Arc<dyn FormRendererPort>,
    ) -> Self {
        Self::build(source, renderer, FieldValue::empty())
    }

    pub fn build(
        source: Arc<dyn CatalogSourcePort>,
        renderer: Arc<dyn FormRendererPort>,
        initial: FieldValue,
    ) -> Self {
        Self::build_with_options(source, renderer, initial, HostOptions::default())
    }

    pub fn build_with_options(
        source: Arc<dyn CatalogSourcePort>,
        renderer: Arc<dyn FormRendererPort>,
        initial: FieldValue,
        options: HostOptions,
    ) -> Self {
        let config = sample_config();
        let document = Arc::new(InMemoryDocument::with_elements([config.form_container.clone()]));
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let control = Arc::new(InMemorySelect::with_placeholder(config.placeholder.clone()));
        let field = Arc::new(FormSelect::new(
            config,
            options,
            initial,
            Collaborators {
                source,
                document: document.clone(),
                renderer,
                diagnostics: diagnostics.clone(),
            },
        ));

        Self {
            field,
            document,
            diagnostics,
            control,
        }
    }

    pub fn container(&self) -> String {
        self.document.element_content("formio").unwrap_or_default()
    }
}

use super::common;

use common::test_server::TestServer;
use formselect::adapters::diagnostics::RecordingDiagnostics;
use formselect::adapters::document::{InMemoryDocument, InMemorySelect};
use formselect::adapters::http_source::HttpCatalogSource;
use formselect::adapters::registry;
use formselect::adapters::renderer::StaticFormRenderer;
use formselect::config::FormSelectConfig;
use formselect::domain::{DocumentPort, FieldValue, SelectControlPort, SetValueFlags};
use formselect::field::{Collaborators, FormSelect};
use formselect::host::{FieldComponent, HostOptions};
use formselect::{FieldEvent, MountOutcome};
use serde_json::json;
use std::sync::Arc;

struct Page {
    document: Arc<InMemoryDocument>,
    diagnostics: Arc<RecordingDiagnostics>,
    collaborators: Collaborators,
}

fn page() -> Page {
    let document = Arc::new(InMemoryDocument::with_elements(["formio"]));
    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let collaborators = Collaborators {
        source: Arc::new(HttpCatalogSource::new()),
        document: document.clone(),
        renderer: Arc::new(StaticFormRenderer::new()),
        diagnostics: diagnostics.clone(),
    };
    Page {
        document,
        diagnostics,
        collaborators,
    }
}

#[tokio::test]
async fn test_select_and_mount_over_http() {
    let server = TestServer::new().await;
    let page = page();
    let field = FormSelect::new(
        FormSelectConfig {
            data_url: server.url("/forms"),
            search_field: "name".to_string(),
            ..Default::default()
        },
        HostOptions::default(),
        FieldValue::empty(),
        page.collaborators.clone(),
    );
    let mut rx = field.subscribe();

    field.init().await;
    let control = Arc::new(InMemorySelect::with_placeholder("Select a form"));
    field.attach(control.clone()).await;

    assert_eq!(control.values(), vec!["", "f1", "f2"]);
    assert_eq!(control.texts(), vec!["Select a form", "Intake", "Survey"]);

    control.choose("f2");
    let outcome = field.on_select_change().await;

    assert!(matches!(outcome, Some(MountOutcome::Mounted(_))));
    assert_eq!(field.get_value().as_str(), "f2");

    let content = page.document.element_content("formio").unwrap();
    assert!(content.contains("<h3>Survey</h3>"));
    assert!(content.contains(r#"<svg viewBox="0 0 8 8"><path d="M0 0h8" /></svg>"#));

    let mut form_loads = 0;
    while let Ok(event) = rx.try_recv() {
        if let FieldEvent::FormLoad(instance) = event {
            assert_eq!(instance.form_id, "f2");
            form_loads += 1;
        }
    }
    assert_eq!(form_loads, 1);
    assert!(page.diagnostics.is_empty());
}

#[tokio::test]
async fn test_unreachable_catalog_keeps_placeholder() {
    let server = TestServer::new().await;
    let page = page();
    let field = FormSelect::new(
        FormSelectConfig {
            data_url: server.url("/down"),
            ..Default::default()
        },
        HostOptions::default(),
        FieldValue::empty(),
        page.collaborators.clone(),
    );

    field.init().await;
    let control = Arc::new(InMemorySelect::with_placeholder("Select a form"));
    field.attach(control.clone()).await;

    assert_eq!(control.option_count(), 1);
    let errors = page.diagnostics.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), "source_unavailable");
}

#[tokio::test]
async fn test_object_response_is_malformed() {
    let server = TestServer::new().await;
    let page = page();
    let field = FormSelect::new(
        FormSelectConfig {
            data_url: server.url("/object"),
            ..Default::default()
        },
        HostOptions::default(),
        FieldValue::empty(),
        page.collaborators.clone(),
    );

    assert!(!field.load_forms().await.is_loaded());
    assert_eq!(page.diagnostics.errors()[0].kind(), "source_malformed");
}

#[tokio::test]
async fn test_registered_component_restores_value_without_mount() {
    let server = TestServer::new().await;
    let page = page();
    registry::register();

    let field = registry::create(
        &json!({"type": "formselect", "key": "pick", "dataUrl": server.url("/forms")}),
        HostOptions::default(),
        FieldValue::empty(),
        page.collaborators.clone(),
    )
    .unwrap();

    field.init().await;
    let control = Arc::new(InMemorySelect::with_placeholder("Select a form"));
    field.attach(control.clone()).await;
    field.set_value(FieldValue::from("f1"), SetValueFlags::no_load()).await;

    assert_eq!(control.value(), "f1");
    assert_eq!(page.document.element_content("formio").as_deref(), Some(""));

    field.set_value(FieldValue::from("f1"), SetValueFlags::default()).await;
    assert!(page
        .document
        .element_content("formio")
        .unwrap()
        .contains("<h3>Intake</h3>"));
}

use clap::Parser;
use formselect::adapters::diagnostics::TracingDiagnostics;
use formselect::adapters::document::{InMemoryDocument, InMemorySelect};
use formselect::adapters::http_source::HttpCatalogSource;
use formselect::adapters::registry;
use formselect::adapters::renderer::StaticFormRenderer;
use formselect::cli::Cli;
use formselect::config::Settings;
use formselect::domain::{DocumentPort, FieldValue, SelectControlPort, SetValueFlags};
use formselect::field::Collaborators;
use formselect::host::HostOptions;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    info!("Using catalog at {}", settings.field.data_url);

    registry::register();

    let document = Arc::new(InMemoryDocument::with_elements(settings.page.containers.clone()));
    let collaborators = Collaborators {
        source: Arc::new(HttpCatalogSource::new()),
        document: document.clone(),
        renderer: Arc::new(StaticFormRenderer::new()),
        diagnostics: Arc::new(TracingDiagnostics::new()),
    };

    let component = serde_json::to_value(&settings.field)?;
    let field = registry::create(&component, HostOptions::default(), FieldValue::empty(), collaborators)?;

    println!("{}", field.render());

    field.init().await;
    let control = Arc::new(InMemorySelect::with_placeholder(settings.field.placeholder.clone()));
    field.attach(control.clone()).await;

    for option in control.options() {
        let marker = if option.selected { "*" } else { " " };
        println!("{} [{}] {}", marker, option.value, option.text);
    }

    if let Some(id) = &cli.select {
        field.set_value(FieldValue::from(id.as_str()), SetValueFlags::default()).await;
        let content = document
            .element_content(&settings.field.form_container)
            .unwrap_or_default();
        println!("{}", content);
    }

    Ok(())
}

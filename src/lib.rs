//! # formselect - remote form picker field
//!
//! A form field that offers a dropdown of forms fetched from a remote
//! catalog and, on selection, mounts the chosen form's definition into a
//! separate container on the page.
//!
//! ## Features
//!
//! - **Catalog loading**: one HTTP GET, cached as an immutable snapshot
//! - **Dropdown sync**: idempotent repopulation against catalog and value
//! - **Mounting**: at most one live form per container, superseded renders discarded
//! - **Events**: `formLoad` notifications over a broadcast channel
//! - **Registry**: one-time registration for hosts that build fields by type name
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formselect::adapters::{
//!     diagnostics::TracingDiagnostics, document::InMemoryDocument,
//!     http_source::HttpCatalogSource, renderer::StaticFormRenderer,
//! };
//! use formselect::config::FormSelectConfig;
//! use formselect::domain::FieldValue;
//! use formselect::field::{Collaborators, FormSelect};
//! use formselect::host::{FieldComponent, HostOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let field = FormSelect::new(
//!         FormSelectConfig::default(),
//!         HostOptions::default(),
//!         FieldValue::empty(),
//!         Collaborators {
//!             source: Arc::new(HttpCatalogSource::new()),
//!             document: Arc::new(InMemoryDocument::with_elements(["formio"])),
//!             renderer: Arc::new(StaticFormRenderer::new()),
//!             diagnostics: Arc::new(TracingDiagnostics::new()),
//!         },
//!     );
//!     field.init().await;
//!     field.mount("f1").await;
//! }
//! ```
//!
//! ## Architecture
//!
//! Hexagonal, like the rest of the stack:
//! - **Domain**: catalog types and the ports to outside collaborators
//! - **Field**: catalog loader, selection view and definition mounter
//! - **Host**: the interface the host field framework calls
//! - **Adapters**: HTTP source, in-memory page, renderer, diagnostics, registry
//! - **Config**: per-field and application settings

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod field;
pub mod host;

pub use error::{FormSelectError, FormSelectResult};
pub use field::{FormSelect, FieldEvent, MountOutcome};

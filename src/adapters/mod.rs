pub mod diagnostics;
pub mod document;
pub mod http_source;
pub mod registry;
pub mod renderer;

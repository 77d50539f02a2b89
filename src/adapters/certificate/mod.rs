//! Certificate rendering and artifact storage adapters.

mod html_renderer;
mod local_file_storage;

pub use html_renderer::HtmlCertificateRenderer;
pub use local_file_storage::LocalFileStorage;

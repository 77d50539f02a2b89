//! Certificate artifact rendering port.

use crate::domain::certificate::CertificateContent;
use crate::domain::foundation::DomainError;

/// Renders a certificate document from its content.
///
/// Rendering is synchronous and pure; persistence of the resulting bytes is
/// the job of [`super::ArtifactStorage`].
pub trait CertificateRenderer: Send + Sync {
    fn render(&self, content: &CertificateContent) -> Result<Vec<u8>, DomainError>;
}

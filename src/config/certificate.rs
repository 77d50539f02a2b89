//! Certificate issuance configuration.

use serde::Deserialize;

use super::error::ValidationError;

/// Issuer display settings for rendered certificates.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateConfig {
    /// Name printed as the issuing teacher.
    #[serde(default = "default_issuer_name")]
    pub issuer_name: String,

    /// Optional signature image overlay, as a storage path.
    #[serde(default)]
    pub signature_image_path: Option<String>,
}

fn default_issuer_name() -> String {
    "Course Instructor".to_string()
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            issuer_name: default_issuer_name(),
            signature_image_path: None,
        }
    }
}

impl CertificateConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.issuer_name.is_empty() {
            return Err(ValidationError::MissingRequired("CERTIFICATE_ISSUER_NAME"));
        }
        Ok(())
    }
}

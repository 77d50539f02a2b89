//! Media delivery configuration.

use serde::Deserialize;

use super::error::ValidationError;

/// Video token and storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Dedicated signing secret for video access tokens.
    pub video_signing_secret: String,

    /// Token lifetime in seconds. Short on purpose: it bounds the exposure
    /// window if a signed URL leaks.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,

    /// Root directory for stored artifacts (videos, certificates).
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

fn default_token_ttl_secs() -> i64 {
    900
}

fn default_storage_path() -> String {
    "./storage".to_string()
}

impl MediaConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.video_signing_secret.is_empty() {
            return Err(ValidationError::MissingRequired("MEDIA_VIDEO_SIGNING_SECRET"));
        }
        if self.token_ttl_secs <= 0 {
            return Err(ValidationError::invalid(
                "media.token_ttl_secs",
                "must be positive",
            ));
        }
        Ok(())
    }
}

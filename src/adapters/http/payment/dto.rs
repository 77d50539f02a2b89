//! Request/response DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

/// Body of a client payment verification.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Acknowledgement body shared by verify and webhook.
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

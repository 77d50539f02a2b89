//! HTTP handlers for super-admin operations.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::auth::RequireSuperAdmin;
use crate::adapters::http::state::AppState;
use crate::application::handlers::admin::ProvisionAdminCommand;
use crate::domain::foundation::{OrganizationId, UserId};

/// Body for admin seat provisioning.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdminRequest {
    pub organization_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Response for admin seat provisioning.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAdminResponse {
    pub id: UserId,
    pub email: String,
    pub payment_link_url: String,
}

/// POST /api/orgs/:org_id/admins
pub async fn create_admin(
    State(state): State<AppState>,
    RequireSuperAdmin(_user): RequireSuperAdmin,
    Path(org_id): Path<OrganizationId>,
    Json(body): Json<CreateAdminRequest>,
) -> Result<Json<CreateAdminResponse>, ApiError> {
    let provisioned = state
        .provision_admin_handler()
        .handle(ProvisionAdminCommand {
            organization_id: org_id,
            organization_name: body.organization_name,
            full_name: body.full_name,
            email: body.email,
            phone: body.phone,
        })
        .await?;
    Ok(Json(CreateAdminResponse {
        id: provisioned.user_id,
        email: provisioned.email,
        payment_link_url: provisioned.payment_link_url,
    }))
}

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use chrono::Local;
use classeviva_client::ResourceCategory;

use crate::proxy::{resolve_params, ResourceEnvelope};
use crate::session::Authenticated;
use crate::state::AppState;
use crate::utils::error::ApiError;

/// POST /{category} - one handler for every resource category.
pub async fn fetch_resource(
    State(state): State<AppState>,
    Path(name): Path<String>,
    session: Result<Authenticated, ApiError>,
    body: Bytes,
) -> Result<Json<ResourceEnvelope>, ApiError> {
    let category: ResourceCategory = name
        .parse()
        .map_err(|e: classeviva_client::UnknownCategory| ApiError::NotFound(e.to_string()))?;

    let Authenticated(client) = session?;

    let params = resolve_params(category, &body, Local::now().date_naive())?;
    let envelope = state.proxy.fetch(client.as_ref(), category, &params).await?;

    Ok(Json(envelope))
}

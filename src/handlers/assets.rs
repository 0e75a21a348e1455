//! Asset handlers
//!
//! Listing and lookup endpoints over the `routes` table, and the edit
//! endpoint that drives the status transition workflow.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, warn};

use crate::entities::routes;
use crate::models::asset::{AssetEditRequest, MarkerProjection, MarkerQuery, OpenAssetSummary};
use crate::models::error::ErrorResponse;
use crate::models::transition::TransitionResponse;
use crate::services::asset_store::{self, MarkerFilter};
use crate::services::transition::{self, TransitionError};
use crate::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

/// GET /api/get-routes
///
/// Assets that currently need attention (status = 0).
pub async fn get_open_routes(
    State(state): State<AppState>,
) -> Result<Json<Vec<OpenAssetSummary>>, ApiError> {
    let rows = asset_store::list_open(&state.db).await.map_err(|e| {
        error!(error = %e, "Error fetching open assets");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch data")
    })?;

    info!(count = rows.len(), "Fetched open assets");
    Ok(Json(rows))
}

/// GET /api/routes?category=&routes=
///
/// Map markers filtered by category and route name; `all` disables a filter.
pub async fn get_route_markers(
    State(state): State<AppState>,
    Query(query): Query<MarkerQuery>,
) -> Result<Json<Vec<MarkerProjection>>, ApiError> {
    let filter = MarkerFilter::from_query(&query);

    let rows = asset_store::list_markers(&state.db, &filter)
        .await
        .map_err(|e| {
            error!(error = %e, ?query, "Database Error fetching markers");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    info!(count = rows.len(), filters = filter.predicates().len(), "Fetched markers");
    Ok(Json(rows))
}

/// GET /api/marker/{name_id}
///
/// # Response
/// - 200: Full asset row
/// - 400: Empty id
/// - 404: No asset with that id
/// - 500: Database error
pub async fn get_marker(
    State(state): State<AppState>,
    Path(name_id): Path<String>,
) -> Result<Json<routes::Model>, ApiError> {
    if name_id.is_empty() {
        return Err(missing_marker_id().await);
    }

    let row = asset_store::find_by_name_id(&state.db, &name_id)
        .await
        .map_err(|e| {
            error!(name_id = %name_id, error = %e, "Database Error fetching marker");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch marker data")
        })?;

    match row {
        Some(row) => Ok(Json(row)),
        None => {
            warn!(name_id = %name_id, "Marker not found");
            Err(api_error(StatusCode::NOT_FOUND, "Marker not found"))
        }
    }
}

/// GET /api/marker/ (no id segment)
pub async fn missing_marker_id() -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "name_id is required")
}

/// POST /api/save-electric-pole
///
/// The body is read raw: any content type is accepted and a body that is not
/// a JSON object is treated as `{}`.
///
/// # Response
/// - 200: `{message, changes}`
/// - 400: Missing `name_id`
/// - 404: Asset vanished after the update
/// - 500: Update, read or history insert failure
pub async fn save_electric_pole(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TransitionResponse>, ApiError> {
    let request = AssetEditRequest::from_body(&body);
    info!(name_id = ?request.name_id, "Asset edit received");

    let result = transition::apply_transition(&state.db, &state.observers, &request)
        .await
        .map_err(transition_error_response)?;

    Ok(Json(TransitionResponse::from(&result)))
}

fn transition_error_response(e: TransitionError) -> ApiError {
    let status = match e {
        TransitionError::ValidationError(_) => StatusCode::BAD_REQUEST,
        TransitionError::NotFoundError(_) => StatusCode::NOT_FOUND,
        TransitionError::UpdateError(_)
        | TransitionError::StoreError(_)
        | TransitionError::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, e.to_string())
}

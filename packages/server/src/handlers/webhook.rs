use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::webhook::{BulkSyncRequest, SyncResponse};
use crate::services::ingest;
use crate::state::AppState;

/// Receive a bulk sync from the ops-console.
#[utoipa::path(
    post,
    path = "/sync",
    tag = "Webhook",
    operation_id = "webhookSync",
    summary = "Sync shoots, clips, and posts from the ops-console",
    description = "Upserts the pushed shoots, clips, and branded posts, and auto-links synced shoots to KOL groups. Requires the shared `X-Api-Key` header.",
    request_body = BulkSyncRequest,
    responses(
        (status = 200, description = "Sync applied", body = SyncResponse),
        (status = 401, description = "Invalid API key (UNAUTHORIZED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers, payload))]
pub async fn sync_all(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BulkSyncRequest>,
) -> Result<Json<SyncResponse>, AppError> {
    super::verify_api_key(&state, &headers)?;

    let txn = state.db.begin().await?;
    let response = ingest::apply_bulk_sync(&txn, &payload).await?;
    txn.commit().await?;

    Ok(Json(response))
}

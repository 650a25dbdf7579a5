use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use sea_orm::TransactionTrait;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::matching::{PostTaggingStats, PropagationResult, ShootAssignmentStats};
use crate::services::{post_tagger, shoot_matcher};
use crate::state::AppState;

/// Link all unlinked shoots to KOL groups.
#[utoipa::path(
    post,
    path = "/shoots/assign",
    tag = "Matching",
    operation_id = "assignUnlinkedShoots",
    summary = "Batch-link unlinked shoots to KOL groups",
    description = "Sweeps every shoot missing a project or KOL group link and assigns it by doctor-name matching. Idempotent: a second run assigns nothing. Requires the shared `X-Api-Key` header.",
    responses(
        (status = 200, description = "Sweep complete", body = ShootAssignmentStats),
        (status = 401, description = "Invalid API key (UNAUTHORIZED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn assign_shoots(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ShootAssignmentStats>, AppError> {
    super::verify_api_key(&state, &headers)?;
    let stats = shoot_matcher::assign_unlinked_shoots(&state.db).await?;
    Ok(Json(stats))
}

/// Two-pass tag all untagged official posts.
#[utoipa::path(
    post,
    path = "/posts/tag",
    tag = "Matching",
    operation_id = "tagOfficialPosts",
    summary = "Tag untagged official-channel posts",
    description = "Runs the two-pass tagging pipeline (KOL group pool, then content scan) over all direct posts with no tags yet. Requires the shared `X-Api-Key` header.",
    responses(
        (status = 200, description = "Tagging complete", body = PostTaggingStats),
        (status = 401, description = "Invalid API key (UNAUTHORIZED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn tag_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PostTaggingStats>, AppError> {
    super::verify_api_key(&state, &headers)?;

    let txn = state.db.begin().await?;
    let stats = post_tagger::tag_official_posts(&txn).await?;
    txn.commit().await?;

    Ok(Json(stats))
}

/// Copy clip tags onto untagged branded posts.
#[utoipa::path(
    post,
    path = "/posts/propagate",
    tag = "Matching",
    operation_id = "propagateClipTags",
    summary = "Propagate clip tags to branded posts",
    description = "Copies each clip's tags onto its linked webhook posts that have no tags yet. Requires the shared `X-Api-Key` header.",
    responses(
        (status = 200, description = "Propagation complete", body = PropagationResult),
        (status = 401, description = "Invalid API key (UNAUTHORIZED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn propagate_tags(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PropagationResult>, AppError> {
    super::verify_api_key(&state, &headers)?;

    let txn = state.db.begin().await?;
    let updated = post_tagger::propagate_clip_tags_to_posts(&txn).await?;
    txn.commit().await?;

    Ok(Json(PropagationResult { updated }))
}

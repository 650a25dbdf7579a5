//! Webhook ingestion.
//!
//! Applies a bulk sync payload from the ops-console: upserts shoots first
//! (posts and clips reference them), auto-links each synced shoot to a KOL
//! group, then upserts clips and branded posts. The caller owns the
//! transaction.

use chrono::{DateTime, NaiveDateTime, Utc};
use common::{NameList, TagList};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, Set};
use tracing::info;

use crate::entity::post::PostSource;
use crate::entity::{clip, post, shoot};
use crate::models::webhook::{BulkSyncRequest, SyncResponse};
use crate::services::shoot_matcher::{assign_shoot_with_rosters, load_group_rosters};

/// Parse an ISO-8601 timestamp leniently; unparseable values become `None`.
/// Naive timestamps (no offset) are taken as UTC.
fn parse_datetime(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Apply a bulk sync payload. Returns per-section counts.
pub async fn apply_bulk_sync<C: ConnectionTrait>(
    conn: &C,
    request: &BulkSyncRequest,
) -> Result<SyncResponse, DbErr> {
    let now = Utc::now();

    // Shoots first; keep the stored models for KOL group matching.
    let mut synced_shoots = Vec::with_capacity(request.shoots.len());
    for data in &request.shoots {
        let existing = shoot::Entity::find_by_id(&data.id).one(conn).await?;
        let model = match existing {
            Some(existing) => {
                let mut active: shoot::ActiveModel = existing.into();
                active.name = Set(data.name.clone());
                active.doctors = Set(Some(NameList(data.doctors.clone())));
                active.shoot_date = Set(parse_datetime(data.shoot_date.as_deref()));
                active.synced_at = Set(now);
                active.update(conn).await?
            }
            None => {
                shoot::ActiveModel {
                    id: Set(data.id.clone()),
                    name: Set(data.name.clone()),
                    doctors: Set(Some(NameList(data.doctors.clone()))),
                    project_id: Set(None),
                    kol_group_id: Set(None),
                    shoot_date: Set(parse_datetime(data.shoot_date.as_deref())),
                    synced_at: Set(now),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(conn)
                .await?
            }
        };
        synced_shoots.push(model);
    }

    // One roster load for the whole batch.
    let rosters = load_group_rosters(conn).await?;
    let mut shoots_matched = 0u64;
    for model in &synced_shoots {
        if assign_shoot_with_rosters(conn, model, &rosters).await? {
            shoots_matched += 1;
        }
    }
    if shoots_matched > 0 {
        info!(shoots_matched, "auto-linked synced shoots to KOL groups");
    }

    let mut clips_synced = 0u64;
    for data in &request.clips {
        let existing = clip::Entity::find_by_id(&data.id).one(conn).await?;
        match existing {
            Some(existing) => {
                let mut active: clip::ActiveModel = existing.into();
                active.title = Set(data.title.clone());
                active.description = Set(data.description.clone());
                active.platform = Set(data.platform.clone());
                active.tags = Set(Some(TagList(data.tags.clone())));
                active.shoot_id = Set(data.shoot_id.clone());
                active.synced_at = Set(now);
                active.update(conn).await?;
            }
            None => {
                clip::ActiveModel {
                    id: Set(data.id.clone()),
                    title: Set(data.title.clone()),
                    description: Set(data.description.clone()),
                    platform: Set(data.platform.clone()),
                    tags: Set(Some(TagList(data.tags.clone()))),
                    shoot_id: Set(data.shoot_id.clone()),
                    synced_at: Set(now),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(conn)
                .await?;
            }
        }
        clips_synced += 1;
    }

    let mut posts_synced = 0u64;
    for data in &request.posts {
        let existing = post::Entity::find_by_id(&data.id).one(conn).await?;
        match existing {
            Some(existing) => {
                let mut active: post::ActiveModel = existing.into();
                active.clip_id = Set(data.clip_id.clone());
                active.shoot_id = Set(data.shoot_id.clone());
                active.platform = Set(data.platform.clone());
                active.provider_post_id = Set(data.provider_post_id.clone());
                active.title = Set(data.title.clone());
                active.description = Set(data.description.clone());
                active.posted_at = Set(parse_datetime(data.posted_at.as_deref()));
                active.view_count = Set(data.view_count);
                active.like_count = Set(data.like_count);
                active.comment_count = Set(data.comment_count);
                active.share_count = Set(data.share_count);
                active.impression_count = Set(data.impression_count);
                active.stats_synced_at = Set(parse_datetime(data.stats_synced_at.as_deref()));
                active.synced_at = Set(now);
                active.update(conn).await?;
            }
            None => {
                post::ActiveModel {
                    id: Set(data.id.clone()),
                    clip_id: Set(data.clip_id.clone()),
                    shoot_id: Set(data.shoot_id.clone()),
                    platform: Set(data.platform.clone()),
                    provider_post_id: Set(data.provider_post_id.clone()),
                    title: Set(data.title.clone()),
                    description: Set(data.description.clone()),
                    posted_at: Set(parse_datetime(data.posted_at.as_deref())),
                    source: Set(PostSource::Webhook),
                    tags: Set(None),
                    view_count: Set(data.view_count),
                    like_count: Set(data.like_count),
                    comment_count: Set(data.comment_count),
                    share_count: Set(data.share_count),
                    impression_count: Set(data.impression_count),
                    stats_synced_at: Set(parse_datetime(data.stats_synced_at.as_deref())),
                    synced_at: Set(now),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(conn)
                .await?;
            }
        }
        posts_synced += 1;
    }

    Ok(SyncResponse {
        shoots_synced: synced_shoots.len() as u64,
        clips_synced,
        posts_synced,
        shoots_matched,
        last_sync: now,
    })
}

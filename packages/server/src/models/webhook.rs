use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shoot/recording-session data from the ops-console.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ShootSyncData {
    pub id: String,
    pub name: String,
    /// Raw doctor name strings, e.g. ["Dr. Jason Mouabbi"].
    #[serde(default)]
    pub doctors: Vec<String>,
    /// ISO-8601; unparseable values are stored as null.
    pub shoot_date: Option<String>,
}

/// Clip data from the ops-console.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ClipSyncData {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub platform: Option<String>,
    /// `category:Value` tags attached upstream.
    #[serde(default)]
    pub tags: Vec<String>,
    pub shoot_id: Option<String>,
}

/// Branded post data with engagement metrics from the ops-console.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PostSyncData {
    pub id: String,
    pub clip_id: Option<String>,
    pub shoot_id: Option<String>,
    pub platform: String,
    pub provider_post_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub posted_at: Option<String>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub share_count: i64,
    #[serde(default)]
    pub impression_count: i64,
    pub stats_synced_at: Option<String>,
}

/// Bulk sync payload from the ops-console.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct BulkSyncRequest {
    #[serde(default)]
    pub shoots: Vec<ShootSyncData>,
    #[serde(default)]
    pub clips: Vec<ClipSyncData>,
    #[serde(default)]
    pub posts: Vec<PostSyncData>,
}

/// Counts returned after a sync.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SyncResponse {
    pub shoots_synced: u64,
    pub clips_synced: u64,
    pub posts_synced: u64,
    /// Shoots auto-linked to a KOL group during this sync.
    pub shoots_matched: u64,
    pub last_sync: DateTime<Utc>,
}

use common::TagList;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};

/// Where a post record came from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PostSource {
    /// Branded post synced from the ops-console, pre-associated with a clip.
    #[sea_orm(string_value = "webhook")]
    Webhook,
    /// Official-channel post fetched directly from a platform API; arrives
    /// with no clip association and no tags.
    #[sea_orm(string_value = "direct")]
    Direct,
}

/// A platform post with engagement metrics.
///
/// `tags` is nullable on purpose: `NULL` means the tagging pipeline has never
/// seen the post, an empty list means it was processed and nothing matched.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    /// Upstream identifier (ops-console id or a generated id for direct
    /// posts).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Only set for webhook posts.
    pub clip_id: Option<String>,
    #[sea_orm(belongs_to, from = "clip_id", to = "id")]
    pub clip: Option<super::clip::Entity>,

    /// May be back-filled by the tagging pipeline for direct posts.
    pub shoot_id: Option<String>,
    #[sea_orm(belongs_to, from = "shoot_id", to = "id")]
    pub shoot: Option<super::shoot::Entity>,

    pub platform: String,
    pub provider_post_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub posted_at: Option<DateTimeUtc>,

    pub source: PostSource,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub tags: Option<TagList>,

    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub share_count: i64,
    pub impression_count: i64,

    pub stats_synced_at: Option<DateTimeUtc>,
    pub synced_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use common::TagList;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A published clip synced from the ops-console.
///
/// Clip tags originate upstream; the matching core only reads them to derive
/// group-level tag pools.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clip")]
pub struct Model {
    /// Upstream identifier from the ops-console.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: Option<String>,
    pub description: Option<String>,
    pub platform: Option<String>,

    /// `category:Value` tags attached by the upstream sync.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub tags: Option<TagList>,

    pub shoot_id: Option<String>,
    #[sea_orm(belongs_to, from = "shoot_id", to = "id")]
    pub shoot: Option<super::shoot::Entity>,

    pub synced_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use common::NameList;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A recorded content session synced from the ops-console.
///
/// Arrives without tenant linkage; the matching core fills `project_id` and
/// `kol_group_id` from the raw `doctors` list. Once both are set the shoot is
/// considered linked and is skipped by later assignment passes.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shoot")]
pub struct Model {
    /// Upstream identifier from the ops-console; not generated here.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// Raw doctor name strings as sent by the upstream sync.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub doctors: Option<NameList>,

    pub project_id: Option<Uuid>,
    #[sea_orm(belongs_to, from = "project_id", to = "id")]
    pub project: Option<super::project::Entity>,

    pub kol_group_id: Option<Uuid>,
    #[sea_orm(belongs_to, from = "kol_group_id", to = "id")]
    pub kol_group: Option<super::kol_group::Entity>,

    #[sea_orm(has_many)]
    pub clips: HasMany<super::clip::Entity>,

    pub shoot_date: Option<DateTimeUtc>,
    pub synced_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key Opinion Leader: an individual doctor featured in sponsored content.
/// Roster entries are immutable to the matching core.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kol")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Display name as it appears in content, e.g. "Dr. Jason Mouabbi".
    pub name: String,
    pub specialty: Option<String>,

    #[sea_orm(has_many, via = "kol_group_member")]
    pub groups: HasMany<super::kol_group::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership link between a KOL group and a KOL.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kol_group_member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub kol_group_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub kol_id: Uuid,

    #[sea_orm(belongs_to, from = "kol_group_id", to = "id")]
    pub kol_group: Option<super::kol_group::Entity>,
    #[sea_orm(belongs_to, from = "kol_id", to = "id")]
    pub kol: Option<super::kol::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

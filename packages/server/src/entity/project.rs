use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A client's campaign/program, e.g. "DB09 (T-DXd)" or "Enhertu".
/// Shoots link into the tenant hierarchy through their project.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub client_id: Uuid,
    #[sea_orm(belongs_to, from = "client_id", to = "id")]
    pub client: HasOne<super::client::Entity>,

    pub name: String,
    /// Short project code from the release schedule, e.g. "DB09", "EBC".
    pub code: String,
    pub description: Option<String>,

    #[sea_orm(has_many)]
    pub kol_groups: HasMany<super::kol_group::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A recurring doctor lineup within a project, named as a delimited surname
/// list ("Mouabbi/O'Shaughnessey/Rimawi"). Groups with the same name may
/// exist under different projects.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kol_group")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub project_id: Uuid,
    #[sea_orm(belongs_to, from = "project_id", to = "id")]
    pub project: HasOne<super::project::Entity>,

    pub name: String,
    /// Contracted videos per release-schedule row.
    pub video_count: i32,
    pub publish_day: Option<String>,

    #[sea_orm(has_many, via = "kol_group_member")]
    pub kols: HasMany<super::kol::Entity>,

    #[sea_orm(has_many)]
    pub shoots: HasMany<super::shoot::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

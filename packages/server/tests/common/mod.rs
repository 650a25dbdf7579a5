use chrono::Utc;
use common::{NameList, TagList};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use uuid::Uuid;

use server::entity::post::PostSource;
use server::entity::{client, clip, kol, kol_group, kol_group_member, post, project, shoot};

/// Expected tags value for equality assertions.
pub fn tags(values: &[&str]) -> Option<TagList> {
    Some(TagList(values.iter().map(|t| t.to_string()).collect()))
}

/// Open a fresh in-memory SQLite database with the full schema synced.
///
/// A single pooled connection keeps the in-memory database alive and shared
/// for the whole test.
pub async fn test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("Failed to open in-memory SQLite");
    db.get_schema_registry("server::entity::*")
        .sync(&db)
        .await
        .expect("Failed to sync schema");
    db
}

/// Create a client + project pair, returning the project id.
pub async fn create_project(db: &DatabaseConnection, slug: &str, code: &str) -> Uuid {
    let now = Utc::now();
    let client = client::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Client {slug}")),
        slug: Set(slug.to_string()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert client");

    project::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client.id),
        name: Set(format!("Project {code}")),
        code: Set(code.to_string()),
        description: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert project")
    .id
}

/// Create a KOL group with member KOLs (created on the fly by display name).
pub async fn create_group(
    db: &DatabaseConnection,
    project_id: Uuid,
    name: &str,
    members: &[&str],
) -> Uuid {
    let now = Utc::now();
    let group = kol_group::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        name: Set(name.to_string()),
        video_count: Set(members.len() as i32),
        publish_day: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert kol group");

    for member in members {
        let kol = kol::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(member.to_string()),
            specialty: Set(None),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("insert kol");

        kol_group_member::ActiveModel {
            kol_group_id: Set(group.id),
            kol_id: Set(kol.id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("insert membership");
    }

    group.id
}

/// Create an unlinked shoot with raw doctor names.
pub async fn create_shoot(db: &DatabaseConnection, id: &str, doctors: &[&str]) -> shoot::Model {
    let now = Utc::now();
    shoot::ActiveModel {
        id: Set(id.to_string()),
        name: Set(format!("Shoot {id}")),
        doctors: Set(Some(NameList(
            doctors.iter().map(|d| d.to_string()).collect(),
        ))),
        project_id: Set(None),
        kol_group_id: Set(None),
        shoot_date: Set(None),
        synced_at: Set(now),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert shoot")
}

/// Create a shoot already linked to a group and project.
pub async fn create_linked_shoot(
    db: &DatabaseConnection,
    id: &str,
    group_id: Uuid,
    project_id: Uuid,
) -> shoot::Model {
    let now = Utc::now();
    shoot::ActiveModel {
        id: Set(id.to_string()),
        name: Set(format!("Shoot {id}")),
        doctors: Set(None),
        project_id: Set(Some(project_id)),
        kol_group_id: Set(Some(group_id)),
        shoot_date: Set(None),
        synced_at: Set(now),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert linked shoot")
}

/// Create a clip, optionally linked to a shoot and carrying upstream tags.
pub async fn create_clip(
    db: &DatabaseConnection,
    id: &str,
    shoot_id: Option<&str>,
    tags: Option<&[&str]>,
) -> clip::Model {
    let now = Utc::now();
    clip::ActiveModel {
        id: Set(id.to_string()),
        title: Set(None),
        description: Set(None),
        platform: Set(None),
        tags: Set(tags.map(|tags| TagList(tags.iter().map(|t| t.to_string()).collect()))),
        shoot_id: Set(shoot_id.map(str::to_string)),
        synced_at: Set(now),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert clip")
}

/// Create a branded (webhook) post linked to a clip, with no tags yet.
pub async fn create_webhook_post(
    db: &DatabaseConnection,
    id: &str,
    clip_id: Option<&str>,
    tags: Option<&[&str]>,
) -> post::Model {
    insert_post(db, id, PostSource::Webhook, clip_id, None, None, tags).await
}

/// Create an untagged official (direct) post with title/description text.
pub async fn create_direct_post(
    db: &DatabaseConnection,
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
) -> post::Model {
    insert_post(db, id, PostSource::Direct, None, title, description, None).await
}

async fn insert_post(
    db: &DatabaseConnection,
    id: &str,
    source: PostSource,
    clip_id: Option<&str>,
    title: Option<&str>,
    description: Option<&str>,
    tags: Option<&[&str]>,
) -> post::Model {
    let now = Utc::now();
    post::ActiveModel {
        id: Set(id.to_string()),
        clip_id: Set(clip_id.map(str::to_string)),
        shoot_id: Set(None),
        platform: Set("youtube".to_string()),
        provider_post_id: Set(Some(format!("provider-{id}"))),
        title: Set(title.map(str::to_string)),
        description: Set(description.map(str::to_string)),
        posted_at: Set(None),
        source: Set(source),
        tags: Set(tags.map(|tags| TagList(tags.iter().map(|t| t.to_string()).collect()))),
        view_count: Set(0),
        like_count: Set(0),
        comment_count: Set(0),
        share_count: Set(0),
        impression_count: Set(0),
        stats_synced_at: Set(None),
        synced_at: Set(now),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert post")
}

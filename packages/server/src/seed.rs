use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::entity::{client, clip, kol, kol_group, kol_group_member, post, project};

struct ProjectSeed {
    name: &'static str,
    code: &'static str,
    description: Option<&'static str>,
}

struct ClientSeed {
    name: &'static str,
    slug: &'static str,
    projects: &'static [ProjectSeed],
}

struct GroupSeed {
    project_code: &'static str,
    name: &'static str,
    video_count: i32,
    publish_day: &'static str,
    kols: &'static [&'static str],
}

/// Tenant roster from the release schedules.
const CLIENTS: &[ClientSeed] = &[
    ClientSeed {
        name: "Community Health Media",
        slug: "chm",
        projects: &[ProjectSeed {
            name: "Social Clips",
            code: "SOCIAL",
            description: Some("General social media clips and CHM branded content"),
        }],
    },
    ClientSeed {
        name: "AstraZeneca",
        slug: "astrazeneca",
        projects: &[
            ProjectSeed {
                name: "Enhertu",
                code: "ENHERTU",
                description: Some(
                    "Enhertu (trastuzumab deruxtecan) - HER2-directed antibody-drug conjugate",
                ),
            },
            ProjectSeed {
                name: "Lymparza",
                code: "LYMPARZA",
                description: Some("Lymparza (olaparib) - PARP inhibitor"),
            },
        ],
    },
    ClientSeed {
        name: "Daiichi Sankyo",
        slug: "daiichi",
        projects: &[
            ProjectSeed {
                name: "DB09 (T-DXd)",
                code: "DB09",
                description: Some("DB09 clinical trial program"),
            },
            ProjectSeed {
                name: "Early Breast Cancer",
                code: "EBC",
                description: Some("Early breast cancer treatment program"),
            },
            ProjectSeed {
                name: "TB02",
                code: "TB02",
                description: Some("TB02 clinical program"),
            },
        ],
    },
    ClientSeed {
        name: "Puma Biotechnology",
        slug: "puma",
        projects: &[ProjectSeed {
            name: "Neratinib",
            code: "NERATINIB",
            description: Some("Neratinib (NERLYNX) - pan-HER tyrosine kinase inhibitor"),
        }],
    },
];

/// Recurring doctor lineups per project, one row per release-schedule entry.
const GROUPS: &[GroupSeed] = &[
    GroupSeed {
        project_code: "SOCIAL",
        name: "Mouabbi/O'Shaughnessey/Rimawi",
        video_count: 5,
        publish_day: "Monday",
        kols: &[
            "Dr. Jason Mouabbi",
            "Dr. Joyce O'Shaughnessy",
            "Dr. Mothaffar Rimawi",
        ],
    },
    GroupSeed {
        project_code: "SOCIAL",
        name: "Kang/Bardia",
        video_count: 8,
        publish_day: "Monday",
        kols: &["Dr. Seock-Ah Im Kang", "Dr. Aditya Bardia"],
    },
    GroupSeed {
        project_code: "SOCIAL",
        name: "Iyengar/Dietrich",
        video_count: 6,
        publish_day: "Tuesday",
        kols: &["Dr. Neil Iyengar", "Dr. Mary Dietrich"],
    },
    GroupSeed {
        project_code: "DB09",
        name: "Mouabbi/O'Shaughnessey/Rimawi",
        video_count: 5,
        publish_day: "Monday",
        kols: &[
            "Dr. Jason Mouabbi",
            "Dr. Joyce O'Shaughnessy",
            "Dr. Mothaffar Rimawi",
        ],
    },
    GroupSeed {
        project_code: "DB09",
        name: "Kang/Bardia",
        video_count: 8,
        publish_day: "Monday",
        kols: &["Dr. Seock-Ah Im Kang", "Dr. Aditya Bardia"],
    },
    GroupSeed {
        project_code: "DB09",
        name: "Iyengar/Dietrich",
        video_count: 6,
        publish_day: "Tuesday",
        kols: &["Dr. Neil Iyengar", "Dr. Mary Dietrich"],
    },
    GroupSeed {
        project_code: "EBC",
        name: "Gadi/Rao",
        video_count: 5,
        publish_day: "Monday",
        kols: &["Dr. Vijay Gadi", "Dr. Rashmi Rao"],
    },
    GroupSeed {
        project_code: "EBC",
        name: "Conlin/McArthur",
        video_count: 6,
        publish_day: "Wednesday",
        kols: &["Dr. Alicia Conlin", "Dr. Heather McArthur"],
    },
    GroupSeed {
        project_code: "EBC",
        name: "Iyengar/Jhaveri",
        video_count: 8,
        publish_day: "Friday",
        kols: &["Dr. Neil Iyengar", "Dr. Komal Jhaveri"],
    },
    GroupSeed {
        project_code: "TB02",
        name: "Iyengar/Hamilton",
        video_count: 6,
        publish_day: "Tuesday",
        kols: &["Dr. Neil Iyengar", "Dr. Erika Hamilton"],
    },
    GroupSeed {
        project_code: "TB02",
        name: "Pegram/Garrido-Castro",
        video_count: 6,
        publish_day: "Thursday",
        kols: &["Dr. Mark Pegram", "Dr. Ana Garrido-Castro"],
    },
    GroupSeed {
        project_code: "TB02",
        name: "Gradishar/Traina",
        video_count: 4,
        publish_day: "Friday",
        kols: &["Dr. William Gradishar", "Dr. Tiffany Traina"],
    },
    GroupSeed {
        project_code: "ENHERTU",
        name: "Mouabbi Cairo",
        video_count: 8,
        publish_day: "Monday",
        kols: &["Dr. Jason Mouabbi", "Dr. Mariana Cairo"],
    },
    GroupSeed {
        project_code: "ENHERTU",
        name: "Mouabbi Rimawi",
        video_count: 8,
        publish_day: "Tuesday",
        kols: &["Dr. Jason Mouabbi", "Dr. Mothaffar Rimawi"],
    },
    GroupSeed {
        project_code: "ENHERTU",
        name: "Hamilton/Vidal",
        video_count: 4,
        publish_day: "Wednesday",
        kols: &["Dr. Erika Hamilton", "Dr. Guilherme Vidal"],
    },
    GroupSeed {
        project_code: "LYMPARZA",
        name: "Iyengar/Robson",
        video_count: 8,
        publish_day: "Wednesday",
        kols: &["Dr. Neil Iyengar", "Dr. Mark Robson"],
    },
    GroupSeed {
        project_code: "NERATINIB",
        name: "Mouabbi/Birhiray/Chang",
        video_count: 8,
        publish_day: "Thursday",
        kols: &["Dr. Jason Mouabbi", "Dr. Avan Birhiray", "Dr. Jennifer Chang"],
    },
];

/// Rows created by a roster seed run.
#[derive(Debug, Default)]
pub struct RosterSeedSummary {
    pub clients: u32,
    pub projects: u32,
    pub kols: u32,
    pub groups: u32,
}

/// Seed the tenant roster (clients, projects, KOLs, KOL groups).
///
/// Idempotent: rows are looked up by their natural keys and existing rows
/// are left untouched, so re-running never duplicates the roster.
pub async fn seed_roster<C: ConnectionTrait>(conn: &C) -> Result<RosterSeedSummary, DbErr> {
    let now = Utc::now();
    let mut summary = RosterSeedSummary::default();

    // Clients and projects, tracking project ids by code for group linking.
    let mut project_ids: HashMap<&'static str, Uuid> = HashMap::new();
    for client_seed in CLIENTS {
        let client_id = match client::Entity::find()
            .filter(client::Column::Slug.eq(client_seed.slug))
            .one(conn)
            .await?
        {
            Some(existing) => existing.id,
            None => {
                let model = client::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    name: Set(client_seed.name.to_string()),
                    slug: Set(client_seed.slug.to_string()),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(conn)
                .await?;
                summary.clients += 1;
                model.id
            }
        };

        for project_seed in client_seed.projects {
            let project_id = match project::Entity::find()
                .filter(project::Column::ClientId.eq(client_id))
                .filter(project::Column::Code.eq(project_seed.code))
                .one(conn)
                .await?
            {
                Some(existing) => existing.id,
                None => {
                    let model = project::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        client_id: Set(client_id),
                        name: Set(project_seed.name.to_string()),
                        code: Set(project_seed.code.to_string()),
                        description: Set(project_seed.description.map(str::to_string)),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(conn)
                    .await?;
                    summary.projects += 1;
                    model.id
                }
            };
            project_ids.insert(project_seed.code, project_id);
        }
    }

    // KOLs, unique by display name.
    let mut kol_ids: HashMap<&'static str, Uuid> = HashMap::new();
    for group_seed in GROUPS {
        for &name in group_seed.kols {
            if kol_ids.contains_key(name) {
                continue;
            }
            let kol_id = match kol::Entity::find()
                .filter(kol::Column::Name.eq(name))
                .one(conn)
                .await?
            {
                Some(existing) => existing.id,
                None => {
                    let model = kol::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        name: Set(name.to_string()),
                        specialty: Set(None),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(conn)
                    .await?;
                    summary.kols += 1;
                    model.id
                }
            };
            kol_ids.insert(name, kol_id);
        }
    }

    // Groups and memberships.
    for group_seed in GROUPS {
        let Some(&project_id) = project_ids.get(group_seed.project_code) else {
            warn!(
                project_code = group_seed.project_code,
                group = group_seed.name,
                "project not found for group seed, skipping"
            );
            continue;
        };

        let exists = kol_group::Entity::find()
            .filter(kol_group::Column::ProjectId.eq(project_id))
            .filter(kol_group::Column::Name.eq(group_seed.name))
            .one(conn)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let group = kol_group::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            name: Set(group_seed.name.to_string()),
            video_count: Set(group_seed.video_count),
            publish_day: Set(Some(group_seed.publish_day.to_string())),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        summary.groups += 1;

        for &name in group_seed.kols {
            let Some(&kol_id) = kol_ids.get(name) else {
                warn!(kol = name, "KOL not found for group seed, skipping member");
                continue;
            };
            kol_group_member::ActiveModel {
                kol_group_id: Set(group.id),
                kol_id: Set(kol_id),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await?;
        }
    }

    if summary.clients + summary.projects + summary.kols + summary.groups > 0 {
        info!(
            clients = summary.clients,
            projects = summary.projects,
            kols = summary.kols,
            groups = summary.groups,
            "seeded tenant roster"
        );
    }

    Ok(summary)
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite indexes, so they are
/// created manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Upserts from channel sync key on (platform, provider_post_id).
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("uix_post_platform_provider")
        .table(post::Entity)
        .col(post::Column::Platform)
        .col(post::Column::ProviderPostId)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index uix_post_platform_provider exists"),
        Err(e) => warn!("Failed to create index uix_post_platform_provider: {}", e),
    }

    // Tag-pool queries join clips to shoots by shoot_id.
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_clip_shoot")
        .table(clip::Entity)
        .col(clip::Column::ShootId)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_clip_shoot exists"),
        Err(e) => warn!("Failed to create index idx_clip_shoot: {}", e),
    }

    Ok(())
}

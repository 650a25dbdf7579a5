mod common;

use sea_orm::EntityTrait;

use server::entity::{kol_group, shoot};
use server::services::shoot_matcher::{assign_shoot_to_kol_group, assign_unlinked_shoots};

#[tokio::test]
async fn sweep_links_matching_shoots_and_reports_stats() {
    let db = common::test_db().await;
    let project_id = common::create_project(&db, "daiichi", "DB09").await;
    let group_id = common::create_group(
        &db,
        project_id,
        "Mouabbi/O'Shaughnessy/Rimawi",
        &[
            "Dr. Jason Mouabbi",
            "Dr. Joyce O'Shaughnessy",
            "Dr. Mothaffar Rimawi",
        ],
    )
    .await;

    common::create_shoot(
        &db,
        "shoot-1",
        &["Dr. Jason Mouabbi", "Dr. Joyce O'Shaughnessy"],
    )
    .await;
    common::create_shoot(&db, "shoot-2", &["Dr. Unknown Stranger"]).await;
    common::create_shoot(&db, "shoot-3", &[]).await;

    let stats = assign_unlinked_shoots(&db).await.unwrap();
    assert_eq!(stats.total_unlinked, 3);
    assert_eq!(stats.assigned, 1);
    assert_eq!(stats.unmatched, 2);
    assert_eq!(stats.assignments.len(), 1);
    assert_eq!(stats.assignments[0].shoot_id, "shoot-1");
    assert_eq!(stats.assignments[0].kol_group_id, group_id);
    assert_eq!(stats.assignments[0].project_id, project_id);

    let linked = shoot::Entity::find_by_id("shoot-1")
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(linked.kol_group_id, Some(group_id));
    assert_eq!(linked.project_id, Some(project_id));
}

#[tokio::test]
async fn sweep_is_idempotent() {
    let db = common::test_db().await;
    let project_id = common::create_project(&db, "chm", "SOCIAL").await;
    common::create_group(
        &db,
        project_id,
        "Iyengar/Hamilton",
        &["Dr. Neil Iyengar", "Dr. Erika Hamilton"],
    )
    .await;

    common::create_shoot(&db, "shoot-1", &["Dr. Erika Hamilton"]).await;

    let first = assign_unlinked_shoots(&db).await.unwrap();
    assert_eq!(first.assigned, 1);

    // All matchable shoots are linked now; a second sweep assigns nothing.
    let second = assign_unlinked_shoots(&db).await.unwrap();
    assert_eq!(second.assigned, 0);
}

#[tokio::test]
async fn single_shoot_assignment_skips_already_linked() {
    let db = common::test_db().await;
    let project_id = common::create_project(&db, "puma", "NERATINIB").await;
    common::create_group(
        &db,
        project_id,
        "Mouabbi/Birhiray/Chang",
        &["Dr. Jason Mouabbi", "Dr. Avan Birhiray", "Dr. Jennifer Chang"],
    )
    .await;

    let unlinked = common::create_shoot(&db, "shoot-1", &["Dr. Jennifer Chang"]).await;
    assert!(assign_shoot_to_kol_group(&db, &unlinked).await.unwrap());

    let linked = shoot::Entity::find_by_id("shoot-1")
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(linked.kol_group_id.is_some());
    assert!(!assign_shoot_to_kol_group(&db, &linked).await.unwrap());
}

#[tokio::test]
async fn matcher_prefers_group_with_most_surname_overlap() {
    let db = common::test_db().await;
    let project_id = common::create_project(&db, "az", "ENHERTU").await;
    common::create_group(
        &db,
        project_id,
        "Mouabbi Cairo",
        &["Dr. Jason Mouabbi", "Dr. Mariana Cairo"],
    )
    .await;
    let triple = common::create_group(
        &db,
        project_id,
        "Mouabbi/O'Shaughnessy/Rimawi",
        &[
            "Dr. Jason Mouabbi",
            "Dr. Joyce O'Shaughnessy",
            "Dr. Mothaffar Rimawi",
        ],
    )
    .await;

    // Two of three surnames hit the triple group; only one hits the pair.
    common::create_shoot(
        &db,
        "shoot-1",
        &["Dr. Jason Mouabbi", "Dr. Joyce O'Shaughnessy"],
    )
    .await;

    let stats = assign_unlinked_shoots(&db).await.unwrap();
    assert_eq!(stats.assigned, 1);
    assert_eq!(stats.assignments[0].kol_group_id, triple);
}

#[tokio::test]
async fn roster_seed_is_idempotent_and_links_real_schedule_data() {
    let db = common::test_db().await;

    let first = server::seed::seed_roster(&db).await.unwrap();
    assert_eq!(first.clients, 4);
    assert_eq!(first.projects, 7);
    assert_eq!(first.kols, 22);
    assert_eq!(first.groups, 17);

    let second = server::seed::seed_roster(&db).await.unwrap();
    assert_eq!(second.clients, 0);
    assert_eq!(second.projects, 0);
    assert_eq!(second.kols, 0);
    assert_eq!(second.groups, 0);

    // The O'Shaughnessey spelling variant in the shoot's doctor list still
    // resolves onto the triple group.
    common::create_shoot(
        &db,
        "shoot-1",
        &["Dr. Jason Mouabbi", "Dr. Joyce O'Shaughnessey"],
    )
    .await;
    let stats = assign_unlinked_shoots(&db).await.unwrap();
    assert_eq!(stats.assigned, 1);

    let group = kol_group::Entity::find_by_id(stats.assignments[0].kol_group_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(group.name, "Mouabbi/O'Shaughnessey/Rimawi");
}

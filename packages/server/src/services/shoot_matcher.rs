//! Shoot-to-KOL-group matching.
//!
//! Links synced shoots into the tenant hierarchy
//! (Client -> Project -> KolGroup -> Shoot -> Clip) by resolving the raw
//! doctor names on a shoot against the KOL group rosters.

use std::collections::{HashMap, HashSet};

use common::{extract_group_surnames, normalize_doctor_name};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, Set, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entity::{kol, kol_group, kol_group_member, shoot};
use crate::models::matching::{ShootAssignment, ShootAssignmentStats};

/// A KOL group's matchable surname set, assembled from its delimited name
/// and its member roster.
#[derive(Debug, Clone)]
pub struct GroupRoster {
    pub group_id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub surnames: HashSet<String>,
}

/// Load every KOL group with its surname set. Two bulk queries; no per-group
/// round trips.
pub async fn load_group_rosters<C: ConnectionTrait>(conn: &C) -> Result<Vec<GroupRoster>, DbErr> {
    let groups = kol_group::Entity::find().all(conn).await?;
    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let members = kol_group_member::Entity::find()
        .find_also_related(kol::Entity)
        .all(conn)
        .await?;

    let mut member_surnames: HashMap<Uuid, HashSet<String>> = HashMap::new();
    for (member, kol) in members {
        if let Some(kol) = kol {
            let surname = normalize_doctor_name(&kol.name);
            if !surname.is_empty() {
                member_surnames
                    .entry(member.kol_group_id)
                    .or_default()
                    .insert(surname);
            }
        }
    }

    Ok(groups
        .into_iter()
        .map(|group| {
            let mut surnames = extract_group_surnames(&group.name);
            if let Some(extra) = member_surnames.remove(&group.id) {
                surnames.extend(extra);
            }
            GroupRoster {
                group_id: group.id,
                project_id: group.project_id,
                name: group.name,
                surnames,
            }
        })
        .collect())
}

/// Find the group with the largest surname overlap against the input set.
///
/// Tie-break: a challenger with an equal overlap count replaces the incumbent
/// only when it fully explains the input (the input set is a subset of its
/// surnames). Groups with zero overlap are never candidates.
pub fn find_best_group<'a>(
    rosters: &'a [GroupRoster],
    surnames: &HashSet<String>,
) -> Option<&'a GroupRoster> {
    let mut best: Option<&GroupRoster> = None;
    let mut best_count = 0usize;

    for roster in rosters {
        let count = roster.surnames.intersection(surnames).count();
        if count == 0 {
            continue;
        }
        if count > best_count {
            best = Some(roster);
            best_count = count;
        } else if count == best_count && best.is_some() && surnames.is_subset(&roster.surnames) {
            best = Some(roster);
        }
    }

    best
}

/// Normalize a shoot's raw doctor list into a surname set.
fn shoot_surnames(shoot: &shoot::Model) -> HashSet<String> {
    shoot
        .doctors
        .iter()
        .flat_map(|doctors| doctors.iter())
        .map(|name| normalize_doctor_name(name))
        .filter(|surname| !surname.is_empty())
        .collect()
}

/// Try to link one shoot against pre-loaded rosters. Returns the assignment
/// record when a link was written.
async fn try_assign<C: ConnectionTrait>(
    conn: &C,
    shoot: &shoot::Model,
    rosters: &[GroupRoster],
) -> Result<Option<ShootAssignment>, DbErr> {
    // Already fully linked: idempotent skip.
    if shoot.kol_group_id.is_some() && shoot.project_id.is_some() {
        debug!(shoot_id = %shoot.id, "shoot already linked, skipping");
        return Ok(None);
    }

    let surnames = shoot_surnames(shoot);
    if surnames.is_empty() {
        return Ok(None);
    }

    let Some(roster) = find_best_group(rosters, &surnames) else {
        debug!(shoot_id = %shoot.id, ?surnames, "no KOL group match for shoot");
        return Ok(None);
    };

    let mut active: shoot::ActiveModel = shoot.clone().into();
    active.kol_group_id = Set(Some(roster.group_id));
    active.project_id = Set(Some(roster.project_id));
    active.update(conn).await?;

    info!(
        shoot_id = %shoot.id,
        shoot_name = %shoot.name,
        group = %roster.name,
        project_id = %roster.project_id,
        "linked shoot to KOL group"
    );

    Ok(Some(ShootAssignment {
        shoot_id: shoot.id.clone(),
        shoot_name: shoot.name.clone(),
        kol_group_id: roster.group_id,
        project_id: roster.project_id,
    }))
}

/// Link a single shoot, loading the group rosters first. Called once per
/// newly-synced shoot during webhook ingestion. Returns whether a link was
/// written; the caller controls the transaction.
pub async fn assign_shoot_to_kol_group<C: ConnectionTrait>(
    conn: &C,
    shoot: &shoot::Model,
) -> Result<bool, DbErr> {
    let rosters = load_group_rosters(conn).await?;
    assign_shoot_with_rosters(conn, shoot, &rosters).await
}

/// Link a single shoot against rosters the caller already loaded (bulk
/// ingestion reuses one roster load across many shoots).
pub async fn assign_shoot_with_rosters<C: ConnectionTrait>(
    conn: &C,
    shoot: &shoot::Model,
    rosters: &[GroupRoster],
) -> Result<bool, DbErr> {
    Ok(try_assign(conn, shoot, rosters).await?.is_some())
}

/// Sweep all shoots missing a group or project link, committing once at the
/// end. Re-running is safe: already-linked shoots are skipped.
pub async fn assign_unlinked_shoots(
    db: &DatabaseConnection,
) -> Result<ShootAssignmentStats, DbErr> {
    let txn = db.begin().await?;

    let rosters = load_group_rosters(&txn).await?;
    let unlinked = shoot::Entity::find()
        .filter(
            Condition::any()
                .add(shoot::Column::KolGroupId.is_null())
                .add(shoot::Column::ProjectId.is_null()),
        )
        .all(&txn)
        .await?;

    let mut stats = ShootAssignmentStats {
        total_unlinked: unlinked.len() as u64,
        ..Default::default()
    };

    for shoot in &unlinked {
        match try_assign(&txn, shoot, &rosters).await? {
            Some(assignment) => {
                stats.assigned += 1;
                stats.assignments.push(assignment);
            }
            None => stats.unmatched += 1,
        }
    }

    txn.commit().await?;

    info!(
        total_unlinked = stats.total_unlinked,
        assigned = stats.assigned,
        unmatched = stats.unmatched,
        "shoot assignment sweep complete"
    );

    Ok(stats)
}

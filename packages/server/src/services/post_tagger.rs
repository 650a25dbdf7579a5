//! Post tagging pipeline.
//!
//! Official-channel posts (`source = direct`) arrive without tags. The
//! two-pass pipeline first tries to match a post's title/description to a
//! KOL group and inherit that group's tag pool (the union of tags on clips
//! under the group's shoots), then falls back to the content scanner.
//! Branded posts (`source = webhook`) instead receive their linked clip's
//! tags verbatim through [`propagate_clip_tags_to_posts`].
//!
//! Only posts with `tags IS NULL` are ever touched; processed posts keep an
//! empty list so a rerun is a no-op. Mutations are staged on the caller's
//! connection; the caller owns the commit boundary.

use std::collections::{BTreeSet, HashMap};

use common::{TagList, extract_surnames, scan_text};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entity::post::PostSource;
use crate::entity::{clip, post, shoot};
use crate::models::matching::PostTaggingStats;
use crate::services::shoot_matcher::{GroupRoster, find_best_group, load_group_rosters};
use crate::services::tag_vocab::build_vocabulary;

/// Copy tags from clips onto their linked branded posts.
///
/// Touches only webhook posts with `tags IS NULL` whose clip has a non-empty
/// tag list, so repeated runs are no-ops. Returns the number of posts
/// updated.
pub async fn propagate_clip_tags_to_posts<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    let rows = post::Entity::find()
        .filter(post::Column::Source.eq(PostSource::Webhook))
        .filter(post::Column::Tags.is_null())
        .filter(post::Column::ClipId.is_not_null())
        .find_also_related(clip::Entity)
        .all(conn)
        .await?;

    let mut updated = 0u64;
    for (post, clip) in rows {
        let Some(tags) = clip.and_then(|clip| clip.tags) else {
            continue;
        };
        if tags.is_empty() {
            continue;
        }
        let mut active: post::ActiveModel = post.into();
        active.tags = Set(Some(tags));
        active.update(conn).await?;
        updated += 1;
    }

    info!(updated, "propagated clip tags to branded posts");
    Ok(updated)
}

/// Per-group context for a tagging run: merged tag pools and first-shoot
/// fallbacks, built from bulk queries up front.
struct GroupContext {
    /// Merged tag pool per group. Groups sharing a name act as one pool, so
    /// a group without clips inherits from a same-named sibling elsewhere.
    pools: HashMap<Uuid, Vec<String>>,
    /// First shoot seen per group; used only as a fallback link target.
    first_shoot: HashMap<Uuid, String>,
}

async fn load_group_context<C: ConnectionTrait>(
    conn: &C,
    rosters: &[GroupRoster],
) -> Result<GroupContext, DbErr> {
    let shoots = shoot::Entity::find()
        .filter(shoot::Column::KolGroupId.is_not_null())
        .all(conn)
        .await?;

    let mut shoot_group: HashMap<String, Uuid> = HashMap::new();
    let mut first_shoot: HashMap<Uuid, String> = HashMap::new();
    for shoot in &shoots {
        let Some(group_id) = shoot.kol_group_id else {
            continue;
        };
        shoot_group.insert(shoot.id.clone(), group_id);
        first_shoot.entry(group_id).or_insert_with(|| shoot.id.clone());
    }

    let clips = clip::Entity::find()
        .filter(clip::Column::Tags.is_not_null())
        .filter(clip::Column::ShootId.is_not_null())
        .all(conn)
        .await?;

    let mut group_tags: HashMap<Uuid, BTreeSet<String>> = HashMap::new();
    for clip in clips {
        let (Some(shoot_id), Some(tags)) = (clip.shoot_id, clip.tags) else {
            continue;
        };
        let Some(group_id) = shoot_group.get(&shoot_id) else {
            continue;
        };
        group_tags.entry(*group_id).or_default().extend(tags.0);
    }

    // Merge pools across groups with identical names.
    let mut name_pools: HashMap<&str, BTreeSet<String>> = HashMap::new();
    for roster in rosters {
        let pool = name_pools.entry(roster.name.as_str()).or_default();
        if let Some(tags) = group_tags.get(&roster.group_id) {
            pool.extend(tags.iter().cloned());
        }
    }

    let pools = rosters
        .iter()
        .map(|roster| {
            let pool = name_pools
                .get(roster.name.as_str())
                .map(|tags| tags.iter().cloned().collect())
                .unwrap_or_default();
            (roster.group_id, pool)
        })
        .collect();

    Ok(GroupContext { pools, first_shoot })
}

/// Two-pass tag all untagged official posts.
///
/// Pass 1: KOL-group match on title+description; a match with a non-empty
/// pool stamps the pool and back-fills `shoot_id`. Pass 2: the content
/// scanner; any hits are stamped (still back-filling `shoot_id` from an
/// empty-pool KOL match). Posts with no signal get an empty tag list so they
/// are not reprocessed.
pub async fn tag_official_posts<C: ConnectionTrait>(conn: &C) -> Result<PostTaggingStats, DbErr> {
    let rosters = load_group_rosters(conn).await?;
    let vocab = build_vocabulary(conn).await?;
    let context = load_group_context(conn, &rosters).await?;

    let untagged = post::Entity::find()
        .filter(post::Column::Source.eq(PostSource::Direct))
        .filter(post::Column::Tags.is_null())
        .all(conn)
        .await?;

    let mut stats = PostTaggingStats {
        total_untagged: untagged.len() as u64,
        ..Default::default()
    };

    for post in untagged {
        let text = format!(
            "{} {}",
            post.title.as_deref().unwrap_or(""),
            post.description.as_deref().unwrap_or("")
        );

        let surnames = extract_surnames(&text);
        let kol_match = find_best_group(&rosters, &surnames);

        let mut active: post::ActiveModel = post.clone().into();

        if let Some(roster) = kol_match {
            let pool = context.pools.get(&roster.group_id);
            if let Some(pool) = pool.filter(|pool| !pool.is_empty()) {
                stats.kol_matched += 1;
                stats.tags_applied += pool.len() as u64;
                active.tags = Set(Some(TagList(pool.clone())));
                if post.shoot_id.is_none()
                    && let Some(shoot_id) = context.first_shoot.get(&roster.group_id)
                {
                    active.shoot_id = Set(Some(shoot_id.clone()));
                }
                active.update(conn).await?;
                info!(
                    post_id = %post.id,
                    group = %roster.name,
                    tags = pool.len(),
                    "tagged post from KOL group pool"
                );
                continue;
            }
        }

        let scanned = scan_text(&vocab, &text);
        if !scanned.is_empty() {
            stats.content_scanned += 1;
            stats.tags_applied += scanned.len() as u64;
            debug!(post_id = %post.id, tags = scanned.len(), "tagged post from content scan");
            active.tags = Set(Some(TagList(scanned)));
            // A KOL match with an empty pool still pins down the shoot.
            if post.shoot_id.is_none()
                && let Some(shoot_id) = kol_match
                    .and_then(|roster| context.first_shoot.get(&roster.group_id))
            {
                active.shoot_id = Set(Some(shoot_id.clone()));
            }
            active.update(conn).await?;
        } else {
            stats.empty += 1;
            // Mark processed so the post is not picked up again.
            active.tags = Set(Some(TagList::default()));
            active.update(conn).await?;
        }
    }

    info!(
        total_untagged = stats.total_untagged,
        kol_matched = stats.kol_matched,
        content_scanned = stats.content_scanned,
        empty = stats.empty,
        tags_applied = stats.tags_applied,
        "post tagging complete"
    );

    Ok(stats)
}

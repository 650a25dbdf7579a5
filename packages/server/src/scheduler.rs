//! Periodic tagging pass.
//!
//! Runs the shoot-assignment sweep, clip-tag propagation, and the post
//! tagger on a fixed interval. Every operation is idempotent, so overlapping
//! restarts are harmless; do not run two schedulers against one database at
//! the same time.

use std::time::Duration;

use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{error, info};

use crate::config::TaggingConfig;
use crate::services::{post_tagger, shoot_matcher};

/// Run the tagging scheduler as a background task.
pub async fn run_tagging_scheduler(db: DatabaseConnection, config: TaggingConfig) {
    info!(
        interval_secs = config.interval_secs,
        "Starting tagging scheduler"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs));

    loop {
        interval.tick().await;

        if let Err(e) = run_tagging_pass(&db).await {
            error!(error = %e, "Tagging pass failed");
        }
    }
}

/// One full pass: link shoots, propagate clip tags, tag official posts.
pub async fn run_tagging_pass(db: &DatabaseConnection) -> anyhow::Result<()> {
    let shoot_stats = shoot_matcher::assign_unlinked_shoots(db).await?;

    let txn = db.begin().await?;
    let propagated = post_tagger::propagate_clip_tags_to_posts(&txn).await?;
    let post_stats = post_tagger::tag_official_posts(&txn).await?;
    txn.commit().await?;

    info!(
        shoots_assigned = shoot_stats.assigned,
        shoots_unmatched = shoot_stats.unmatched,
        posts_propagated = propagated,
        posts_kol_matched = post_stats.kol_matched,
        posts_content_scanned = post_stats.content_scanned,
        posts_empty = post_stats.empty,
        "tagging pass complete"
    );

    Ok(())
}

//! One-time tag backfill.
//!
//! 1. Link unlinked shoots to KOL groups.
//! 2. Copy clip tags onto branded posts (`source = webhook`).
//! 3. Two-pass tag official posts (`source = direct`).
//!
//! Usage: `cargo run --bin backfill_tags`

use sea_orm::TransactionTrait;
use tracing::{Level, info};

use server::config::AppConfig;
use server::services::{post_tagger, shoot_matcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;
    let db = server::database::init_db(&config.database.url).await?;

    let shoot_stats = shoot_matcher::assign_unlinked_shoots(&db).await?;
    info!(
        assigned = shoot_stats.assigned,
        unmatched = shoot_stats.unmatched,
        "step 1: shoot assignment"
    );

    let txn = db.begin().await?;
    let propagated = post_tagger::propagate_clip_tags_to_posts(&txn).await?;
    txn.commit().await?;
    info!(updated = propagated, "step 2: clip tag propagation");

    let txn = db.begin().await?;
    let post_stats = post_tagger::tag_official_posts(&txn).await?;
    txn.commit().await?;
    info!(
        total_untagged = post_stats.total_untagged,
        kol_matched = post_stats.kol_matched,
        content_scanned = post_stats.content_scanned,
        empty = post_stats.empty,
        tags_applied = post_stats.tags_applied,
        "step 3: official post tagging"
    );

    info!("backfill complete");
    Ok(())
}

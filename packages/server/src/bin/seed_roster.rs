//! Seed the tenant roster (clients, projects, KOLs, KOL groups).
//!
//! Usage: `cargo run --bin seed_roster`

use tracing::{Level, info};

use server::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;
    let db = server::database::init_db(&config.database.url).await?;

    let summary = server::seed::seed_roster(&db).await?;
    info!(
        clients = summary.clients,
        projects = summary.projects,
        kols = summary.kols,
        groups = summary.groups,
        "roster seeding complete"
    );

    Ok(())
}

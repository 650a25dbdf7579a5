//! Tag vocabulary assembly.
//!
//! The scannable vocabulary is derived from storage on every tagging run:
//! the distinct union of all clip tags across the tenant corpus, plus the
//! full KOL roster (which recovers doctors that have no clips yet). The pure
//! vocabulary/rule machinery lives in [`common::scan`].

use std::collections::BTreeSet;

use common::TagVocabulary;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use tracing::debug;

use crate::entity::{clip, kol};

/// Build the tag vocabulary from the clip-tag corpus and the KOL roster.
/// Two bulk queries; rebuilt per run, never cached.
pub async fn build_vocabulary<C: ConnectionTrait>(conn: &C) -> Result<TagVocabulary, DbErr> {
    let clips = clip::Entity::find()
        .filter(clip::Column::Tags.is_not_null())
        .all(conn)
        .await?;

    // BTreeSet keeps the corpus sorted so duplicate-keyword resolution is
    // deterministic.
    let mut corpus: BTreeSet<String> = BTreeSet::new();
    for clip in clips {
        if let Some(tags) = clip.tags {
            corpus.extend(tags.0);
        }
    }

    let roster: Vec<String> = kol::Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|kol| kol.name)
        .collect();

    let vocab = TagVocabulary::build(corpus, roster);
    debug!(
        entries = vocab.entries().len(),
        known_doctors = vocab.known_doctors.len(),
        "built tag vocabulary"
    );

    Ok(vocab)
}

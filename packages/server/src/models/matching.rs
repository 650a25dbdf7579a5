use serde::Serialize;
use uuid::Uuid;

/// One shoot successfully linked during an assignment sweep; kept for
/// audit/logging.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ShootAssignment {
    pub shoot_id: String,
    pub shoot_name: String,
    pub kol_group_id: Uuid,
    pub project_id: Uuid,
}

/// Result of a batch shoot-assignment sweep.
#[derive(Debug, Default, Serialize, utoipa::ToSchema)]
pub struct ShootAssignmentStats {
    /// Shoots with a missing group or project link at the start of the sweep.
    #[schema(example = 12)]
    pub total_unlinked: u64,
    #[schema(example = 9)]
    pub assigned: u64,
    #[schema(example = 3)]
    pub unmatched: u64,
    pub assignments: Vec<ShootAssignment>,
}

/// Result of a two-pass tagging run over untagged direct posts.
#[derive(Debug, Default, Serialize, utoipa::ToSchema)]
pub struct PostTaggingStats {
    #[schema(example = 40)]
    pub total_untagged: u64,
    /// Posts tagged from a matched KOL group's tag pool.
    #[schema(example = 25)]
    pub kol_matched: u64,
    /// Posts tagged by the content scanner after no usable KOL match.
    #[schema(example = 10)]
    pub content_scanned: u64,
    /// Posts marked processed with no tags (prevents reprocessing).
    #[schema(example = 5)]
    pub empty: u64,
    #[schema(example = 87)]
    pub tags_applied: u64,
}

/// Response for the clip-tag propagation endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PropagationResult {
    /// Branded posts that received tags from their linked clip.
    #[schema(example = 17)]
    pub updated: u64,
}

//! Content tag primitives.
//!
//! Tags are `category:Value` strings ("drug:Enhertu", "biomarker:HER2-low",
//! "doctor:Hamilton"). Clips arrive from upstream sync with tag lists already
//! attached; posts have theirs inferred by the tagging pipeline.

use serde::{Deserialize, Serialize};

/// Tag category reserved for doctor mentions; resolved through surname
/// matching rather than keyword rules.
pub const DOCTOR_CATEGORY: &str = "doctor";

/// A list of `category:Value` tags, stored as a JSON array column.
///
/// The column is nullable and the two states are load-bearing: a `NULL`
/// column (`Option::None`) means the row has never been through the tagging
/// pipeline, while an empty list means it was processed and nothing matched.
/// Collapsing the two would make every unmatched post eligible for endless
/// reprocessing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sea-orm", derive(sea_orm::FromJsonQueryResult))]
pub struct TagList(pub Vec<String>);

impl TagList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for TagList {
    fn from(tags: Vec<String>) -> Self {
        Self(tags)
    }
}

/// Split a tag into its category and value at the first colon.
/// Returns `None` for strings without a category prefix.
pub fn split_tag(tag: &str) -> Option<(&str, &str)> {
    tag.split_once(':')
}

/// Capitalize a normalized surname for a synthesized `doctor:` tag
/// ("hamilton" -> "Hamilton").
pub fn capitalize_surname(surname: &str) -> String {
    let mut chars = surname.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tag_at_first_colon() {
        assert_eq!(split_tag("drug:Enhertu"), Some(("drug", "Enhertu")));
        assert_eq!(split_tag("trial:DB09: interim"), Some(("trial", "DB09: interim")));
        assert_eq!(split_tag("untyped"), None);
    }

    #[test]
    fn capitalize_surname_first_letter_only() {
        assert_eq!(capitalize_surname("hamilton"), "Hamilton");
        assert_eq!(capitalize_surname("oshaughnessey"), "Oshaughnessey");
        assert_eq!(capitalize_surname(""), "");
    }
}

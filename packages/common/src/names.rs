//! Doctor-name normalization.
//!
//! Everything in the matching core compares names through a single unit: the
//! normalized, lowercase, punctuation-stripped surname key. Raw names arrive
//! in many shapes ("Dr. Jason Mouabbi", "Joyce O'Shaughnessey, MD",
//! "mouabbi") and must all collapse to the same key.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DR_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^dr\.?\s*").unwrap());
static CREDENTIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",?\s*(md|phd|do|np|pa|rn)\.?$").unwrap());
static GROUP_DELIM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[/,&]").unwrap());

/// Normalize a doctor name to its surname key.
///
/// - "Dr. Jason Mouabbi" -> "mouabbi"
/// - "Dr. Joyce O'Shaughnessey" -> "oshaughnessey"
/// - "Jason Mouabbi, MD" -> "mouabbi"
/// - "Mouabbi" -> "mouabbi"
///
/// Malformed input never fails; it yields an empty or degenerate key which
/// callers treat as "no match possible".
pub fn normalize_doctor_name(name: &str) -> String {
    let name = name.trim().to_lowercase();
    let name = DR_PREFIX_RE.replace(&name, "");
    let name = CREDENTIAL_RE.replace(&name, "");
    let name: String = name
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '-'))
        .collect();

    match name.split_whitespace().next_back() {
        Some(last) => last.to_string(),
        None => String::new(),
    }
}

/// Extract normalized surnames from a delimited KOL group name like
/// "Mouabbi/O'Shaughnessy/Rimawi" or "Kang, Bardia".
pub fn extract_group_surnames(group_name: &str) -> HashSet<String> {
    GROUP_DELIM_RE
        .split(group_name)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(normalize_doctor_name)
        .filter(|surname| !surname.is_empty())
        .collect()
}

/// Raw doctor-name strings as synced from the upstream production tool.
/// Stored as a JSON array column on shoots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sea-orm", derive(sea_orm::FromJsonQueryResult))]
pub struct NameList(pub Vec<String>);

impl NameList {
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

impl From<Vec<String>> for NameList {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

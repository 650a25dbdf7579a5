//! Free-text surname extraction.
//!
//! Scans video titles, descriptions, and social post text for doctor-name
//! patterns. Four independent pattern families run over the same text and
//! their results are unioned. The families are intentionally permissive:
//! false positives are filtered downstream by intersecting against the known
//! roster surnames.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::names::normalize_doctor_name;

// Name-word: "Bardia", "O'Shaughnessey", "O’Dea" (curly apostrophe).
const NAME_WORD: &str = r"[A-Z][a-z]*(?:['’][A-Za-z]+)+|[A-Z][a-z]+";

/// "Dr. Firstname Lastname", "Dr. Surname", "Dr. VK Gadi" (initials token).
/// Captures one or two name-words; roster matching filters out non-names.
static TITLED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"Dr\.?\s+(?:[A-Z]{{1,3}}\s+)?({NAME_WORD})(?:\s+({NAME_WORD}))?"
    ))
    .unwrap()
});

/// "Drs. Name1, Name2 & Name3"; the list runs until a dash or end of text.
static PLURAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Drs\.?\s+(.+?)(?:\s*[-–—]|\s*$)").unwrap());

static PLURAL_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,&]|\band\b").unwrap());

static NAME_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NAME_WORD).unwrap());

/// Slash-separated groups, common in upstream shoot titles ("Mouabbi/Rimawi").
static SLASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+(?:/\w+)+").unwrap());

/// "featuring Hamilton" / "with Mouabbi" without a "Dr." prefix.
static IMPLICIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:with|featuring|ft\.?)\s+([A-Z][a-z'’]+)").unwrap());

static DR_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Dr\.?\s*$").unwrap());

fn keep(surnames: &mut HashSet<String>, raw: &str) {
    let normalized = normalize_doctor_name(raw);
    if normalized.chars().count() > 2 {
        surnames.insert(normalized);
    }
}

/// Extract the set of normalized surnames mentioned in free text.
///
/// Empty or pattern-free text yields an empty set; this function never fails.
pub fn extract_surnames(text: &str) -> HashSet<String> {
    let mut surnames = HashSet::new();
    if text.is_empty() {
        return surnames;
    }

    // Family 1: titled single names.
    for caps in TITLED_RE.captures_iter(text) {
        for group in [caps.get(1), caps.get(2)].into_iter().flatten() {
            keep(&mut surnames, group.as_str());
        }
    }

    // Family 2: plural "Drs." lists; the last name-word of each segment is
    // taken as the surname.
    for caps in PLURAL_RE.captures_iter(text) {
        for part in PLURAL_SPLIT_RE.split(&caps[1]) {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if let Some(last) = NAME_WORD_RE.find_iter(part).last() {
                keep(&mut surnames, last.as_str());
            }
        }
    }

    // Family 3: slash-delimited groups, each segment independent.
    for group in SLASH_RE.find_iter(text) {
        for part in group.as_str().split('/') {
            keep(&mut surnames, part);
        }
    }

    // Family 4: implicit mentions, skipped when a "Dr." token immediately
    // precedes (family 1 already covered those).
    for caps in IMPLICIT_RE.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        if DR_TAIL_RE.is_match(&text[..whole.start()]) {
            continue;
        }
        keep(&mut surnames, &caps[1]);
    }

    surnames
}

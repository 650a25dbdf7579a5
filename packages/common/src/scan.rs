//! Content tag scanning.
//!
//! A [`TagVocabulary`] is derived from the corpus of tags already attached to
//! clips plus the KOL roster, then applied to free text (post titles and
//! descriptions). Every vocabulary entry carries a category-specific compiled
//! matcher; the rule templates live in [`build_rule`] so the ruleset can be
//! audited and tested entry by entry.
//!
//! Doctor mentions are not keyword rules: they resolve through the surname
//! extractor and the platform-handle table, filtered against the known
//! roster.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::extract::extract_surnames;
use crate::names::normalize_doctor_name;
use crate::tags::{DOCTOR_CATEGORY, capitalize_surname, split_tag};

/// Official platform handles for roster doctors. Mentions like
/// "@erikahamilton" resolve to a surname key without a name pattern firing.
const HANDLE_SURNAMES: &[(&str, &str)] = &[
    ("adityabardia", "bardia"),
    ("drmouabbi", "mouabbi"),
    ("drmothaffarrimawi", "rimawi"),
    ("erikahamilton", "hamilton"),
    ("heathermcarthurmd", "mcarthur"),
    ("jasonmouabbimd", "mouabbi"),
    ("komaljhaveri", "jhaveri"),
    ("markpegram", "pegram"),
    ("markrobsonmd", "robson"),
    ("neiliyengar", "iyengar"),
    ("oshaughnessymd", "oshaughnessy"),
    ("tiffanytrainamd", "traina"),
    ("vkgadi", "gadi"),
];

static HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_.]+)").unwrap());

static DB_TRIAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^db0*(\d+)$").unwrap());

/// Look up the surname for a platform handle (leading `@` optional).
pub fn handle_surname(handle: &str) -> Option<&'static str> {
    let handle = handle.trim_start_matches('@').to_lowercase();
    HANDLE_SURNAMES
        .iter()
        .find(|(h, _)| *h == handle)
        .map(|(_, surname)| *surname)
}

fn word_pattern(keyword: &str) -> String {
    format!(r"\b{}\b", regex::escape(keyword))
}

const T_DXD_PATTERN: &str = r"\bt-?dxd\b|trastuzumab[-\s]deruxtecan";

fn trial_pattern(keyword: &str) -> String {
    // "db9"/"db09" style trial codes also match their expanded
    // "DESTINY-Breast09" form.
    if let Some(caps) = DB_TRIAL_RE.captures(keyword) {
        let number = &caps[1];
        return format!(
            r"\bdb0?{number}\b|destiny[- ]?breast[- ]?0?{number}\b",
            number = number
        );
    }
    word_pattern(keyword)
}

fn drug_pattern(keyword: &str) -> String {
    match keyword {
        "t-dxd" | "trastuzumab deruxtecan" => T_DXD_PATTERN.to_string(),
        "enhertu" => format!(r"\benhertu\b|{T_DXD_PATTERN}"),
        "t-dm1" | "ado-trastuzumab" => r"\bt-?dm1\b|ado-?trastuzumab".to_string(),
        "trodelvy" | "sacituzumab govitecan" => {
            r"\btrodelvy\b|sacituzumab\s+govitecan".to_string()
        }
        "dato-dxd" | "datopotamab" => r"\bdato-?dxd\b|datopotamab".to_string(),
        "thp" => r"\bthp\b".to_string(),
        _ => word_pattern(keyword),
    }
}

fn biomarker_pattern(keyword: &str) -> String {
    match keyword {
        "her2+" | "her2-positive" => r"her2[- ]?(positive|\+)".to_string(),
        "her2-low" => r"her2[- ]?low".to_string(),
        "tnbc" | "triple negative" | "triple-negative" => {
            r"\btnbc\b|triple[- ]negative".to_string()
        }
        "hr+" | "hr-positive" => r"hr[- ]?(positive|\+)".to_string(),
        kw if kw.contains("ultra") => r"her2[- ]?(ultra[- ]?low|low\s*/\s*ultra)".to_string(),
        kw if kw.contains("high-risk") || kw.contains("high risk") => {
            r"high[- ]risk|cns\s+metast|brain\s+met".to_string()
        }
        _ => word_pattern(keyword),
    }
}

fn stage_pattern(keyword: &str) -> String {
    match keyword {
        // The word boundary rejects "neoadjuvant" while matching a bare
        // "adjuvant".
        "ebc" => r"\bebc\b|early[- ]?stage|early breast cancer|\badjuvant".to_string(),
        "mbc" => r"\bmbc\b|metastatic breast cancer|metastatic\s+disease".to_string(),
        _ => word_pattern(keyword),
    }
}

/// Build the compiled matcher for one vocabulary entry. Patterns are matched
/// against lowercased text.
fn build_rule(category: &str, keyword: &str) -> Regex {
    let pattern = match category {
        "trial" => trial_pattern(keyword),
        "drug" => drug_pattern(keyword),
        "biomarker" => biomarker_pattern(keyword),
        "stage" => stage_pattern(keyword),
        // "topic", "brand", and any future category: plain word match.
        _ => word_pattern(keyword),
    };
    // Templates over an escaped keyword; compilation cannot fail for corpus
    // input.
    Regex::new(&pattern).expect("vocabulary rule pattern")
}

/// One scannable vocabulary entry: the corpus tag plus its compiled matcher.
#[derive(Debug)]
pub struct VocabEntry {
    /// Full tag as it appears in the corpus, e.g. "drug:Enhertu".
    pub tag: String,
    pub category: String,
    /// Lowercased value portion, the matcher's seed keyword.
    pub keyword: String,
    matcher: Regex,
}

/// Keyword -> tag lookup derived from the clip-tag corpus, plus the set of
/// known doctor surnames. Rebuilt once per tagging run, never cached across
/// runs.
#[derive(Debug, Default)]
pub struct TagVocabulary {
    entries: Vec<VocabEntry>,
    /// Existing `doctor:` tags by normalized surname; reused so scanned
    /// mentions keep the corpus casing.
    doctor_tags: HashMap<String, String>,
    /// Normalized surnames from `doctor:` tags and the full KOL roster.
    pub known_doctors: HashSet<String>,
}

impl TagVocabulary {
    /// Build a vocabulary from the distinct tag corpus and the roster names.
    ///
    /// Entries with a value portion shorter than 3 characters are dropped
    /// (short keywords collide with ordinary words). When two corpus tags
    /// share a lowercase value, the first in sorted order wins.
    pub fn build<I, R>(corpus_tags: I, roster_names: R) -> Self
    where
        I: IntoIterator<Item = String>,
        R: IntoIterator<Item = String>,
    {
        let corpus: BTreeSet<String> = corpus_tags.into_iter().collect();

        let mut entries = Vec::new();
        let mut doctor_tags: HashMap<String, String> = HashMap::new();
        let mut known_doctors = HashSet::new();
        let mut seen = HashSet::new();

        for tag in &corpus {
            let Some((category, value)) = split_tag(tag) else {
                continue;
            };
            let keyword = value.trim().to_lowercase();
            if keyword.chars().count() < 3 {
                continue;
            }

            if category == DOCTOR_CATEGORY {
                let surname = normalize_doctor_name(value);
                if !surname.is_empty() {
                    known_doctors.insert(surname.clone());
                    doctor_tags.entry(surname).or_insert_with(|| tag.clone());
                }
                continue;
            }

            if !seen.insert((category.to_string(), keyword.clone())) {
                continue;
            }
            entries.push(VocabEntry {
                tag: tag.clone(),
                category: category.to_string(),
                matcher: build_rule(category, &keyword),
                keyword,
            });
        }

        // The roster recovers doctors who have no clips yet and therefore no
        // doctor: tag in the corpus.
        for name in roster_names {
            let surname = normalize_doctor_name(&name);
            if !surname.is_empty() {
                known_doctors.insert(surname);
            }
        }

        Self {
            entries,
            doctor_tags,
            known_doctors,
        }
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.known_doctors.is_empty()
    }

    /// The `doctor:` tag for a normalized surname: the corpus tag when one
    /// exists, otherwise synthesized with a capitalized surname.
    pub fn doctor_tag(&self, surname: &str) -> String {
        self.doctor_tags
            .get(surname)
            .cloned()
            .unwrap_or_else(|| format!("{DOCTOR_CATEGORY}:{}", capitalize_surname(surname)))
    }
}

/// Scan free text against the vocabulary, returning the sorted union of all
/// matched tags.
pub fn scan_text(vocab: &TagVocabulary, text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    let mut matched: BTreeSet<String> = BTreeSet::new();

    for entry in &vocab.entries {
        if entry.matcher.is_match(&lowered) {
            matched.insert(entry.tag.clone());
        }
    }

    // Doctor mentions: extracted names plus mapped handles, filtered against
    // the known roster.
    let mut mentioned = extract_surnames(text);
    for caps in HANDLE_RE.captures_iter(text) {
        if let Some(surname) = handle_surname(&caps[1]) {
            mentioned.insert(surname.to_string());
        }
    }
    for surname in &mentioned {
        if vocab.known_doctors.contains(surname) {
            matched.insert(vocab.doctor_tag(surname));
        }
    }

    matched.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(corpus: &[&str], roster: &[&str]) -> TagVocabulary {
        TagVocabulary::build(
            corpus.iter().map(|t| t.to_string()),
            roster.iter().map(|n| n.to_string()),
        )
    }

    #[test]
    fn short_values_are_dropped() {
        let v = vocab(&["brand:HD", "brand:CHM"], &[]);
        assert_eq!(v.entries().len(), 1);
        assert_eq!(v.entries()[0].tag, "brand:CHM");
    }

    #[test]
    fn duplicate_lowercase_values_keep_first_sorted() {
        let v = vocab(&["drug:enhertu", "drug:Enhertu"], &[]);
        assert_eq!(v.entries().len(), 1);
        // "drug:Enhertu" sorts before "drug:enhertu".
        assert_eq!(v.entries()[0].tag, "drug:Enhertu");
    }

    #[test]
    fn known_doctors_union_of_corpus_and_roster() {
        let v = vocab(
            &["doctor:Hamilton"],
            &["Dr. Jason Mouabbi", "Dr. Joyce O'Shaughnessy"],
        );
        assert!(v.known_doctors.contains("hamilton"));
        assert!(v.known_doctors.contains("mouabbi"));
        assert!(v.known_doctors.contains("oshaughnessy"));
    }

    #[test]
    fn trial_code_matches_expanded_form() {
        let v = vocab(&["trial:DB09"], &[]);
        assert_eq!(scan_text(&v, "New DESTINY-Breast09 data"), vec!["trial:DB09"]);
        assert_eq!(scan_text(&v, "db09 enrollment"), vec!["trial:DB09"]);
        assert_eq!(scan_text(&v, "destiny breast 9 readout"), vec!["trial:DB09"]);
        assert!(scan_text(&v, "DB0900 is unrelated").is_empty());
    }

    #[test]
    fn drug_enhertu_matches_generic_forms() {
        let v = vocab(&["drug:Enhertu"], &[]);
        assert_eq!(scan_text(&v, "Enhertu dosing"), vec!["drug:Enhertu"]);
        assert_eq!(scan_text(&v, "T-DXd in second line"), vec!["drug:Enhertu"]);
        assert_eq!(
            scan_text(&v, "trastuzumab deruxtecan update"),
            vec!["drug:Enhertu"]
        );
    }

    #[test]
    fn drug_plain_keyword_is_word_bounded() {
        let v = vocab(&["drug:Trodelvy"], &[]);
        assert_eq!(scan_text(&v, "trodelvy arm"), vec!["drug:Trodelvy"]);
        assert_eq!(
            scan_text(&v, "sacituzumab govitecan arm"),
            vec!["drug:Trodelvy"]
        );
        assert!(scan_text(&v, "nontrodelvylike").is_empty());
    }

    #[test]
    fn biomarker_her2_variants() {
        let v = vocab(&["biomarker:HER2+", "biomarker:HER2-low"], &[]);
        assert_eq!(
            scan_text(&v, "HER2-positive disease"),
            vec!["biomarker:HER2+"]
        );
        assert_eq!(scan_text(&v, "her2+ tumors"), vec!["biomarker:HER2+"]);
        assert_eq!(scan_text(&v, "HER2 low expressors"), vec!["biomarker:HER2-low"]);
    }

    #[test]
    fn biomarker_tnbc_matches_spelled_out_form() {
        let v = vocab(&["biomarker:TNBC"], &[]);
        assert_eq!(scan_text(&v, "tnbc cohort"), vec!["biomarker:TNBC"]);
        assert_eq!(
            scan_text(&v, "triple-negative breast cancer"),
            vec!["biomarker:TNBC"]
        );
    }

    #[test]
    fn stage_ebc_rejects_neoadjuvant() {
        let v = vocab(&["stage:EBC"], &[]);
        assert_eq!(scan_text(&v, "adjuvant therapy choices"), vec!["stage:EBC"]);
        assert_eq!(scan_text(&v, "early-stage disease"), vec!["stage:EBC"]);
        assert!(scan_text(&v, "neoadjuvant therapy choices").is_empty());
    }

    #[test]
    fn stage_mbc_expansions() {
        let v = vocab(&["stage:MBC"], &[]);
        assert_eq!(
            scan_text(&v, "metastatic breast cancer outcomes"),
            vec!["stage:MBC"]
        );
        assert_eq!(scan_text(&v, "mbc survivorship"), vec!["stage:MBC"]);
    }

    #[test]
    fn doctor_mention_requires_known_surname() {
        let v = vocab(&["doctor:Hamilton"], &[]);
        assert_eq!(
            scan_text(&v, "Dr. Hamilton on sequencing"),
            vec!["doctor:Hamilton"]
        );
        // "Dr. Unknown" extracts a surname, but it's not in the roster.
        assert!(scan_text(&v, "Dr. Strangelove on sequencing").is_empty());
    }

    #[test]
    fn doctor_tag_synthesized_when_corpus_has_none() {
        let v = vocab(&[], &["Dr. Erika Hamilton"]);
        assert_eq!(
            scan_text(&v, "Dr. Hamilton joins the panel"),
            vec!["doctor:Hamilton"]
        );
    }

    #[test]
    fn handle_mention_resolves_through_lookup_table() {
        let v = vocab(&["doctor:Hamilton"], &[]);
        assert_eq!(
            scan_text(&v, "Great thread from @erikahamilton today"),
            vec!["doctor:Hamilton"]
        );
        assert_eq!(handle_surname("@ErikaHamilton"), Some("hamilton"));
        assert_eq!(handle_surname("nobody"), None);
    }

    #[test]
    fn scan_unions_categories_and_sorts() {
        let v = vocab(
            &["drug:Enhertu", "biomarker:HER2-low", "doctor:Hamilton", "drug:Trodelvy"],
            &[],
        );
        let tags = scan_text(
            &v,
            "Featuring Dr. Erika Hamilton discussing Enhertu in HER2-low breast cancer",
        );
        assert_eq!(
            tags,
            vec!["biomarker:HER2-low", "doctor:Hamilton", "drug:Enhertu"]
        );
    }

    #[test]
    fn empty_text_scans_to_nothing() {
        let v = vocab(&["drug:Enhertu"], &[]);
        assert!(scan_text(&v, "").is_empty());
    }
}

//! Taxonomy lookup contract and response normalisation.
//!
//! The external animal-data source returns a list of loosely shaped candidate
//! records. This module picks the exact (case-insensitive, trimmed) name
//! match and reduces it to the few fields a pet type keeps:
//! family, genus, attribute words and a lifespan in years.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Seam
// ---------------------------------------------------------------------------

/// Failure of the lookup transport (network, non-2xx status, bad body).
///
/// Distinct from "no record", which is a successful call with no match.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct LookupError(pub String);

/// Black-box species lookup.
///
/// `Ok(None)` means the source answered but had no exact match for `name`.
#[async_trait]
pub trait TaxonomyLookup: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<Option<TaxonomyRecord>, LookupError>;
}

// ---------------------------------------------------------------------------
// Upstream shapes
// ---------------------------------------------------------------------------

/// One candidate from the animal-data source. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimalRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub taxonomy: Option<AnimalTaxonomy>,
    #[serde(default)]
    pub characteristics: Option<AnimalCharacteristics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimalTaxonomy {
    pub family: Option<String>,
    pub genus: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimalCharacteristics {
    pub temperament: Option<String>,
    pub group_behavior: Option<String>,
    pub lifespan: Option<String>,
}

// ---------------------------------------------------------------------------
// Normalised record
// ---------------------------------------------------------------------------

/// The subset of taxonomy data stored on a pet type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyRecord {
    pub family: Option<String>,
    pub genus: Option<String>,
    pub attributes: Vec<String>,
    pub lifespan: Option<u32>,
}

impl From<&AnimalRecord> for TaxonomyRecord {
    fn from(animal: &AnimalRecord) -> Self {
        let taxonomy = animal.taxonomy.clone().unwrap_or_default();
        let traits = animal.characteristics.clone().unwrap_or_default();

        let behaviour = traits
            .temperament
            .filter(|t| !t.is_empty())
            .or(traits.group_behavior)
            .unwrap_or_default();

        Self {
            family: taxonomy.family,
            genus: taxonomy.genus,
            attributes: extract_attributes(&behaviour),
            lifespan: traits.lifespan.as_deref().and_then(extract_lifespan),
        }
    }
}

/// Pick the candidate whose `name` equals `wanted` ignoring case and
/// surrounding whitespace. Candidates that are not objects of the expected
/// shape are skipped.
pub fn find_exact_match(candidates: &[serde_json::Value], wanted: &str) -> Option<AnimalRecord> {
    let wanted = wanted.trim().to_lowercase();
    candidates
        .iter()
        .filter_map(|value| AnimalRecord::deserialize(value).ok())
        .find(|animal| {
            animal
                .name
                .as_deref()
                .is_some_and(|name| name.trim().to_lowercase() == wanted)
        })
}

fn letter_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z]+").expect("valid regex"))
}

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("valid regex"))
}

/// Split behaviour text into maximal runs of ASCII letters.
pub fn extract_attributes(text: &str) -> Vec<String> {
    letter_runs()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Smallest integer among the digit runs of a lifespan description
/// (`"10 - 14 years"` -> `10`). Runs too large to represent are skipped.
pub fn extract_lifespan(text: &str) -> Option<u32> {
    digit_runs()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .min()
}

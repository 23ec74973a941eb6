//! Pet-type profile and list filtering.

use crate::taxonomy::TaxonomyRecord;
use crate::types::TypeId;

/// The immutable part of a pet type: assigned once at creation and never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetTypeProfile {
    pub id: TypeId,
    /// Species name as submitted by the client.
    pub type_name: String,
    pub taxonomy: TaxonomyRecord,
}

/// Query filters for listing pet types. All supplied filters must match.
#[derive(Debug, Clone, Default)]
pub struct PetTypeFilter {
    pub id: Option<String>,
    pub type_name: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    /// Raw value; a non-numeric lifespan filter matches nothing.
    pub lifespan: Option<String>,
    pub has_attribute: Option<String>,
}

fn normalise(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive equality where an absent field compares as `""`.
fn text_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => normalise(wanted) == normalise(actual.unwrap_or_default()),
    }
}

impl PetTypeFilter {
    pub fn matches(&self, profile: &PetTypeProfile) -> bool {
        let taxonomy = &profile.taxonomy;

        text_matches(self.id.as_deref(), Some(&profile.id))
            && text_matches(self.type_name.as_deref(), Some(&profile.type_name))
            && text_matches(self.family.as_deref(), taxonomy.family.as_deref())
            && text_matches(self.genus.as_deref(), taxonomy.genus.as_deref())
            && self.lifespan_matches(taxonomy.lifespan)
            && self.attribute_matches(&taxonomy.attributes)
    }

    fn lifespan_matches(&self, lifespan: Option<u32>) -> bool {
        match self.lifespan.as_deref() {
            None => true,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(wanted) => lifespan.map(i64::from) == Some(wanted),
                Err(_) => false,
            },
        }
    }

    fn attribute_matches(&self, attributes: &[String]) -> bool {
        match self.has_attribute.as_deref() {
            None => true,
            Some(wanted) => {
                let wanted = normalise(wanted);
                attributes.iter().any(|a| normalise(a) == wanted)
            }
        }
    }
}

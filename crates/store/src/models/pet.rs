//! Pet entity model and DTOs.

use menagerie_core::birthdate::format_birthdate;
use menagerie_core::types::{Birthdate, NOT_AVAILABLE};
use serde::{Deserialize, Serialize, Serializer};

/// A pet owned by exactly one pet type.
///
/// Unknown birthdates and missing pictures are `None` here and `"NA"` on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pet {
    pub name: String,
    #[serde(serialize_with = "serialize_birthdate")]
    pub birthdate: Option<Birthdate>,
    #[serde(serialize_with = "serialize_or_na")]
    pub picture: Option<String>,
}

impl Pet {
    /// Case-insensitive identity comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

fn serialize_birthdate<S: Serializer>(
    value: &Option<Birthdate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(date) => serializer.serialize_str(&format_birthdate(date)),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}

fn serialize_or_na<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(NOT_AVAILABLE))
}

/// DTO for creating a pet under a pet type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePet {
    pub name: String,
    /// `DD-MM-YYYY` or `"NA"`; defaults to unknown.
    pub birthdate: Option<String>,
    #[serde(rename = "picture-url")]
    pub picture_url: Option<String>,
}

/// DTO for replacing a pet. `name` is required; an omitted `picture-url`
/// clears the picture, an omitted `birthdate` keeps the current one.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePet {
    pub name: String,
    pub birthdate: Option<String>,
    #[serde(rename = "picture-url")]
    pub picture_url: Option<String>,
}

/// Query parameters for listing pets (`?birthdateGT=&birthdateLT=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetListParams {
    #[serde(rename = "birthdateGT")]
    pub birthdate_gt: Option<String>,
    #[serde(rename = "birthdateLT")]
    pub birthdate_lt: Option<String>,
}

/// Normalise an optional picture URL: blank values count as absent.
pub fn requested_url(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|url| !url.is_empty())
}

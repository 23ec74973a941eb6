//! Pet-type entity model and DTOs.

use menagerie_core::pet_type::{PetTypeFilter, PetTypeProfile};
use menagerie_core::types::TypeId;
use serde::{Deserialize, Serialize};

/// A pet type as returned by the API, with `pets` projected to names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetType {
    pub id: TypeId,
    #[serde(rename = "type")]
    pub type_name: String,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub attributes: Vec<String>,
    pub lifespan: Option<u32>,
    pub pets: Vec<String>,
}

impl PetType {
    pub fn from_profile(profile: &PetTypeProfile, pets: Vec<String>) -> Self {
        Self {
            id: profile.id.clone(),
            type_name: profile.type_name.clone(),
            family: profile.taxonomy.family.clone(),
            genus: profile.taxonomy.genus.clone(),
            attributes: profile.taxonomy.attributes.clone(),
            lifespan: profile.taxonomy.lifespan,
            pets,
        }
    }
}

/// DTO for creating a pet type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePetType {
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Query parameters for `GET /pet-types`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetTypeListParams {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub lifespan: Option<String>,
    #[serde(rename = "hasAttribute")]
    pub has_attribute: Option<String>,
}

impl From<PetTypeListParams> for PetTypeFilter {
    fn from(params: PetTypeListParams) -> Self {
        Self {
            id: params.id,
            type_name: params.type_name,
            family: params.family,
            genus: params.genus,
            lifespan: params.lifespan,
            has_attribute: params.has_attribute,
        }
    }
}

//! Repository for pet types.

use menagerie_core::error::CoreError;
use menagerie_core::pet_type::PetTypeFilter;
use menagerie_core::taxonomy::TaxonomyLookup;

use crate::models::pet_type::{CreatePetType, PetType};
use crate::registry::{duplicate_type, Registry};

/// Create, read, filter and delete operations for pet types.
pub struct PetTypeRepo;

impl PetTypeRepo {
    /// Create a pet type enriched from the taxonomy source.
    ///
    /// The duplicate check runs before the outbound lookup so a known
    /// duplicate never costs a call; it is repeated at insert time.
    pub async fn create(
        registry: &Registry,
        lookup: &dyn TaxonomyLookup,
        input: &CreatePetType,
    ) -> Result<PetType, CoreError> {
        let type_name = input.type_name.as_str();
        if registry.type_name_taken(type_name).await {
            return Err(duplicate_type(type_name));
        }

        let taxonomy = lookup
            .lookup(type_name)
            .await
            .map_err(|e| {
                tracing::warn!(type_name, error = %e, "Taxonomy lookup failed");
                CoreError::Upstream(e.to_string())
            })?
            .ok_or_else(|| {
                CoreError::Validation(format!("No taxonomy record matches '{type_name}'"))
            })?;

        let slot = registry.insert_type(type_name, taxonomy).await?;
        tracing::info!(id = %slot.profile.id, type_name, "Created pet type");
        Ok(slot.view().await)
    }

    /// List pet types matching every supplied filter, in creation order.
    pub async fn list(registry: &Registry, filter: &PetTypeFilter) -> Vec<PetType> {
        let mut out = Vec::new();
        for slot in registry.slots().await {
            if filter.matches(&slot.profile) {
                out.push(slot.view().await);
            }
        }
        out
    }

    /// Find a pet type by id.
    pub async fn find_by_id(registry: &Registry, id: &str) -> Option<PetType> {
        match registry.slot(id).await {
            Some(slot) => Some(slot.view().await),
            None => None,
        }
    }

    /// Delete a pet type. Types that still own pets are refused.
    pub async fn delete(registry: &Registry, id: &str) -> Result<(), CoreError> {
        registry.remove_type(id).await?;
        tracing::info!(id, "Deleted pet type");
        Ok(())
    }
}

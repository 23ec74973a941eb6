//! Process-lifetime state for pet types and their pets.
//!
//! Lock layout:
//!
//! ```text
//! Registry.types   RwLock<IndexMap<id, Arc<PetTypeSlot>>>   table of types
//! slot.writer      Mutex<()>                                serializes pet writes of one type
//! slot.pets        RwLock<PetList>                          the pet sequence itself
//! ```
//!
//! Acquisition order is always `writer` -> `types` -> `pets`. The table lock
//! is only held for lookups and inserts/removals, never across outbound I/O.

use std::sync::Arc;

use indexmap::IndexMap;
use menagerie_core::error::CoreError;
use menagerie_core::ids::IdGenerator;
use menagerie_core::pet_type::PetTypeProfile;
use menagerie_core::taxonomy::TaxonomyRecord;
use menagerie_core::types::TypeId;
use tokio::sync::{Mutex, RwLock};

use crate::models::pet::Pet;
use crate::models::pet_type::PetType;

/// A stored pet plus the URL its current picture was fetched from.
#[derive(Debug, Clone)]
pub struct PetEntry {
    pub pet: Pet,
    pub source_url: Option<String>,
}

/// The ordered pets of one type.
#[derive(Debug, Default)]
pub struct PetList {
    pub entries: Vec<PetEntry>,
    /// Set when the owning type has been deleted. Writers that grabbed the
    /// slot before removal must treat it as gone.
    pub retired: bool,
}

impl PetList {
    /// Index of the pet named `name` (case-insensitive).
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.pet.is_named(name))
    }

    /// Whether any pet still points at the stored picture `filename`.
    pub fn uses_picture(&self, filename: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.pet.picture.as_deref() == Some(filename))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.pet.name.clone()).collect()
    }
}

/// One pet type and the pets it owns.
#[derive(Debug)]
pub struct PetTypeSlot {
    pub profile: PetTypeProfile,
    pub writer: Mutex<()>,
    pub pets: RwLock<PetList>,
}

impl PetTypeSlot {
    fn new(profile: PetTypeProfile) -> Self {
        Self {
            profile,
            writer: Mutex::new(()),
            pets: RwLock::new(PetList::default()),
        }
    }

    /// Render the summary view (`pets` as names).
    pub async fn view(&self) -> PetType {
        let names = self.pets.read().await.names();
        PetType::from_profile(&self.profile, names)
    }
}

/// Shared in-memory registry. Wrap in `Arc` and hand to every handler.
#[derive(Debug, Default)]
pub struct Registry {
    ids: IdGenerator,
    types: RwLock<IndexMap<TypeId, Arc<PetTypeSlot>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a type slot by id.
    pub async fn slot(&self, id: &str) -> Option<Arc<PetTypeSlot>> {
        self.types.read().await.get(id).cloned()
    }

    /// Require a type slot, failing with `NotFound`.
    pub async fn require_slot(&self, id: &str) -> Result<Arc<PetTypeSlot>, CoreError> {
        self.slot(id)
            .await
            .ok_or_else(|| CoreError::not_found("PetType", id))
    }

    /// All type slots in creation order.
    pub async fn slots(&self) -> Vec<Arc<PetTypeSlot>> {
        self.types.read().await.values().cloned().collect()
    }

    /// Whether a type with this name (case-insensitive, trimmed) exists.
    pub async fn type_name_taken(&self, type_name: &str) -> bool {
        let types = self.types.read().await;
        contains_type_name(&types, type_name)
    }

    /// Insert a new type, issuing its id. Re-checks the name under the write
    /// lock so two concurrent creators cannot both succeed.
    pub async fn insert_type(
        &self,
        type_name: &str,
        taxonomy: TaxonomyRecord,
    ) -> Result<Arc<PetTypeSlot>, CoreError> {
        let mut types = self.types.write().await;
        if contains_type_name(&types, type_name) {
            return Err(duplicate_type(type_name));
        }

        let profile = PetTypeProfile {
            id: self.ids.next_id(),
            type_name: type_name.to_string(),
            taxonomy,
        };
        let slot = Arc::new(PetTypeSlot::new(profile));
        types.insert(slot.profile.id.clone(), Arc::clone(&slot));
        Ok(slot)
    }

    /// Remove a type that owns no pets.
    pub async fn remove_type(&self, id: &str) -> Result<(), CoreError> {
        let slot = self.require_slot(id).await?;
        let _writer = slot.writer.lock().await;

        let mut types = self.types.write().await;
        match types.get(id) {
            Some(current) if Arc::ptr_eq(current, &slot) => {}
            _ => return Err(CoreError::not_found("PetType", id)),
        }

        let mut pets = slot.pets.write().await;
        if !pets.entries.is_empty() {
            return Err(CoreError::Validation(format!(
                "Pet type {id} still has {} pet(s)",
                pets.entries.len()
            )));
        }
        pets.retired = true;
        types.shift_remove(id);
        Ok(())
    }
}

fn contains_type_name(types: &IndexMap<TypeId, Arc<PetTypeSlot>>, type_name: &str) -> bool {
    let wanted = type_name.trim().to_lowercase();
    types
        .values()
        .any(|slot| slot.profile.type_name.trim().to_lowercase() == wanted)
}

pub(crate) fn duplicate_type(type_name: &str) -> CoreError {
    CoreError::Validation(format!("Pet type '{type_name}' already exists"))
}

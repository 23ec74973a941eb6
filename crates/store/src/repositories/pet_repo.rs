//! Repository for pets nested under a pet type.
//!
//! Every write holds the owning type's `writer` mutex for its whole
//! duration, including any picture download, so writes to the same type
//! never interleave. The pet list itself is only write-locked for the final
//! commit, which keeps reads responsive while a download is in flight.

use menagerie_core::birthdate::{parse_supplied_birthdate, BirthdateRange};
use menagerie_core::error::CoreError;

use crate::models::pet::{requested_url, CreatePet, Pet, PetListParams, UpdatePet};
use crate::pictures::PictureStore;
use crate::registry::{PetEntry, PetTypeSlot, Registry};

/// CRUD operations for pets, coordinating picture files with records.
pub struct PetRepo;

impl PetRepo {
    /// Create a pet under `type_id`, downloading its picture when a URL is
    /// supplied. Nothing is stored unless every step succeeds.
    pub async fn create(
        registry: &Registry,
        pictures: &PictureStore,
        type_id: &str,
        input: &CreatePet,
    ) -> Result<Pet, CoreError> {
        let slot = registry.require_slot(type_id).await?;
        let _writer = slot.writer.lock().await;

        {
            let pets = slot.pets.read().await;
            ensure_live(&slot, pets.retired)?;
            if pets.position(&input.name).is_some() {
                return Err(duplicate_pet(&input.name, type_id));
            }
        }
        let birthdate = parse_supplied_birthdate(input.birthdate.as_deref())?;

        let source_url = requested_url(input.picture_url.as_deref()).map(str::to_string);
        let picture = match source_url.as_deref() {
            Some(url) => Some(pictures.download(url, type_id, &input.name).await?),
            None => None,
        };

        let pet = Pet {
            name: input.name.clone(),
            birthdate,
            picture,
        };
        slot.pets.write().await.entries.push(PetEntry {
            pet: pet.clone(),
            source_url,
        });

        tracing::info!(type_id, name = %pet.name, "Created pet");
        Ok(pet)
    }

    /// List pets of a type, optionally bounded by birthdate.
    pub async fn list_by_type(
        registry: &Registry,
        type_id: &str,
        params: &PetListParams,
    ) -> Result<Vec<Pet>, CoreError> {
        let slot = registry.require_slot(type_id).await?;
        let range = BirthdateRange::from_params(
            params.birthdate_gt.as_deref(),
            params.birthdate_lt.as_deref(),
        );

        let pets = slot.pets.read().await;
        ensure_live(&slot, pets.retired)?;
        Ok(pets
            .entries
            .iter()
            .filter(|e| range.admits(e.pet.birthdate.as_ref()))
            .map(|e| e.pet.clone())
            .collect())
    }

    /// Find a pet by case-insensitive name.
    pub async fn find_by_name(
        registry: &Registry,
        type_id: &str,
        name: &str,
    ) -> Result<Pet, CoreError> {
        let slot = registry.require_slot(type_id).await?;
        let pets = slot.pets.read().await;
        ensure_live(&slot, pets.retired)?;
        pets.position(name)
            .map(|i| pets.entries[i].pet.clone())
            .ok_or_else(|| pet_not_found(type_id, name))
    }

    /// Replace a pet in place.
    ///
    /// - `picture-url` equal to the remembered URL keeps the current file.
    /// - A different URL downloads a new file under the new name.
    /// - No URL clears the picture.
    ///
    /// Files that are no longer referenced are deleted after the commit.
    pub async fn update(
        registry: &Registry,
        pictures: &PictureStore,
        type_id: &str,
        name: &str,
        input: &UpdatePet,
    ) -> Result<Pet, CoreError> {
        let slot = registry.require_slot(type_id).await?;
        let _writer = slot.writer.lock().await;

        let (index, current) = {
            let pets = slot.pets.read().await;
            ensure_live(&slot, pets.retired)?;
            let index = pets
                .position(name)
                .ok_or_else(|| pet_not_found(type_id, name))?;
            let clash = pets
                .entries
                .iter()
                .enumerate()
                .any(|(i, e)| i != index && e.pet.is_named(&input.name));
            if clash {
                return Err(duplicate_pet(&input.name, type_id));
            }
            (index, pets.entries[index].clone())
        };

        let birthdate = match input.birthdate.as_deref() {
            None => current.pet.birthdate,
            supplied => parse_supplied_birthdate(supplied)?,
        };

        let renamed = current.pet.name != input.name;
        let (picture, source_url) = match requested_url(input.picture_url.as_deref()) {
            Some(url) if current.source_url.as_deref() == Some(url) => {
                tracing::debug!(type_id, name, "Picture URL unchanged, keeping file");
                let memory = if renamed { None } else { Some(url.to_string()) };
                (current.pet.picture.clone(), memory)
            }
            Some(url) => {
                let filename = pictures.download(url, type_id, &input.name).await?;
                (Some(filename), Some(url.to_string()))
            }
            None => (None, None),
        };

        let updated = Pet {
            name: input.name.clone(),
            birthdate,
            picture,
        };
        let stale = {
            let mut pets = slot.pets.write().await;
            pets.entries[index] = PetEntry {
                pet: updated.clone(),
                source_url,
            };
            current.pet.picture.clone().filter(|f| !pets.uses_picture(f))
        };

        if let Some(stale) = stale.as_deref() {
            discard_picture(pictures, stale).await;
        }

        tracing::info!(type_id, from = %current.pet.name, to = %updated.name, "Updated pet");
        Ok(updated)
    }

    /// Delete a pet and its picture file, unless another pet of the type
    /// still references that file.
    pub async fn delete(
        registry: &Registry,
        pictures: &PictureStore,
        type_id: &str,
        name: &str,
    ) -> Result<(), CoreError> {
        let slot = registry.require_slot(type_id).await?;
        let _writer = slot.writer.lock().await;

        let (removed, unused) = {
            let mut pets = slot.pets.write().await;
            ensure_live(&slot, pets.retired)?;
            let index = pets
                .position(name)
                .ok_or_else(|| pet_not_found(type_id, name))?;
            let removed = pets.entries.remove(index);
            let unused = removed.pet.picture.clone().filter(|f| !pets.uses_picture(f));
            (removed, unused)
        };

        if let Some(filename) = unused.as_deref() {
            discard_picture(pictures, filename).await;
        }

        tracing::info!(type_id, name = %removed.pet.name, "Deleted pet");
        Ok(())
    }
}

fn ensure_live(slot: &PetTypeSlot, retired: bool) -> Result<(), CoreError> {
    if retired {
        Err(CoreError::not_found("PetType", slot.profile.id.clone()))
    } else {
        Ok(())
    }
}

fn pet_not_found(type_id: &str, name: &str) -> CoreError {
    CoreError::not_found("Pet", format!("{type_id}/{name}"))
}

fn duplicate_pet(name: &str, type_id: &str) -> CoreError {
    CoreError::Validation(format!("Pet '{name}' already exists under pet type {type_id}"))
}

/// Best-effort removal once the record no longer references the file.
async fn discard_picture(pictures: &PictureStore, filename: &str) {
    if let Err(e) = pictures.delete(filename).await {
        tracing::warn!(%filename, error = %e, "Failed to delete picture file");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use menagerie_core::taxonomy::TaxonomyRecord;

    use super::*;
    use crate::pictures::testing::ScriptedFetcher;

    struct Fixture {
        registry: Registry,
        pictures: PictureStore,
        fetcher: Arc<ScriptedFetcher>,
        dir: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::default());
        fetcher.serve("http://pics/a.png", "image/png", b"a");
        fetcher.serve("http://pics/b.jpg", "image/jpeg", b"b");
        let pictures = PictureStore::new(dir.path(), fetcher.clone());
        let registry = Registry::new();
        registry
            .insert_type("Dog", TaxonomyRecord::default())
            .await
            .unwrap();
        Fixture {
            registry,
            pictures,
            fetcher,
            dir,
        }
    }

    fn new_pet(name: &str, birthdate: Option<&str>, url: Option<&str>) -> CreatePet {
        CreatePet {
            name: name.into(),
            birthdate: birthdate.map(Into::into),
            picture_url: url.map(Into::into),
        }
    }

    fn update(name: &str, birthdate: Option<&str>, url: Option<&str>) -> UpdatePet {
        UpdatePet {
            name: name.into(),
            birthdate: birthdate.map(Into::into),
            picture_url: url.map(Into::into),
        }
    }

    #[tokio::test]
    async fn create_appends_and_defaults_to_na() {
        let f = fixture().await;
        PetRepo::create(&f.registry, &f.pictures, "1", &new_pet("Rex", None, None))
            .await
            .unwrap();
        PetRepo::create(&f.registry, &f.pictures, "1", &new_pet("Ace", Some("01-01-2019"), None))
            .await
            .unwrap();

        let pets = PetRepo::list_by_type(&f.registry, "1", &PetListParams::default())
            .await
            .unwrap();
        let names: Vec<_> = pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Rex", "Ace"]);
        assert_eq!(pets[0].birthdate, None);
        assert_eq!(pets[0].picture, None);
    }

    #[tokio::test]
    async fn create_validates_name_date_and_type() {
        let f = fixture().await;
        PetRepo::create(&f.registry, &f.pictures, "1", &new_pet("Rex", None, None))
            .await
            .unwrap();

        assert_matches!(
            PetRepo::create(&f.registry, &f.pictures, "1", &new_pet("rex", None, None)).await,
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            PetRepo::create(&f.registry, &f.pictures, "1", &new_pet("Max", Some("31-02-2020"), None))
                .await,
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            PetRepo::create(&f.registry, &f.pictures, "9", &new_pet("Max", None, None)).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn failed_picture_leaves_no_record() {
        let f = fixture().await;
        assert_matches!(
            PetRepo::create(&f.registry, &f.pictures, "1", &new_pet("Rex", None, Some("http://nope")))
                .await,
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            PetRepo::find_by_name(&f.registry, "1", "Rex").await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn birthdate_filters_exclude_unknown_dates() {
        let f = fixture().await;
        for (name, date) in [("Old", Some("01-01-2015")), ("Young", Some("01-06-2021")), ("Unknown", None)] {
            PetRepo::create(&f.registry, &f.pictures, "1", &new_pet(name, date, None))
                .await
                .unwrap();
        }

        let params = PetListParams {
            birthdate_gt: Some("01-01-2020".into()),
            birthdate_lt: None,
        };
        let pets = PetRepo::list_by_type(&f.registry, "1", &params).await.unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].name, "Young");

        let params = PetListParams {
            birthdate_gt: None,
            birthdate_lt: Some("01-01-2020".into()),
        };
        let pets = PetRepo::list_by_type(&f.registry, "1", &params).await.unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].name, "Old");
    }

    #[tokio::test]
    async fn lookups_are_case_insensitive() {
        let f = fixture().await;
        PetRepo::create(&f.registry, &f.pictures, "1", &new_pet("Rex", None, None))
            .await
            .unwrap();
        assert_eq!(
            PetRepo::find_by_name(&f.registry, "1", "REX").await.unwrap().name,
            "Rex"
        );
        PetRepo::delete(&f.registry, &f.pictures, "1", "rex").await.unwrap();
        assert_matches!(
            PetRepo::delete(&f.registry, &f.pictures, "1", "rex").await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn delete_removes_picture_file() {
        let f = fixture().await;
        let pet = PetRepo::create(
            &f.registry,
            &f.pictures,
            "1",
            &new_pet("Rex", None, Some("http://pics/a.png")),
        )
        .await
        .unwrap();
        assert_eq!(pet.picture.as_deref(), Some("1_Rex.png"));
        assert!(f.dir.path().join("1_Rex.png").exists());

        PetRepo::delete(&f.registry, &f.pictures, "1", "Rex").await.unwrap();
        assert!(!f.dir.path().join("1_Rex.png").exists());
    }

    #[tokio::test]
    async fn unchanged_url_skips_download() {
        let f = fixture().await;
        PetRepo::create(
            &f.registry,
            &f.pictures,
            "1",
            &new_pet("Rex", None, Some("http://pics/a.png")),
        )
        .await
        .unwrap();
        assert_eq!(f.fetcher.calls(), 1);

        let pet = PetRepo::update(
            &f.registry,
            &f.pictures,
            "1",
            "Rex",
            &update("Rex", Some("02-02-2020"), Some(" http://pics/a.png ")),
        )
        .await
        .unwrap();
        assert_eq!(f.fetcher.calls(), 1);
        assert_eq!(pet.picture.as_deref(), Some("1_Rex.png"));
        assert!(pet.birthdate.is_some());
    }

    #[tokio::test]
    async fn changed_url_replaces_picture() {
        let f = fixture().await;
        PetRepo::create(
            &f.registry,
            &f.pictures,
            "1",
            &new_pet("Rex", None, Some("http://pics/a.png")),
        )
        .await
        .unwrap();

        let pet = PetRepo::update(
            &f.registry,
            &f.pictures,
            "1",
            "Rex",
            &update("Rex", None, Some("http://pics/b.jpg")),
        )
        .await
        .unwrap();
        assert_eq!(f.fetcher.calls(), 2);
        assert_eq!(pet.picture.as_deref(), Some("1_Rex.jpg"));
        assert!(f.dir.path().join("1_Rex.jpg").exists());
        assert!(!f.dir.path().join("1_Rex.png").exists());
    }

    #[tokio::test]
    async fn omitted_url_clears_picture_and_keeps_birthdate() {
        let f = fixture().await;
        PetRepo::create(
            &f.registry,
            &f.pictures,
            "1",
            &new_pet("Rex", Some("03-03-2018"), Some("http://pics/a.png")),
        )
        .await
        .unwrap();

        let pet = PetRepo::update(&f.registry, &f.pictures, "1", "Rex", &update("Rex", None, None))
            .await
            .unwrap();
        assert_eq!(pet.picture, None);
        assert!(pet.birthdate.is_some());
        assert!(!f.dir.path().join("1_Rex.png").exists());
    }

    #[tokio::test]
    async fn rename_stays_in_place_and_forgets_old_url() {
        let f = fixture().await;
        for name in ["Rex", "Ace"] {
            PetRepo::create(&f.registry, &f.pictures, "1", &new_pet(name, None, None))
                .await
                .unwrap();
        }
        PetRepo::update(
            &f.registry,
            &f.pictures,
            "1",
            "Rex",
            &update("Buddy", None, Some("http://pics/a.png")),
        )
        .await
        .unwrap();

        let names: Vec<_> = PetRepo::list_by_type(&f.registry, "1", &PetListParams::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Buddy", "Ace"]);
        assert_eq!(f.fetcher.calls(), 1);

        // The remembered URL now belongs to the new name.
        PetRepo::update(
            &f.registry,
            &f.pictures,
            "1",
            "Buddy",
            &update("Buddy", None, Some("http://pics/a.png")),
        )
        .await
        .unwrap();
        assert_eq!(f.fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn update_rejects_collisions_and_bad_dates() {
        let f = fixture().await;
        for name in ["Rex", "Ace"] {
            PetRepo::create(&f.registry, &f.pictures, "1", &new_pet(name, None, None))
                .await
                .unwrap();
        }
        assert_matches!(
            PetRepo::update(&f.registry, &f.pictures, "1", "Rex", &update("ace", None, None)).await,
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            PetRepo::update(&f.registry, &f.pictures, "1", "Rex", &update("Rex", Some("99-99-2020"), None))
                .await,
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            PetRepo::update(&f.registry, &f.pictures, "1", "Nobody", &update("X", None, None)).await,
            Err(CoreError::NotFound { .. })
        );
        // Renaming to a different case of itself is allowed.
        let pet = PetRepo::update(&f.registry, &f.pictures, "1", "Rex", &update("REX", Some("NA"), None))
            .await
            .unwrap();
        assert_eq!(pet.name, "REX");
    }

    #[tokio::test]
    async fn shared_picture_file_survives_other_pets_removal() {
        let f = fixture().await;
        let url = Some("http://pics/a.png");
        PetRepo::create(&f.registry, &f.pictures, "1", &new_pet("Rex", None, url))
            .await
            .unwrap();
        let buddy = PetRepo::update(&f.registry, &f.pictures, "1", "Rex", &update("Buddy", None, url))
            .await
            .unwrap();
        assert_eq!(buddy.picture.as_deref(), Some("1_Rex.png"));

        // A new Rex is stored under the filename Buddy kept.
        PetRepo::create(&f.registry, &f.pictures, "1", &new_pet("Rex", None, url))
            .await
            .unwrap();
        PetRepo::update(&f.registry, &f.pictures, "1", "Rex", &update("Rex", None, None))
            .await
            .unwrap();
        assert!(f.dir.path().join("1_Rex.png").exists());

        PetRepo::delete(&f.registry, &f.pictures, "1", "Rex").await.unwrap();
        assert!(f.dir.path().join("1_Rex.png").exists());
        assert_eq!(
            PetRepo::find_by_name(&f.registry, "1", "Buddy").await.unwrap().picture.as_deref(),
            Some("1_Rex.png")
        );

        PetRepo::delete(&f.registry, &f.pictures, "1", "Buddy").await.unwrap();
        assert!(!f.dir.path().join("1_Rex.png").exists());
    }

    #[tokio::test]
    async fn writes_against_deleted_type_fail() {
        let f = fixture().await;
        f.registry.remove_type("1").await.unwrap();
        assert_matches!(
            PetRepo::create(&f.registry, &f.pictures, "1", &new_pet("Rex", None, None)).await,
            Err(CoreError::NotFound { .. })
        );
    }
}

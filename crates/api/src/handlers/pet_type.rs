//! Handlers for the `/pet-types` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use menagerie_core::error::CoreError;
use menagerie_core::pet_type::PetTypeFilter;
use menagerie_store::models::pet_type::{CreatePetType, PetType, PetTypeListParams};
use menagerie_store::repositories::PetTypeRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, ListQuery};
use crate::state::AppState;

/// POST /pet-types
///
/// Looks the species up in the taxonomy source before storing it.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreatePetType>,
) -> AppResult<(StatusCode, Json<PetType>)> {
    let pet_type = PetTypeRepo::create(&state.registry, state.lookup.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(pet_type)))
}

/// GET /pet-types?id=&type=&family=&genus=&lifespan=&hasAttribute=
pub async fn list(
    State(state): State<AppState>,
    ListQuery(params): ListQuery<PetTypeListParams>,
) -> AppResult<Json<Vec<PetType>>> {
    let filter = PetTypeFilter::from(params);
    Ok(Json(PetTypeRepo::list(&state.registry, &filter).await))
}

/// GET /pet-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PetType>> {
    let pet_type = PetTypeRepo::find_by_id(&state.registry, &id)
        .await
        .ok_or_else(|| AppError::Core(CoreError::not_found("PetType", id)))?;
    Ok(Json(pet_type))
}

/// DELETE /pet-types/{id}
///
/// Refused with 400 while the type still owns pets.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    PetTypeRepo::delete(&state.registry, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

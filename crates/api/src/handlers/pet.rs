//! Handlers for pets nested under a pet type.
//!
//! Pets are addressed by name (case-insensitive):
//! `/pet-types/{id}/pets[/{name}]`

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use menagerie_store::models::pet::{CreatePet, Pet, PetListParams, UpdatePet};
use menagerie_store::repositories::PetRepo;

use crate::error::AppResult;
use crate::extract::{JsonBody, ListQuery};
use crate::state::AppState;

/// POST /pet-types/{id}/pets
pub async fn create(
    State(state): State<AppState>,
    Path(type_id): Path<String>,
    JsonBody(input): JsonBody<CreatePet>,
) -> AppResult<(StatusCode, Json<Pet>)> {
    let pet = PetRepo::create(&state.registry, &state.pictures, &type_id, &input).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

/// GET /pet-types/{id}/pets?birthdateGT=&birthdateLT=
pub async fn list_by_type(
    State(state): State<AppState>,
    Path(type_id): Path<String>,
    ListQuery(params): ListQuery<PetListParams>,
) -> AppResult<Json<Vec<Pet>>> {
    let pets = PetRepo::list_by_type(&state.registry, &type_id, &params).await?;
    Ok(Json(pets))
}

/// GET /pet-types/{id}/pets/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path((type_id, name)): Path<(String, String)>,
) -> AppResult<Json<Pet>> {
    let pet = PetRepo::find_by_name(&state.registry, &type_id, &name).await?;
    Ok(Json(pet))
}

/// PUT /pet-types/{id}/pets/{name}
///
/// Full replace: an omitted `picture-url` clears the picture.
pub async fn update(
    State(state): State<AppState>,
    Path((type_id, name)): Path<(String, String)>,
    JsonBody(input): JsonBody<UpdatePet>,
) -> AppResult<Json<Pet>> {
    let pet = PetRepo::update(&state.registry, &state.pictures, &type_id, &name, &input).await?;
    Ok(Json(pet))
}

/// DELETE /pet-types/{id}/pets/{name}
pub async fn delete(
    State(state): State<AppState>,
    Path((type_id, name)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    PetRepo::delete(&state.registry, &state.pictures, &type_id, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Route definitions for pet types and their pets.

use axum::routing::get;
use axum::Router;

use crate::handlers::{pet, pet_type};
use crate::state::AppState;

/// Routes mounted at `/pet-types`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// DELETE /{id}                -> delete
///
/// GET    /{id}/pets           -> list_by_type
/// POST   /{id}/pets           -> create
/// GET    /{id}/pets/{name}    -> get_by_name
/// PUT    /{id}/pets/{name}    -> update
/// DELETE /{id}/pets/{name}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    let pet_routes = Router::new()
        .route("/", get(pet::list_by_type).post(pet::create))
        .route(
            "/{name}",
            get(pet::get_by_name).put(pet::update).delete(pet::delete),
        );

    Router::new()
        .route("/", get(pet_type::list).post(pet_type::create))
        .route("/{id}", get(pet_type::get_by_id).delete(pet_type::delete))
        .nest("/{id}/pets", pet_routes)
}

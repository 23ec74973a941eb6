pub mod health;
pub mod pet_type;
pub mod picture;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pet-types                               list, create
/// /pet-types/{id}                          get, delete
/// /pet-types/{id}/pets                     list (birthdateGT/LT), create
/// /pet-types/{id}/pets/{name}              get, update, delete
///
/// /pictures/{filename}                     fetch stored picture
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pet-types", pet_type::router())
        .nest("/pictures", picture::router())
}

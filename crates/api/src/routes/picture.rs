use axum::routing::get;
use axum::Router;

use crate::handlers::picture;
use crate::state::AppState;

/// Routes mounted at `/pictures`.
///
/// ```text
/// GET    /{filename}    -> get_picture
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{filename}", get(picture::get_picture))
}

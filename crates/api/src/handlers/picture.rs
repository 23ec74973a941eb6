//! Handler for stored pictures.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::http::StatusCode;
use axum::response::Response;
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /pictures/{filename}
///
/// Streams the file as `image/jpeg` or `image/png`. Unknown extensions and
/// missing files are 404.
pub async fn get_picture(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let picture = state.pictures.retrieve(&filename).await?;
    let stream = ReaderStream::new(picture.file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, picture.format.content_type())
        .header(header::CONTENT_LENGTH, picture.len.to_string())
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

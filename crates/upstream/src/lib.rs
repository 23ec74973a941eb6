//! HTTP clients for the external collaborators: the animal-taxonomy source
//! and picture URLs. Both implement seams defined in `menagerie_core`.

pub mod ninja;
pub mod picture_http;

pub use ninja::NinjaClient;
pub use picture_http::HttpPictureFetcher;

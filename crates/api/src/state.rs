use std::sync::Arc;

use menagerie_core::taxonomy::TaxonomyLookup;
use menagerie_store::{PictureStore, Registry};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Pet types and their pets.
    pub registry: Arc<Registry>,
    /// External species lookup used when creating pet types.
    pub lookup: Arc<dyn TaxonomyLookup>,
    /// Picture download, storage and retrieval.
    pub pictures: PictureStore,
}

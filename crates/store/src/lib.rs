//! Process-lifetime storage: the pet-type registry, nested pets, and the
//! on-disk picture store.

pub mod models;
pub mod pictures;
pub mod registry;
pub mod repositories;

pub use pictures::PictureStore;
pub use registry::Registry;

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&Registry` (and `&PictureStore` where files are involved) as the
//! first arguments.

pub mod pet_repo;
pub mod pet_type_repo;

pub use pet_repo::PetRepo;
pub use pet_type_repo::PetTypeRepo;

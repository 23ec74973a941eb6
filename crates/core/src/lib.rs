//! Domain rules for the menagerie server: error taxonomy, identifiers,
//! birthdates, taxonomy normalisation, picture naming and pet-type filters.
//!
//! Nothing here performs I/O; the outbound collaborators are expressed as
//! the [`taxonomy::TaxonomyLookup`] and [`picture::PictureFetcher`] traits.

pub mod birthdate;
pub mod error;
pub mod ids;
pub mod pet_type;
pub mod picture;
pub mod taxonomy;
pub mod types;

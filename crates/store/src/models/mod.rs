//! Record models and request DTOs.

pub mod pet;
pub mod pet_type;

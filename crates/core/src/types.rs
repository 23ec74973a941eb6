/// Pet-type identifiers are decimal strings issued by [`crate::ids::IdGenerator`].
pub type TypeId = String;

/// Calendar dates carried by pets (`DD-MM-YYYY` on the wire).
pub type Birthdate = chrono::NaiveDate;

/// Wire sentinel for an unknown birthdate or a missing picture.
pub const NOT_AVAILABLE: &str = "NA";

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or an open transaction) as the first argument.

pub mod person_repo;
pub mod phone_number_repo;

pub use person_repo::{DeletePersonOutcome, PersonRepo};
pub use phone_number_repo::PhoneNumberRepo;

//! Domain layer for the rolodex directory.
//!
//! Pure logic only: shared types, the domain error enum, and the person form
//! validator. Nothing here touches the database or HTTP.

pub mod error;
pub mod matching;
pub mod person;
pub mod types;

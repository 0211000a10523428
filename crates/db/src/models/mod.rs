//! Row models and DTOs, one module per aggregate.

pub mod person;

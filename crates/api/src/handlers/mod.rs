pub mod people;
pub mod person;

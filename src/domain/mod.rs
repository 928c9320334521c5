//! Domain entities shared by the API client, forms and list synchronization.

pub mod brand;
pub mod person;
pub mod tool;
pub mod types;

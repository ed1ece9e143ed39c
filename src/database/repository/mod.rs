//! Repository module - MongoDB-backed collaborators.

mod account_repository;
mod hospital_repository;

pub use account_repository::MongoAccountStore;
pub use hospital_repository::MongoHospitalDirectory;

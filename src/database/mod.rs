//! Database module exports.

mod models;
mod mongo;
mod repository;

pub use models::*;
pub use mongo::{Database, DatabaseError};
pub use repository::{MongoAccountStore, MongoHospitalDirectory};

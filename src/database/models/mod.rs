//! Database models.

pub mod account;
pub mod hospital;

pub use account::Account;
pub use hospital::Hospital;

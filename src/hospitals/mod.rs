//! Hospital lookup.
//!
//! The directory itself is an external collaborator behind
//! [`HospitalDirectory`]. `MongoHospitalDirectory` (in `database`) talks to
//! the hosted database; [`MemoryHospitalDirectory`] serves the bundled
//! sample records when the client runs offline.

mod card;
mod memory;

use async_trait::async_trait;

pub use crate::database::Hospital;
pub use card::render_card;
pub use memory::MemoryHospitalDirectory;

/// Result cap for a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Number of hospitals shown before any search.
pub const DEFAULT_INITIAL_LIMIT: usize = 6;

/// Errors from a directory query.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("search term is empty")]
    EmptyTerm,

    #[error(transparent)]
    Database(#[from] crate::database::DatabaseError),
}

/// Read-only hospital directory.
#[async_trait]
pub trait HospitalDirectory: Send + Sync {
    /// Hospitals whose name, district or pincode contains `term`
    /// (case-insensitive), at most `limit` of them.
    ///
    /// # Errors
    /// [`DirectoryError::EmptyTerm`] for a blank term, or a backend failure.
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Hospital>, DirectoryError>;

    /// The first `limit` hospitals, for the initial listing.
    ///
    /// # Errors
    /// Returns an error if the backend query fails.
    async fn list(&self, limit: usize) -> Result<Vec<Hospital>, DirectoryError>;
}

/// Normalize a user search term; `None` if it is blank.
pub fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  Cuttack "), Some("cuttack".to_string()));
        assert_eq!(normalize_term(" \t"), None);
    }
}

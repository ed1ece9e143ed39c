//! In-memory hospital directory.

use async_trait::async_trait;
use tracing::warn;

use super::{DirectoryError, Hospital, HospitalDirectory, normalize_term};

/// Directory over a fixed list of records, kept in name order like the
/// database directory returns them.
#[derive(Debug, Clone, Default)]
pub struct MemoryHospitalDirectory {
    hospitals: Vec<Hospital>,
}

impl MemoryHospitalDirectory {
    pub fn new(mut hospitals: Vec<Hospital>) -> Self {
        hospitals.sort_by(|a, b| a.name.cmp(&b.name));
        Self { hospitals }
    }

    /// Directory pre-loaded with the bundled sample records.
    pub fn with_samples() -> Self {
        match serde_json::from_str(include_str!("sample.json")) {
            Ok(hospitals) => Self::new(hospitals),
            Err(e) => {
                warn!("Failed to parse bundled hospital samples: {}", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }
}

#[async_trait]
impl HospitalDirectory for MemoryHospitalDirectory {
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Hospital>, DirectoryError> {
        let needle = normalize_term(term).ok_or(DirectoryError::EmptyTerm)?;
        Ok(self
            .hospitals
            .iter()
            .filter(|h| h.matches(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list(&self, limit: usize) -> Result<Vec<Hospital>, DirectoryError> {
        Ok(self.hospitals.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_parse() {
        assert!(MemoryHospitalDirectory::with_samples().len() >= 6);
    }

    #[tokio::test]
    async fn test_search_by_district_pincode_and_name() {
        let directory = MemoryHospitalDirectory::with_samples();

        let by_district = directory.search("CUTTACK", 20).await.unwrap();
        assert!(!by_district.is_empty());
        assert!(by_district.iter().all(|h| h.district.eq_ignore_ascii_case("cuttack")
            || h.name.to_lowercase().contains("cuttack")));

        let by_pincode = directory.search("7510", 20).await.unwrap();
        assert!(by_pincode.iter().all(|h| h.pincode.contains("7510")
            || h.name.contains("7510")
            || h.district.contains("7510")));
        assert!(!by_pincode.is_empty());

        let by_name = directory.search("aiims", 20).await.unwrap();
        assert_eq!(by_name.len(), 1);
    }

    #[tokio::test]
    async fn test_search_respects_limit_and_blank_terms() {
        let directory = MemoryHospitalDirectory::with_samples();
        assert_eq!(directory.search("o", 2).await.unwrap().len(), 2);
        assert!(matches!(directory.search("   ", 20).await, Err(DirectoryError::EmptyTerm)));
        assert!(directory.search("no such place", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_results_are_ordered_by_name() {
        let directory = MemoryHospitalDirectory::with_samples();

        let all = directory.list(directory.len()).await.unwrap();
        assert_eq!(all[0].name, "AIIMS Bhubaneswar");
        assert!(all.windows(2).all(|pair| pair[0].name <= pair[1].name));

        let found = directory.search("college", 20).await.unwrap();
        let names: Vec<&str> = found.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "MKCG Medical College and Hospital",
                "NRS Medical College and Hospital",
                "SCB Medical College and Hospital",
            ]
        );
    }

    #[tokio::test]
    async fn test_list_caps_results() {
        let directory = MemoryHospitalDirectory::with_samples();
        assert_eq!(directory.list(3).await.unwrap().len(), 3);
    }
}

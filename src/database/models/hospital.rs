//! Hospital directory record.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A healthcare facility (stored in `hospitals` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    /// MongoDB document ID
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,
    pub address: String,
    pub district: String,
    pub state: String,
    pub pincode: String,

    #[serde(default)]
    pub phone: Option<String>,

    /// Facility type, e.g. "Government" or "Private".
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub services: Option<Vec<String>>,

    #[serde(default)]
    pub emergency_available: Option<bool>,
}

impl Hospital {
    /// Case-insensitive partial match on name, district or pincode.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.name, &self.district, &self.pincode]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    pub fn has_emergency(&self) -> bool {
        self.emergency_available.unwrap_or(false)
    }

    /// Services as a slice; empty when none are listed.
    pub fn services(&self) -> &[String] {
        self.services.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hospital {
        Hospital {
            id: None,
            name: "Capital Hospital".to_string(),
            address: "Unit 6".to_string(),
            district: "Khordha".to_string(),
            state: "Odisha".to_string(),
            pincode: "751001".to_string(),
            phone: None,
            kind: "Government".to_string(),
            services: None,
            emergency_available: None,
        }
    }

    #[test]
    fn test_matches_fields_case_insensitively() {
        let hospital = sample();
        assert!(hospital.matches("capital"));
        assert!(hospital.matches("khor"));
        assert!(hospital.matches("7510"));
        assert!(!hospital.matches("odisha")); // state is not searched
        assert!(!hospital.matches("cuttack"));
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "name": "SCB", "address": "Mangalabag", "district": "Cuttack",
            "state": "Odisha", "pincode": "753007", "type": "Government"
        }"#;
        let hospital: Hospital = serde_json::from_str(json).unwrap();
        assert!(!hospital.has_emergency());
        assert!(hospital.services().is_empty());
        assert_eq!(hospital.phone, None);
    }
}

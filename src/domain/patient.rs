//! Patient information shown at the top of a report

use serde::{Deserialize, Serialize};

/// Patient details printed on a report
///
/// Deserialized from snake_case keys (configuration and request bodies) and
/// serialized with the display labels used in the report output, in display
/// order. Missing keys take the placeholder values of [`PatientInfo::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientInfo {
    #[serde(rename(serialize = "Name", deserialize = "name"))]
    pub name: String,

    #[serde(rename(serialize = "Date of Birth", deserialize = "date_of_birth"))]
    pub date_of_birth: String,

    #[serde(rename(serialize = "Sex", deserialize = "sex"))]
    pub sex: String,

    #[serde(rename(serialize = "Test Ordered By", deserialize = "test_ordered_by"))]
    pub test_ordered_by: String,
}

impl PatientInfo {
    /// Label/value pairs in display order
    pub fn labeled_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Name", &self.name),
            ("Date of Birth", &self.date_of_birth),
            ("Sex", &self.sex),
            ("Test Ordered By", &self.test_ordered_by),
        ]
    }
}

impl Default for PatientInfo {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            date_of_birth: "12/01/1987".to_string(),
            sex: "Male".to_string(),
            test_ordered_by: "Dr. Fulan, Amazing Hospital Centre".to_string(),
        }
    }
}

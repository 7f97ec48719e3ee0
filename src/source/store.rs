//! Student store client
//!
//! HTTP client for the user document store. Documents are duck-typed:
//! the numeric learning counters are optional and collapse to 0 here, at
//! the ingestion boundary, never deeper in the pipeline.

use std::time::Duration;

use serde::Deserialize;

use super::SourceError;
use crate::logic::RawStudent;

pub struct StoreClient {
    base_url: String,
    http_client: reqwest::Client,
}

/// A user document as the store serves it. Only `id` is guaranteed.
#[derive(Debug, Deserialize)]
pub struct UserDocument {
    pub id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "totalAccuracy")]
    pub total_accuracy: Option<f64>,
    /// Accepted as a float because duck-typed stores serve integers both
    /// ways; truncated at conversion.
    pub streak: Option<f64>,
    pub xp: Option<f64>,
}

impl UserDocument {
    fn is_student(&self) -> bool {
        self.role.as_deref() == Some("student")
    }

    /// Collapse absent/null/malformed numeric fields to 0.
    fn into_raw(self) -> RawStudent {
        RawStudent {
            id: self.id,
            name: self.name.unwrap_or_else(|| "Unknown".to_string()),
            total_accuracy: numeric_or_zero(self.total_accuracy),
            streak: numeric_or_zero(self.streak) as u32,
            xp: numeric_or_zero(self.xp),
        }
    }
}

fn numeric_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

impl StoreClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Query user records with role = student.
    ///
    /// The role filter is also applied client-side so a store that
    /// ignores the query parameter still yields only students.
    pub async fn fetch_students(&self) -> Result<Vec<RawStudent>, SourceError> {
        let url = format!("{}/users", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("role", "student")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout
                } else {
                    SourceError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let documents: Vec<UserDocument> = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        Ok(documents
            .into_iter()
            .filter(UserDocument::is_student)
            .map(UserDocument::into_raw)
            .collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_document_maps_through() {
        let doc: UserDocument = serde_json::from_str(
            r#"{"id":"u1","name":"Ada","role":"student","totalAccuracy":87.5,"streak":12,"xp":1500}"#,
        )
        .unwrap();

        assert!(doc.is_student());
        let raw = doc.into_raw();
        assert_eq!(raw.id, "u1");
        assert_eq!(raw.name, "Ada");
        assert_eq!(raw.total_accuracy, 87.5);
        assert_eq!(raw.streak, 12);
        assert_eq!(raw.xp, 1500.0);
    }

    #[test]
    fn test_absent_fields_default_to_zero() {
        let doc: UserDocument = serde_json::from_str(r#"{"id":"u2","role":"student"}"#).unwrap();
        let raw = doc.into_raw();

        assert_eq!(raw.name, "Unknown");
        assert_eq!(raw.total_accuracy, 0.0);
        assert_eq!(raw.streak, 0);
        assert_eq!(raw.xp, 0.0);
    }

    #[test]
    fn test_null_fields_default_to_zero() {
        let doc: UserDocument = serde_json::from_str(
            r#"{"id":"u3","name":null,"role":"student","totalAccuracy":null,"streak":null,"xp":null}"#,
        )
        .unwrap();
        let raw = doc.into_raw();

        assert_eq!(raw.total_accuracy, 0.0);
        assert_eq!(raw.streak, 0);
        assert_eq!(raw.xp, 0.0);
    }

    #[test]
    fn test_negative_counter_sanitized() {
        let doc: UserDocument =
            serde_json::from_str(r#"{"id":"u4","role":"student","streak":-3,"xp":-10.0}"#).unwrap();
        let raw = doc.into_raw();

        assert_eq!(raw.streak, 0);
        assert_eq!(raw.xp, 0.0);
    }

    #[test]
    fn test_non_students_filtered() {
        let docs: Vec<UserDocument> = serde_json::from_str(
            r#"[{"id":"t1","role":"teacher"},{"id":"s1","role":"student"},{"id":"x1"}]"#,
        )
        .unwrap();

        let students: Vec<RawStudent> = docs
            .into_iter()
            .filter(UserDocument::is_student)
            .map(UserDocument::into_raw)
            .collect();

        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, "s1");
    }
}

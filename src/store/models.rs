//! Job board data models.
//!
//! Serialized camelCase to match the public wire format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub who_we_are_looking_for: String,
    pub how_to_apply: String,
    pub location: String,
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: String,
    pub status: String,
    pub created_at: String,
}

/// Public listing view of a job (omits application instructions)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: String,
    pub created_at: String,
}

/// Admin listing view of a job with its application count
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminJobRow {
    #[serde(flatten)]
    pub job: Job,
    pub application_count: i64,
}

/// A submitted application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linked_in: String,
    pub resume: String,
    pub cover_letter: Option<String>,
    pub status: String,
    pub applied_at: String,
}

/// Admin listing view of an application with its job context
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRow {
    #[serde(flatten)]
    pub application: Application,
    pub job_title: String,
    pub job_location: String,
}

/// A reviewer comment attached to an application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationComment {
    pub id: Uuid,
    pub application_id: Uuid,
    pub admin_email: String,
    pub comment: String,
    pub fitment_tag: Option<String>,
    pub created_at: String,
}

/// Job creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub who_we_are_looking_for: String,
    pub how_to_apply: String,
    pub location: String,
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub status: Option<String>,
}

/// Job update request; absent fields keep their current value
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJob {
    pub title: Option<String>,
    pub description: Option<String>,
    pub who_we_are_looking_for: Option<String>,
    pub how_to_apply: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub status: Option<String>,
}

/// Application submission request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub job_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linked_in: String,
    pub resume: String,
    pub cover_letter: Option<String>,
}

impl NewApplication {
    /// All required fields present and non-empty
    pub fn is_complete(&self) -> bool {
        ![
            &self.full_name,
            &self.email,
            &self.phone,
            &self.linked_in,
            &self.resume,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
    }
}

/// Application status update request
#[derive(Debug, Deserialize)]
pub struct UpdateApplicationStatus {
    pub status: String,
}

/// Comment creation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub comment: String,
    pub fitment_tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_serializes_camel_case() {
        let job = Job {
            id: Uuid::new_v4(),
            title: "Research Engineer".to_string(),
            description: "desc".to_string(),
            who_we_are_looking_for: "you".to_string(),
            how_to_apply: "apply".to_string(),
            location: "Remote".to_string(),
            salary: None,
            job_type: "full-time".to_string(),
            status: "active".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&job).unwrap();
        assert!(json.get("whoWeAreLookingFor").is_some());
        assert!(json.get("howToApply").is_some());
        assert_eq!(json["type"], "full-time");
        assert!(json.get("job_type").is_none());
    }

    #[test]
    fn test_new_application_completeness() {
        let mut app = NewApplication {
            job_id: Uuid::new_v4(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            linked_in: "https://linkedin.com/in/ada".to_string(),
            resume: "https://example.com/resume.pdf".to_string(),
            cover_letter: None,
        };
        assert!(app.is_complete());

        app.phone = "   ".to_string();
        assert!(!app.is_complete());
    }
}

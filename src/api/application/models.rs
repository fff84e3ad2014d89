use serde::Deserialize;
use serde_json::Value;

use crate::db::models::{Document, JobId};

/// Job fields copied onto an application when it is listed for its applicant
pub const ENRICHED_FIELDS: [&str; 3] = ["title", "company", "company_logo"];

/// Query parameters accepted by `GET /job-application`
#[derive(Deserialize, Debug)]
pub struct ApplicantQuery {
    pub email: Option<String>,
}

/// Body accepted by `PATCH /job-applications/{id}`
#[derive(Deserialize, Debug)]
pub struct StatusUpdate {
    /// Stored verbatim; a missing status is stored as null
    #[serde(default)]
    pub status: Value,
}

/// The job an application points at, if its `job_id` is a well-formed id
pub fn referenced_job(application: &Document) -> Option<JobId> {
    application.get("job_id")?.as_str()?.parse().ok()
}

/// Copy the display fields the job has onto the application
pub fn enrich(application: &mut Document, job: &Document) {
    for field in ENRICHED_FIELDS {
        if let Some(value) = job.get(field) {
            application.insert(field.to_string(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn document(value: Value) -> Document {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn enrich_copies_only_display_fields() {
        let mut application = document(json!({"applicant_email": "a@example.com", "job_id": "x"}));
        let job = document(json!({
            "title": "Backend Engineer",
            "company": "Acme",
            "company_logo": "https://acme.test/logo.png",
            "hr_email": "hr@acme.test"
        }));

        enrich(&mut application, &job);

        assert_eq!(application["title"], json!("Backend Engineer"));
        assert_eq!(application["company"], json!("Acme"));
        assert_eq!(application["company_logo"], json!("https://acme.test/logo.png"));
        assert!(!application.contains_key("hr_email"));
    }

    #[test]
    fn enrich_skips_fields_the_job_lacks() {
        let mut application = document(json!({"job_id": "x"}));
        enrich(&mut application, &document(json!({"title": "Designer"})));

        assert_eq!(application["title"], json!("Designer"));
        assert!(!application.contains_key("company"));
        assert!(!application.contains_key("company_logo"));
    }

    #[test]
    fn referenced_job_requires_well_formed_text_id() {
        let id = Uuid::new_v4();
        assert_eq!(
            referenced_job(&document(json!({"job_id": id.to_string()}))),
            Some(JobId(id))
        );
        assert_eq!(referenced_job(&document(json!({"job_id": "garbage"}))), None);
        assert_eq!(referenced_job(&document(json!({"job_id": 42}))), None);
        assert_eq!(referenced_job(&document(json!({}))), None);
    }

    #[test]
    fn missing_status_deserializes_as_null() {
        let update: StatusUpdate = serde_json::from_value(json!({})).unwrap();
        assert_eq!(update.status, Value::Null);

        let update: StatusUpdate = serde_json::from_value(json!({"status": "accepted"})).unwrap();
        assert_eq!(update.status, json!("accepted"));
    }
}

use std::collections::HashMap;

use serde_json::Value;
use sqlx::{Pool, Postgres};
use tracing::{info, warn};
use uuid::Uuid;

use super::models::{enrich, referenced_job};
use crate::api::error::ServiceError;
use crate::api::job::JobService;
use crate::db::application_repository::ApplicationRepository;
use crate::db::job_repository::JobRepository;
use crate::db::models::{into_stored_body, ApplicationId, Document, InsertAck, JobId, UpdateAck};

/// Job application service containing business logic
pub struct ApplicationService {
    pool: Pool<Postgres>,
    jobs: JobService,
}

impl ApplicationService {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            jobs: JobService::new(pool.clone()),
            pool,
        }
    }

    /// Applications submitted by `applicant_email`, each carrying the title,
    /// company and logo of the job it references.
    ///
    /// Applications whose job cannot be found are returned unenriched.
    pub async fn list_for_applicant(&self, applicant_email: &str) -> Result<Vec<Document>, ServiceError> {
        let rows = ApplicationRepository::find_by_applicant(&self.pool, applicant_email).await?;
        let mut applications: Vec<Document> = rows.into_iter().map(|row| row.into_document()).collect();

        let mut job_ids: Vec<Uuid> = applications
            .iter()
            .filter_map(referenced_job)
            .map(|id| id.0)
            .collect();
        job_ids.sort_unstable();
        job_ids.dedup();

        let jobs: HashMap<Uuid, Document> = match JobRepository::find_by_ids(&self.pool, &job_ids).await {
            Ok(rows) => rows.into_iter().map(|row| (row.id, row.doc.0)).collect(),
            Err(e) => {
                warn!("Service: Job lookup for enrichment failed, returning plain applications: {}", e);
                HashMap::new()
            }
        };

        for application in &mut applications {
            if let Some(job) = referenced_job(application).and_then(|id| jobs.get(&id.0)) {
                enrich(application, job);
            }
        }

        Ok(applications)
    }

    pub async fn list_for_job(&self, job_id: &str) -> Result<Vec<Document>, ServiceError> {
        let rows = ApplicationRepository::find_by_job(&self.pool, job_id).await?;
        Ok(rows.into_iter().map(|row| row.into_document()).collect())
    }

    /// Store the application verbatim, then count it against its job
    ///
    /// # Returns
    /// - `Ok(InsertAck)` - acknowledgment of the application insert
    /// - `Err(ServiceError::Validation)` - `job_id` missing or not text, nothing stored
    /// - `Err(ServiceError::InvalidId)` - stored, but `job_id` is not a well-formed id
    /// - `Err(ServiceError::JobNotFound)` - stored, but the job does not exist
    pub async fn submit(&self, payload: Document) -> Result<InsertAck, ServiceError> {
        let raw_job_id = match payload.get("job_id") {
            Some(Value::String(raw)) => raw.clone(),
            _ => return Err(ServiceError::Validation("job_id is required".to_string())),
        };

        let id = ApplicationRepository::insert(&self.pool, &into_stored_body(payload)).await?;
        info!("Service: Application {} submitted for job {}", id, raw_job_id);

        let job_id: JobId = raw_job_id.parse()?;
        self.jobs.increment_application_count(job_id).await?;

        Ok(InsertAck::new(id))
    }

    pub async fn update_status(&self, id: &str, status: Value) -> Result<UpdateAck, ServiceError> {
        let id: ApplicationId = id.parse()?;
        let counts = ApplicationRepository::update_status(&self.pool, id, &status).await?;

        info!(
            "Service: Status update for application {}: matched={}, modified={}",
            id, counts.matched, counts.modified
        );
        Ok(UpdateAck::new(counts.matched as u64, counts.modified as u64))
    }
}

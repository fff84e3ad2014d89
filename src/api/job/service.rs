use sqlx::{Pool, Postgres};
use tracing::info;

use crate::api::error::ServiceError;
use crate::db::filters::JobFilter;
use crate::db::job_repository::JobRepository;
use crate::db::models::{into_stored_body, Document, InsertAck, JobId};

/// Job service containing business logic
pub struct JobService {
    pool: Pool<Postgres>,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List jobs matching the filter, unprojected and unpaginated
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Document>, ServiceError> {
        let rows = JobRepository::find(&self.pool, filter).await?;
        Ok(rows.into_iter().map(|row| row.into_document()).collect())
    }

    /// Look up a job by id
    ///
    /// # Returns
    /// - `Ok(None)` - no job has this id; callers respond with an empty body
    /// - `Err(ServiceError::InvalidId)` - `id` is not a well-formed identifier (500)
    pub async fn get_job(&self, id: &str) -> Result<Option<Document>, ServiceError> {
        let id: JobId = id.parse()?;
        let row = JobRepository::find_by_id(&self.pool, id).await?;
        Ok(row.map(|row| row.into_document()))
    }

    /// Store the payload verbatim as a new job
    pub async fn create_job(&self, payload: Document) -> Result<InsertAck, ServiceError> {
        let id = JobRepository::insert(&self.pool, &into_stored_body(payload)).await?;
        info!("Service: Job created successfully with id={}", id);
        Ok(InsertAck::new(id))
    }

    /// Record one more application against `id`.
    ///
    /// A missing job is an error: the application referencing it was already
    /// stored by the caller.
    pub async fn increment_application_count(&self, id: JobId) -> Result<(), ServiceError> {
        match JobRepository::increment_application_count(&self.pool, id).await? {
            Some(count) => {
                info!("Service: Job {} application count is now {}", id, count);
                Ok(())
            }
            None => Err(ServiceError::JobNotFound(id)),
        }
    }
}

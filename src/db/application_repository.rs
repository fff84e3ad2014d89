use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, Pool, Postgres};
use tracing::debug;
use uuid::Uuid;

use crate::db::models::{ApplicationId, Document, DocumentRow};

/// Row counts reported by a single-document update
#[derive(Debug, FromRow)]
pub struct UpdateCounts {
    pub matched: i64,
    pub modified: i64,
}

/// Repository for job application document operations
pub struct ApplicationRepository;

impl ApplicationRepository {
    pub async fn find_by_applicant(
        pool: &Pool<Postgres>,
        applicant_email: &str,
    ) -> Result<Vec<DocumentRow>, sqlx::Error> {
        sqlx::query_as::<_, DocumentRow>(
            "SELECT id, doc FROM job_applications WHERE doc ->> 'applicant_email' = $1 ORDER BY seq",
        )
        .bind(applicant_email)
        .fetch_all(pool)
        .await
    }

    /// Applications whose stored `job_id` text equals `job_id`
    pub async fn find_by_job(pool: &Pool<Postgres>, job_id: &str) -> Result<Vec<DocumentRow>, sqlx::Error> {
        sqlx::query_as::<_, DocumentRow>(
            "SELECT id, doc FROM job_applications WHERE doc ->> 'job_id' = $1 ORDER BY seq",
        )
        .bind(job_id)
        .fetch_all(pool)
        .await
    }

    pub async fn insert(pool: &Pool<Postgres>, doc: &Document) -> Result<Uuid, sqlx::Error> {
        let id = sqlx::query_scalar::<_, Uuid>("INSERT INTO job_applications (doc) VALUES ($1) RETURNING id")
            .bind(Json(doc))
            .fetch_one(pool)
            .await?;

        debug!("Application created with id={}", id);
        Ok(id)
    }

    /// Replace the `status` field only. An identical value counts as matched
    /// but not modified.
    pub async fn update_status(
        pool: &Pool<Postgres>,
        id: ApplicationId,
        status: &Value,
    ) -> Result<UpdateCounts, sqlx::Error> {
        debug!("Updating status of application {} to {}", id, status);

        sqlx::query_as::<_, UpdateCounts>(
            r#"
            WITH target AS (
                SELECT id, (doc -> 'status') IS DISTINCT FROM $2 AS changed
                FROM job_applications
                WHERE id = $1
                FOR UPDATE
            ),
            updated AS (
                UPDATE job_applications a
                SET doc = jsonb_set(a.doc, '{status}', $2)
                FROM target
                WHERE a.id = target.id AND target.changed
                RETURNING a.id
            )
            SELECT
                (SELECT COUNT(*) FROM target) AS matched,
                (SELECT COUNT(*) FROM updated) AS modified
            "#,
        )
        .bind(id.0)
        .bind(Json(status))
        .fetch_one(pool)
        .await
    }
}

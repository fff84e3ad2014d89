use serde_json::Value;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use tracing::debug;
use uuid::Uuid;

use crate::db::filters::JobFilter;
use crate::db::models::{Document, DocumentRow, JobId};

/// Repository for job document operations
pub struct JobRepository;

impl JobRepository {
    /// List jobs matching the filter
    pub async fn find(pool: &Pool<Postgres>, filter: &JobFilter) -> Result<Vec<DocumentRow>, sqlx::Error> {
        debug!("Listing jobs with filter={:?}", filter);

        let mut query = filter.to_query();
        let rows = query.build_query_as::<DocumentRow>().fetch_all(pool).await?;

        debug!("Found {} jobs", rows.len());
        Ok(rows)
    }

    pub async fn find_by_id(pool: &Pool<Postgres>, id: JobId) -> Result<Option<DocumentRow>, sqlx::Error> {
        sqlx::query_as::<_, DocumentRow>("SELECT id, doc FROM jobs WHERE id = $1")
            .bind(id.0)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every job whose id is in `ids`, in no particular order
    pub async fn find_by_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<DocumentRow>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, DocumentRow>("SELECT id, doc FROM jobs WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Insert a job document and return its generated id
    pub async fn insert(pool: &Pool<Postgres>, doc: &Document) -> Result<Uuid, sqlx::Error> {
        let id = sqlx::query_scalar::<_, Uuid>("INSERT INTO jobs (doc) VALUES ($1) RETURNING id")
            .bind(Json(doc))
            .fetch_one(pool)
            .await?;

        debug!("Job created with id={}", id);
        Ok(id)
    }

    /// Add one to `applicationCount` in a single statement.
    ///
    /// A missing or non-numeric count starts from zero. Returns the new count,
    /// or `None` when no job has this id.
    pub async fn increment_application_count(
        pool: &Pool<Postgres>,
        id: JobId,
    ) -> Result<Option<Value>, sqlx::Error> {
        let count = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            UPDATE jobs
            SET doc = jsonb_set(
                doc,
                '{applicationCount}',
                to_jsonb(
                    CASE WHEN jsonb_typeof(doc -> 'applicationCount') = 'number'
                         THEN (doc ->> 'applicationCount')::numeric
                         ELSE 0
                    END + 1
                )
            )
            WHERE id = $1
            RETURNING doc -> 'applicationCount'
            "#,
        )
        .bind(id.0)
        .fetch_optional(pool)
        .await?;

        debug!("Incremented application count for job {}: {:?}", id, count);
        Ok(count.map(|Json(value)| value))
    }
}

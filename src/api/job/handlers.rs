use actix_web::{
    HttpResponse, get, post,
    web::{Data, Json, Path, Query, ServiceConfig, scope},
};
use tracing::debug;

use super::{JobListQuery, JobService};
use crate::api::error::ServiceError;
use crate::db::filters::JobFilter;
use crate::db::models::Document;

#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    query: Query<JobListQuery>,
) -> Result<HttpResponse, ServiceError> {
    debug!("GET /jobs query={:?}", query);
    let filter = JobFilter::from(query.into_inner());
    let jobs = service.list_jobs(&filter).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("/{id}")]
async fn get_job(
    service: Data<JobService>,
    id: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job(&id).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[post("")]
async fn create_job(
    service: Data<JobService>,
    job: Json<Document>,
) -> Result<HttpResponse, ServiceError> {
    let ack = service.create_job(job.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("/jobs")
            .service(list_jobs)
            .service(create_job)
            .service(get_job),
    );
}

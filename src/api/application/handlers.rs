use actix_web::{
    HttpResponse, get, patch, post,
    web::{Data, Json, Path, Query, ServiceConfig, scope},
};

use super::ApplicationService;
use super::models::{ApplicantQuery, StatusUpdate};
use crate::api::error::ServiceError;
use crate::auth::SessionUser;
use crate::db::models::Document;

/// Applications of the signed-in applicant
#[get("")]
async fn list_my_applications(
    session: SessionUser,
    service: Data<ApplicationService>,
    query: Query<ApplicantQuery>,
) -> Result<HttpResponse, ServiceError> {
    session.authorize_email(query.email.as_deref())?;

    let applications = service.list_for_applicant(session.email()).await?;
    Ok(HttpResponse::Ok().json(applications))
}

#[get("/jobs/{job_id}")]
async fn list_job_applications(
    service: Data<ApplicationService>,
    job_id: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let applications = service.list_for_job(&job_id).await?;
    Ok(HttpResponse::Ok().json(applications))
}

#[post("")]
async fn submit_application(
    service: Data<ApplicationService>,
    application: Json<Document>,
) -> Result<HttpResponse, ServiceError> {
    let ack = service.submit(application.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[patch("/job-applications/{id}")]
async fn update_status(
    service: Data<ApplicationService>,
    id: Path<String>,
    update: Json<StatusUpdate>,
) -> Result<HttpResponse, ServiceError> {
    let ack = service.update_status(&id, update.into_inner().status).await?;
    Ok(HttpResponse::Ok().json(ack))
}

pub fn application_config(config: &mut ServiceConfig) {
    config
        .service(
            scope("/job-application")
                .service(list_my_applications)
                .service(submit_application)
                .service(list_job_applications),
        )
        .service(update_status);
}

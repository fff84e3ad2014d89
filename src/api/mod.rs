pub mod application;
pub mod auth;
pub mod error;
pub mod health;
pub mod job;
pub mod validation;


use actix_web::web::ServiceConfig;

/// Register every route of the service
pub fn routes(config: &mut ServiceConfig) {
    config
        .configure(health::health_config)
        .configure(auth::handlers::auth_config)
        .configure(job::handlers::job_config)
        .configure(application::handlers::application_config);
}

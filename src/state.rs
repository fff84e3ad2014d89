use actix_web::web::{self, Data, ServiceConfig};
use sqlx::{Pool, Postgres};

use crate::api::{self, application::ApplicationService, job::JobService, validation};
use crate::auth::TokenIssuer;
use crate::config::CookiePolicy;

/// Everything handlers receive as app data. Built once and cloned into
/// each server worker.
#[derive(Clone)]
pub struct AppState {
    pool: Data<Pool<Postgres>>,
    issuer: Data<TokenIssuer>,
    cookie_policy: Data<CookiePolicy>,
    jobs: Data<JobService>,
    applications: Data<ApplicationService>,
    max_payload_size: usize,
}

impl AppState {
    pub fn new(
        pool: Pool<Postgres>,
        issuer: TokenIssuer,
        cookie_policy: CookiePolicy,
        max_payload_size: usize,
    ) -> Self {
        Self {
            jobs: Data::new(JobService::new(pool.clone())),
            applications: Data::new(ApplicationService::new(pool.clone())),
            pool: Data::new(pool),
            issuer: Data::new(issuer),
            cookie_policy: Data::new(cookie_policy),
            max_payload_size,
        }
    }

    /// Register app data, body limits and routes
    pub fn configure(&self, config: &mut ServiceConfig) {
        config
            .app_data(self.pool.clone())
            .app_data(self.issuer.clone())
            .app_data(self.cookie_policy.clone())
            .app_data(self.jobs.clone())
            .app_data(self.applications.clone())
            .app_data(web::PayloadConfig::default().limit(self.max_payload_size))
            .app_data(validation::json_config(self.max_payload_size))
            .app_data(validation::document_json_config(self.max_payload_size))
            .configure(api::routes);
    }
}

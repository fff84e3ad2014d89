pub mod handlers;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use models::JobListQuery;
pub use service::JobService;

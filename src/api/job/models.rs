use serde::Deserialize;

use crate::db::filters::{JobFilter, SalaryBounds};

/// Query parameters accepted by `GET /jobs`
#[derive(Deserialize, Debug, Default)]
pub struct JobListQuery {
    /// Recruiter email
    pub email: Option<String>,
    pub sort: Option<String>,
    pub search: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<JobListQuery> for JobFilter {
    fn from(query: JobListQuery) -> Self {
        let salary = match (non_empty(query.min), non_empty(query.max)) {
            (Some(min), Some(max)) => Some(SalaryBounds::parse(&min, &max)),
            _ => None,
        };

        JobFilter {
            hr_email: non_empty(query.email),
            location: non_empty(query.search),
            salary,
            sort_by_salary: query.sort.as_deref() == Some("true"),
        }
    }
}

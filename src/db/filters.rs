use sqlx::{Postgres, QueryBuilder};

/// Inclusive salary bounds requested by a client.
///
/// A bound is `None` when the raw query value had no leading integer; such a
/// bound can never be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryBounds {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl SalaryBounds {
    pub fn parse(min: &str, max: &str) -> Self {
        Self {
            min: parse_leading_int(min),
            max: parse_leading_int(max),
        }
    }
}

/// Predicate and ordering for listing jobs.
///
/// All present conditions are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Exact match on the recruiter email
    pub hr_email: Option<String>,
    /// Case-insensitive substring of the location
    pub location: Option<String>,
    pub salary: Option<SalaryBounds>,
    /// Order by minimum salary, highest first
    pub sort_by_salary: bool,
}

impl JobFilter {
    /// Build the SELECT statement for this filter against the `jobs` table
    pub fn to_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new("SELECT id, doc FROM jobs WHERE TRUE");

        if let Some(email) = &self.hr_email {
            query.push(" AND doc ->> 'hr_email' = ");
            query.push_bind(email.clone());
        }

        if let Some(location) = &self.location {
            query.push(" AND strpos(lower(doc ->> 'location'), lower(");
            query.push_bind(location.clone());
            query.push(")) > 0");
        }

        if let Some(bounds) = self.salary {
            push_salary_bound(&mut query, "min", ">=", bounds.min);
            push_salary_bound(&mut query, "max", "<=", bounds.max);
        }

        if self.sort_by_salary {
            query.push(" ORDER BY doc #> '{salaryRange,min}' DESC NULLS LAST, seq");
        } else {
            query.push(" ORDER BY seq");
        }

        query
    }
}

/// Only numeric stored values are compared; anything else never matches.
fn push_salary_bound(
    query: &mut QueryBuilder<'static, Postgres>,
    field: &str,
    operator: &str,
    bound: Option<i64>,
) {
    let Some(bound) = bound else {
        query.push(" AND FALSE");
        return;
    };

    query.push(format!(
        " AND CASE WHEN jsonb_typeof(doc #> '{{salaryRange,{field}}}') = 'number' \
         THEN (doc #>> '{{salaryRange,{field}}}')::numeric {operator} "
    ));
    query.push_bind(bound);
    query.push(" ELSE FALSE END");
}

/// Parse the leading integer of `raw`, ignoring surrounding text
/// (`" 50000usd"` parses as 50000).
///
/// A `0x`/`0X` prefix switches to hexadecimal. Values beyond the `i64` range
/// saturate to `i64::MAX` or `i64::MIN`.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].chars().try_fold(0i64, |acc, c| {
        acc.checked_mul(i64::from(radix))?
            .checked_add(i64::from(c.to_digit(radix)?))
    });
    Some(match (magnitude, negative) {
        (Some(value), true) => -value,
        (Some(value), false) => value,
        (None, true) => i64::MIN,
        (None, false) => i64::MAX,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_selects_everything_in_insertion_order() {
        let query = JobFilter::default().to_query();
        assert_eq!(query.sql(), "SELECT id, doc FROM jobs WHERE TRUE ORDER BY seq");
    }

    #[test]
    fn every_condition_is_combined() {
        let filter = JobFilter {
            hr_email: Some("hr@example.com".to_string()),
            location: Some("dhaka".to_string()),
            salary: Some(SalaryBounds::parse("1000", "5000")),
            sort_by_salary: false,
        };
        let query = filter.to_query();
        let sql = query.sql();

        assert!(sql.contains("doc ->> 'hr_email' = $1"));
        assert!(sql.contains("strpos(lower(doc ->> 'location'), lower($2)) > 0"));
        assert!(sql.contains("(doc #>> '{salaryRange,min}')::numeric >= $3"));
        assert!(sql.contains("(doc #>> '{salaryRange,max}')::numeric <= $4"));
        assert!(sql.ends_with("ORDER BY seq"));
    }

    #[test]
    fn sort_orders_by_minimum_salary_descending() {
        let filter = JobFilter {
            sort_by_salary: true,
            ..JobFilter::default()
        };
        let query = filter.to_query();
        assert!(query
            .sql()
            .ends_with("ORDER BY doc #> '{salaryRange,min}' DESC NULLS LAST, seq"));
    }

    #[test]
    fn unparseable_bound_matches_nothing() {
        let filter = JobFilter {
            salary: Some(SalaryBounds::parse("abc", "5000")),
            ..JobFilter::default()
        };
        let query = filter.to_query();
        let sql = query.sql();
        assert!(sql.contains(" AND FALSE"));
        assert!(sql.contains("(doc #>> '{salaryRange,max}')::numeric <= $1"));
    }

    #[test]
    fn leading_integer_parsing() {
        assert_eq!(parse_leading_int("50000"), Some(50000));
        assert_eq!(parse_leading_int("  42abc"), Some(42));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn hexadecimal_prefix_is_honoured() {
        assert_eq!(parse_leading_int("0x10"), Some(16));
        assert_eq!(parse_leading_int("0XfFk"), Some(255));
        assert_eq!(parse_leading_int("-0x1a"), Some(-26));
        assert_eq!(parse_leading_int("0xg"), None);
        assert_eq!(parse_leading_int("0x"), None);
    }

    #[test]
    fn out_of_range_values_saturate() {
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_leading_int("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-9223372036854775807"), Some(-i64::MAX));
        assert_eq!(
            SalaryBounds::parse("1e999", "123456789012345678901234567890"),
            SalaryBounds { min: Some(1), max: Some(i64::MAX) }
        );
    }
}

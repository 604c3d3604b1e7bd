//! Query-string filters for the public job listing, and the job status allow-list.

use serde::Deserialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSort {
    #[default]
    DateDesc,
    DateAsc,
}

impl JobSort {
    pub fn order_by(self) -> &'static str {
        match self {
            JobSort::DateDesc => "jobs.created_at DESC",
            JobSort::DateAsc => "jobs.created_at ASC",
        }
    }
}

/// `GET /api/jobs?job_type=internship&q=rust&sort=date_asc`
#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    pub job_type: Option<String>,
    pub q: Option<String>,
    #[serde(default)]
    pub sort: JobSort,
}

impl JobListQuery {
    /// Job type to filter on; blank and `all` mean no filter.
    pub fn job_type_filter(&self) -> Option<&str> {
        self.job_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("all"))
    }

    /// ILIKE pattern for the free-text search, if any.
    pub fn search_pattern(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(like_pattern)
    }
}

/// Wraps `term` in `%...%`, escaping LIKE wildcards.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

pub const JOB_STATUSES: [&str; 2] = ["active", "closed"];

pub fn validate_job_status(status: &str) -> Result<&str, AppError> {
    JOB_STATUSES
        .iter()
        .find(|s| **s == status)
        .copied()
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid job status '{status}': expected one of {}",
                JOB_STATUSES.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(job_type: Option<&str>, q: Option<&str>) -> JobListQuery {
        JobListQuery {
            job_type: job_type.map(str::to_string),
            q: q.map(str::to_string),
            sort: JobSort::default(),
        }
    }

    #[test]
    fn test_all_and_blank_job_type_mean_no_filter() {
        assert_eq!(query(Some("all"), None).job_type_filter(), None);
        assert_eq!(query(Some("ALL"), None).job_type_filter(), None);
        assert_eq!(query(Some("  "), None).job_type_filter(), None);
        assert_eq!(query(None, None).job_type_filter(), None);
    }

    #[test]
    fn test_job_type_filter_is_trimmed() {
        assert_eq!(
            query(Some(" internship "), None).job_type_filter(),
            Some("internship")
        );
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("full_time"), "%full\\_time%");
    }

    #[test]
    fn test_blank_search_is_ignored() {
        assert_eq!(query(None, Some("   ")).search_pattern(), None);
        assert_eq!(
            query(None, Some(" data ")).search_pattern().as_deref(),
            Some("%data%")
        );
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        assert_eq!(JobSort::default().order_by(), "jobs.created_at DESC");
        assert_eq!(JobSort::DateAsc.order_by(), "jobs.created_at ASC");
    }

    #[test]
    fn test_sort_deserializes_from_client_values() {
        let q: JobListQuery =
            serde_json::from_value(serde_json::json!({"sort": "date_asc"})).unwrap();
        assert_eq!(q.sort, JobSort::DateAsc);
        let q: JobListQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(q.sort, JobSort::DateDesc);
    }

    #[test]
    fn test_job_status_allow_list() {
        assert_eq!(validate_job_status("active").unwrap(), "active");
        assert_eq!(validate_job_status("closed").unwrap(), "closed");
        assert!(validate_job_status("archived").is_err());
        assert!(validate_job_status("").is_err());
    }
}

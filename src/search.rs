// src/search.rs
use crate::store::Job;

/// Query terms shorter than this are rejected, not silently ignored.
pub const MIN_TERM_LENGTH: usize = 2;

/// A query term that failed validation, with the offending parameter name.
#[derive(Debug)]
pub struct InvalidTerm {
    pub param: &'static str,
    pub message: String,
}

/// Optional search terms applied conjunctively against the merged result set.
#[derive(Debug, Default)]
pub struct JobFilters {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

impl JobFilters {
    pub fn validate(&self) -> Result<(), InvalidTerm> {
        check_term("title", self.title.as_deref())?;
        check_term("company", self.company.as_deref())?;
        check_term("location", self.location.as_deref())?;
        Ok(())
    }

    /// Keep jobs matching every provided term, each as a case-insensitive
    /// substring test against the corresponding field.
    pub fn apply(&self, jobs: Vec<Job>) -> Vec<Job> {
        jobs.into_iter()
            .filter(|job| {
                term_matches(self.title.as_deref(), &job.title)
                    && term_matches(self.company.as_deref(), &job.company)
                    && term_matches(self.location.as_deref(), &job.location)
            })
            .collect()
    }
}

fn check_term(param: &'static str, term: Option<&str>) -> Result<(), InvalidTerm> {
    match term {
        Some(value) if value.chars().count() < MIN_TERM_LENGTH => Err(InvalidTerm {
            param,
            message: format!(
                "{} must be at least {} characters long",
                param, MIN_TERM_LENGTH
            ),
        }),
        _ => Ok(()),
    }
}

fn term_matches(term: Option<&str>, field: &str) -> bool {
    match term {
        Some(term) => field.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

/// Local records precede external records in the merged result set.
pub fn merge(local: Vec<Job>, external: Vec<Job>) -> Vec<Job> {
    let mut merged = local;
    merged.extend(external);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_jobs() -> Vec<Job> {
        vec![
            Job::new("Backend Developer", "TechCorp", "Remote", "Rust backend role"),
            Job::new("Designer", "PixelCo", "Berlin", "Product design role"),
        ]
    }

    #[test]
    fn test_title_filter_is_case_insensitive_substring() {
        let filters = JobFilters {
            title: Some("dev".to_string()),
            ..Default::default()
        };

        let results = filters.apply(sample_jobs());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Backend Developer");
    }

    #[test]
    fn test_filters_combine_conjunctively() {
        let filters = JobFilters {
            title: Some("dev".to_string()),
            location: Some("berlin".to_string()),
            ..Default::default()
        };

        assert!(filters.apply(sample_jobs()).is_empty());
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let filters = JobFilters::default();
        assert_eq!(filters.apply(sample_jobs()).len(), 2);
    }

    #[test]
    fn test_short_term_is_rejected() {
        let filters = JobFilters {
            company: Some("t".to_string()),
            ..Default::default()
        };

        let err = filters.validate().expect_err("one-character term must fail");
        assert_eq!(err.param, "company");
    }

    #[test]
    fn test_two_character_term_is_accepted() {
        let filters = JobFilters {
            title: Some("go".to_string()),
            ..Default::default()
        };

        assert!(filters.validate().is_ok());
    }

    #[test]
    fn test_merge_keeps_local_records_first() {
        let local = vec![Job::new("Local Role", "TechCorp", "Remote", "local")];
        let external = vec![Job::new("External Role", "Unknown Company", "Chile", "external")];

        let merged = merge(local, external);
        assert_eq!(merged[0].title, "Local Role");
        assert_eq!(merged[1].title, "External Role");
    }
}

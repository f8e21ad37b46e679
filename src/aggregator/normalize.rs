// src/aggregator/normalize.rs
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::store::Job;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";
pub const NO_DESCRIPTION: &str = "No description provided";

/// Per-entry normalization result. A skipped entry never aborts its batch;
/// the caller decides what to do with the reason (log it, count it).
#[derive(Debug)]
pub enum EntryOutcome {
    Normalized(Job),
    Skipped { reason: String },
}

/// Shape A: a flat list of objects with any of the four fields missing.
#[derive(Deserialize)]
struct FlatEntry {
    #[serde(rename = "jobTitle")]
    job_title: Option<String>,
    #[serde(rename = "companyName")]
    company_name: Option<String>,
    #[serde(rename = "jobLocation")]
    job_location: Option<String>,
    #[serde(rename = "jobDescription")]
    job_description: Option<String>,
}

/// Decode an external payload into per-entry outcomes. Shape A (flat list)
/// is attempted first; a top-level object is treated as Shape B (country ->
/// list of `[title, salary, skillsMarkup]` tuples). Anything else is a
/// single skip for the whole payload.
pub fn normalize_payload(payload: &Value) -> Vec<EntryOutcome> {
    match payload {
        Value::Array(entries) => normalize_flat(entries),
        Value::Object(by_country) => by_country
            .iter()
            .flat_map(|(country, entries)| normalize_country(country, entries))
            .collect(),
        other => vec![EntryOutcome::Skipped {
            reason: format!(
                "payload is neither a job list nor a per-country map: {}",
                json_type_name(other)
            ),
        }],
    }
}

fn normalize_flat(entries: &[Value]) -> Vec<EntryOutcome> {
    entries
        .iter()
        .map(|entry| match FlatEntry::deserialize(entry) {
            Ok(flat) => EntryOutcome::Normalized(Job::new(
                flat.job_title.as_deref().unwrap_or(UNKNOWN_TITLE),
                flat.company_name.as_deref().unwrap_or(UNKNOWN_COMPANY),
                flat.job_location.as_deref().unwrap_or(UNKNOWN_LOCATION),
                flat.job_description.as_deref().unwrap_or(NO_DESCRIPTION),
            )),
            Err(e) => EntryOutcome::Skipped {
                reason: format!("flat entry is not a job object: {}", e),
            },
        })
        .collect()
}

fn normalize_country(country: &str, entries: &Value) -> Vec<EntryOutcome> {
    match entries.as_array() {
        Some(tuples) => tuples
            .iter()
            .map(|tuple| normalize_tuple(country, tuple))
            .collect(),
        None => vec![EntryOutcome::Skipped {
            reason: format!("entries for country '{}' are not a list", country),
        }],
    }
}

fn normalize_tuple(country: &str, entry: &Value) -> EntryOutcome {
    let Some(tuple) = entry.as_array() else {
        return EntryOutcome::Skipped {
            reason: format!("entry for country '{}' is not a tuple", country),
        };
    };

    if tuple.len() != 3 {
        return EntryOutcome::Skipped {
            reason: format!(
                "entry for country '{}' has {} elements, expected 3",
                country,
                tuple.len()
            ),
        };
    }

    let Some(title) = tuple[0].as_str() else {
        return EntryOutcome::Skipped {
            reason: format!("entry for country '{}' has a non-string title", country),
        };
    };

    let salary = &tuple[1];
    if !salary.is_number() {
        return EntryOutcome::Skipped {
            reason: format!("entry '{}' for country '{}' has a non-numeric salary", title, country),
        };
    }

    let Some(markup) = tuple[2].as_str() else {
        return EntryOutcome::Skipped {
            reason: format!("entry '{}' for country '{}' has non-string skills markup", title, country),
        };
    };

    let skills = parse_skills(markup);
    let description = if skills.is_empty() {
        format!("Salary: {}", salary)
    } else {
        format!("Salary: {}. Skills: {}", salary, skills.join(", "))
    };

    EntryOutcome::Normalized(Job::new(title, UNKNOWN_COMPANY, country, &description))
}

/// Extract skill names from a `<skills><skill>..</skill></skills>` fragment.
/// Unparseable markup yields an empty list with a warning; the entry itself
/// is still normalized.
pub fn parse_skills(markup: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(markup);
    if !fragment.errors.is_empty() {
        warn!(
            "Skills markup had {} parse error(s), continuing with whatever was recovered",
            fragment.errors.len()
        );
    }

    let Ok(selector) = Selector::parse("skill") else {
        return Vec::new();
    };

    fragment
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|skill| !skill.is_empty())
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalized_jobs(outcomes: Vec<EntryOutcome>) -> Vec<Job> {
        outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                EntryOutcome::Normalized(job) => Some(job),
                EntryOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_flat_shape_fills_missing_fields_with_placeholders() {
        let payload = json!([
            {"jobTitle": "Rust Engineer", "companyName": "TechCorp"},
            {"jobLocation": "Remote"}
        ]);

        let jobs = normalized_jobs(normalize_payload(&payload));
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Rust Engineer");
        assert_eq!(jobs[0].location, UNKNOWN_LOCATION);
        assert_eq!(jobs[0].description, NO_DESCRIPTION);
        assert_eq!(jobs[1].title, UNKNOWN_TITLE);
        assert_eq!(jobs[1].company, UNKNOWN_COMPANY);
        assert_eq!(jobs[1].location, "Remote");
    }

    #[test]
    fn test_country_shape_normalizes_salary_and_skills() {
        let payload = json!({
            "Chile": [["Engineer", 50000, "<skills><skill>Go</skill></skills>"]]
        });

        let jobs = normalized_jobs(normalize_payload(&payload));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Engineer");
        assert_eq!(jobs[0].company, UNKNOWN_COMPANY);
        assert_eq!(jobs[0].location, "Chile");
        assert!(jobs[0].description.contains("50000"));
        assert!(jobs[0].description.contains("Go"));
    }

    #[test]
    fn test_malformed_entry_does_not_abort_siblings() {
        let payload = json!({
            "Chile": [
                ["Too Short", 1000],
                ["Engineer", 50000, "<skills><skill>Go</skill></skills>"],
                ["Bad Salary", "lots", "<skills></skills>"],
                "not-a-tuple"
            ]
        });

        let outcomes = normalize_payload(&payload);
        assert_eq!(outcomes.len(), 4);

        let jobs = normalized_jobs(outcomes);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Engineer");
    }

    #[test]
    fn test_malformed_flat_entry_is_skipped_individually() {
        let payload = json!([
            42,
            {"jobTitle": "Kept"}
        ]);

        let outcomes = normalize_payload(&payload);
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], EntryOutcome::Skipped { .. }));

        let jobs = normalized_jobs(outcomes);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Kept");
    }

    #[test]
    fn test_unrecognized_payload_is_a_single_skip() {
        let outcomes = normalize_payload(&json!("just a string"));
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], EntryOutcome::Skipped { .. }));
    }

    #[test]
    fn test_parse_skills_extracts_names_in_order() {
        let skills = parse_skills("<skills><skill>Go</skill><skill>Rust</skill></skills>");
        assert_eq!(skills, vec!["Go".to_string(), "Rust".to_string()]);
    }

    #[test]
    fn test_parse_skills_tolerates_empty_and_broken_markup() {
        assert!(parse_skills("").is_empty());
        assert!(parse_skills("<skills></skills>").is_empty());
        assert!(parse_skills("plain text, no elements").is_empty());
    }

    #[test]
    fn test_entry_with_broken_markup_is_still_normalized() {
        let payload = json!({
            "Chile": [["Engineer", 50000, "<skills><skill"]]
        });

        let jobs = normalized_jobs(normalize_payload(&payload));
        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].description.contains("50000"));
    }
}

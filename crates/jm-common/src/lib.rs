pub mod api;
pub mod config;
pub mod corrections;
pub mod date;
pub mod logging;
pub mod matching;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Commonly used data models for matching functions.

/// One employer-posted opening as returned by the job board backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPosting {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub location: Option<String>,
    pub workplace_type: Option<String>,
    pub employment_type: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub industry: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    pub posted_at: Option<DateTime<Utc>>,
}

/// The viewing user's generated profile. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    pub skills: Option<Vec<String>>,
    pub experience: Option<Vec<serde_json::Value>>,
    pub work_style: Option<serde_json::Value>,
    pub career_goals: Option<String>,
}

/// Current search and filter selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    #[serde(deserialize_with = "null_as_default")]
    pub workplace: Vec<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub career_level: Option<String>,
    pub job_category: Option<String>,
    pub job_type: Option<String>,
    pub date_posted: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub search_query: String,
}

impl FilterCriteria {
    /// Number of facets with a usable value. The search query is not a facet.
    pub fn active_filter_count(&self) -> usize {
        matching::predicates::active_facets(self).len()
    }

    /// True when any facet or the search query is set.
    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0 || self.search_term().is_some()
    }

    /// Lower-cased, trimmed search query, `None` when blank.
    pub fn search_term(&self) -> Option<String> {
        non_blank_lower(Some(self.search_query.as_str()))
    }
}

/// The backend sends `null` for blank text and empty skill lists.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Trims and lower-cases an optional text value, dropping blanks.
pub(crate) fn non_blank_lower(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

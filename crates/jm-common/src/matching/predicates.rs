use chrono::{DateTime, Utc};
use strum::AsRefStr;

use crate::{
    corrections::workplace::{matches_workplace_token, normalize_workplace_token},
    date::{parse_date_posted, DatePostedWindow},
    non_blank_lower, FilterCriteria, JobPosting,
};

/// A filter facet with a usable, normalized value.
#[derive(Debug, Clone, PartialEq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ActiveFacet {
    Workplace(Vec<String>),
    Country(String),
    City(String),
    CareerLevel(String),
    JobCategory(String),
    JobType(String),
    DatePosted(DatePostedWindow),
}

/// Outcome of one facet against one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetMatch {
    Matched,
    Missed,
    /// The job lacks the field the facet inspects.
    NotApplicable,
}

impl FacetMatch {
    fn from_contains(haystack: Option<&str>, needle: &str) -> Self {
        match non_blank_lower(haystack) {
            Some(text) if text.contains(needle) => FacetMatch::Matched,
            Some(_) => FacetMatch::Missed,
            None => FacetMatch::NotApplicable,
        }
    }
}

/// Facets set in `criteria`, in a fixed order. Blank values are skipped.
pub fn active_facets(criteria: &FilterCriteria) -> Vec<ActiveFacet> {
    let mut facets = Vec::new();

    let workplace: Vec<String> = criteria
        .workplace
        .iter()
        .map(|token| normalize_workplace_token(token))
        .filter(|token| !token.is_empty())
        .collect();
    if !workplace.is_empty() {
        facets.push(ActiveFacet::Workplace(workplace));
    }

    if let Some(country) = non_blank_lower(criteria.country.as_deref()) {
        facets.push(ActiveFacet::Country(country));
    }
    if let Some(city) = non_blank_lower(criteria.city.as_deref()) {
        facets.push(ActiveFacet::City(city));
    }
    if let Some(level) = non_blank_lower(criteria.career_level.as_deref()) {
        facets.push(ActiveFacet::CareerLevel(level));
    }
    if let Some(category) = non_blank_lower(criteria.job_category.as_deref()) {
        facets.push(ActiveFacet::JobCategory(category));
    }
    if let Some(job_type) = non_blank_lower(criteria.job_type.as_deref()) {
        facets.push(ActiveFacet::JobType(job_type));
    }
    if let Some(window) = criteria.date_posted.as_deref().and_then(parse_date_posted) {
        facets.push(ActiveFacet::DatePosted(window));
    }

    facets
}

impl ActiveFacet {
    pub fn evaluate(&self, job: &JobPosting, now: DateTime<Utc>) -> FacetMatch {
        match self {
            ActiveFacet::Workplace(tokens) => {
                let workplace_type = job.workplace_type.as_deref().unwrap_or_default();
                if tokens
                    .iter()
                    .any(|token| matches_workplace_token(workplace_type, token))
                {
                    FacetMatch::Matched
                } else {
                    FacetMatch::Missed
                }
            }
            ActiveFacet::Country(country) => {
                FacetMatch::from_contains(job.location.as_deref(), country)
            }
            ActiveFacet::City(city) => FacetMatch::from_contains(job.location.as_deref(), city),
            ActiveFacet::CareerLevel(level) => {
                FacetMatch::from_contains(job.experience_level.as_deref(), level)
            }
            ActiveFacet::JobCategory(category) => {
                let target = non_blank_lower(job.industry.as_deref())
                    .unwrap_or_else(|| job.title.to_lowercase());
                if target.contains(category.as_str()) {
                    FacetMatch::Matched
                } else {
                    FacetMatch::Missed
                }
            }
            ActiveFacet::JobType(job_type) => {
                FacetMatch::from_contains(job.job_type.as_deref(), job_type)
            }
            ActiveFacet::DatePosted(window) => match job.posted_at {
                Some(posted_at) if window.contains(posted_at, now) => FacetMatch::Matched,
                Some(_) => FacetMatch::Missed,
                None => FacetMatch::NotApplicable,
            },
        }
    }
}

/// Criteria prepared once for evaluating a whole job list.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCriteria {
    pub search_term: Option<String>,
    pub facets: Vec<ActiveFacet>,
}

impl CompiledCriteria {
    pub fn new(criteria: &FilterCriteria) -> Self {
        Self {
            search_term: criteria.search_term(),
            facets: active_facets(criteria),
        }
    }

    /// Neither a facet nor a search query is set.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_none() && self.facets.is_empty()
    }

    /// Free-text gate: title, company, description, location or any skill.
    pub fn matches_search(&self, job: &JobPosting) -> bool {
        let Some(term) = self.search_term.as_deref() else {
            return true;
        };

        let contains = |text: &str| text.to_lowercase().contains(term);
        contains(job.title.as_str())
            || contains(job.company_name.as_str())
            || contains(job.description.as_str())
            || job.location.as_deref().is_some_and(contains)
            || job.skills.iter().any(|skill| contains(skill.as_str()))
    }

    /// Search gate AND every active facet. Facets whose job field is missing
    /// are vacuously satisfied.
    pub fn matches_primary(&self, job: &JobPosting, now: DateTime<Utc>) -> bool {
        self.matches_search(job)
            && self
                .facets
                .iter()
                .all(|facet| facet.evaluate(job, now) != FacetMatch::Missed)
    }

    /// Search gate AND at least one active facet positively matched.
    pub fn matches_any_facet(&self, job: &JobPosting, now: DateTime<Utc>) -> bool {
        self.matches_search(job)
            && self
                .facets
                .iter()
                .any(|facet| facet.evaluate(job, now) == FacetMatch::Matched)
    }
}

/// Strict AND-of-facets match of one job.
pub fn matches_primary(job: &JobPosting, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    CompiledCriteria::new(criteria).matches_primary(job, now)
}

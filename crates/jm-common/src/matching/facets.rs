use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::JobPosting;

/// Distinct values present in a job list, for populating filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetOptions {
    pub workplace_types: Vec<String>,
    pub industries: Vec<String>,
    pub experience_levels: Vec<String>,
    pub job_types: Vec<String>,
    pub employment_types: Vec<String>,
    /// Comma-separated location parts ("Berlin, Germany" → Berlin, Germany).
    pub locations: Vec<String>,
}

/// Case-insensitive dedup keeping the first spelling seen, sorted by the
/// lower-cased form.
#[derive(Default)]
struct DistinctValues(BTreeMap<String, String>);

impl DistinctValues {
    fn push(&mut self, value: Option<&str>) {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        self.0
            .entry(value.to_lowercase())
            .or_insert_with(|| value.to_string());
    }

    fn into_vec(self) -> Vec<String> {
        self.0.into_values().collect()
    }
}

pub fn collect_facet_options(jobs: &[JobPosting]) -> FacetOptions {
    let mut workplace_types = DistinctValues::default();
    let mut industries = DistinctValues::default();
    let mut experience_levels = DistinctValues::default();
    let mut job_types = DistinctValues::default();
    let mut employment_types = DistinctValues::default();
    let mut locations = DistinctValues::default();

    for job in jobs {
        workplace_types.push(job.workplace_type.as_deref());
        industries.push(job.industry.as_deref());
        experience_levels.push(job.experience_level.as_deref());
        job_types.push(job.job_type.as_deref());
        employment_types.push(job.employment_type.as_deref());
        if let Some(location) = job.location.as_deref() {
            for part in location.split(',') {
                locations.push(Some(part));
            }
        }
    }

    FacetOptions {
        workplace_types: workplace_types.into_vec(),
        industries: industries.into_vec(),
        experience_levels: experience_levels.into_vec(),
        job_types: job_types.into_vec(),
        employment_types: employment_types.into_vec(),
        locations: locations.into_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_distinct_sorted_values() {
        let jobs = vec![
            JobPosting {
                workplace_type: Some("Remote".into()),
                industry: Some("Fintech".into()),
                location: Some("Berlin, Germany".into()),
                ..JobPosting::default()
            },
            JobPosting {
                workplace_type: Some("remote ".into()),
                industry: Some("Biotech".into()),
                location: Some("Munich, Germany".into()),
                experience_level: Some("  ".into()),
                ..JobPosting::default()
            },
        ];

        let options = collect_facet_options(&jobs);
        assert_eq!(options.workplace_types, vec!["Remote"]);
        assert_eq!(options.industries, vec!["Biotech", "Fintech"]);
        assert_eq!(options.locations, vec!["Berlin", "Germany", "Munich"]);
        assert!(options.experience_levels.is_empty());
    }

    #[test]
    fn empty_job_list_has_no_options() {
        assert_eq!(collect_facet_options(&[]), FacetOptions::default());
    }
}

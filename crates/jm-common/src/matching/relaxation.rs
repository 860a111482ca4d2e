use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use tracing::debug;

use super::{
    predicates::CompiledCriteria, profile::NormalizedProfile, scoring::MatchScoreCalculator,
};
use crate::{CandidateProfile, FilterCriteria, JobPosting};

pub const DEFAULT_MIN_PRIMARY_RESULTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxationConfig {
    /// Strict matches needed before relaxation is skipped.
    pub min_primary_results: usize,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            min_primary_results: DEFAULT_MIN_PRIMARY_RESULTS,
        }
    }
}

/// Which branch produced the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Nothing selected: every job, score-sorted.
    Unfiltered,
    /// Enough strict matches, source order.
    Primary,
    /// Too few strict matches: any-facet matches, score-sorted.
    Relaxed,
    /// Only a search query is set and it matched fewer jobs than the threshold.
    SearchOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub jobs: Vec<JobPosting>,
    pub is_related: bool,
    pub mode: SelectionMode,
}

/// Primary filtering with an any-facet fallback when it returns too little.
#[derive(Debug, Clone, Default)]
pub struct RelaxationStrategy {
    config: RelaxationConfig,
    scorer: MatchScoreCalculator,
}

impl RelaxationStrategy {
    pub fn new(config: RelaxationConfig, scorer: MatchScoreCalculator) -> Self {
        Self { config, scorer }
    }

    pub fn select(
        &self,
        jobs: &[JobPosting],
        criteria: &FilterCriteria,
        profile: Option<&CandidateProfile>,
        now: DateTime<Utc>,
    ) -> FilterOutcome {
        let compiled = CompiledCriteria::new(criteria);
        let profile = NormalizedProfile::from_profile(profile);
        self.select_compiled(jobs, &compiled, &profile, now)
    }

    pub fn select_compiled(
        &self,
        jobs: &[JobPosting],
        criteria: &CompiledCriteria,
        profile: &NormalizedProfile,
        now: DateTime<Utc>,
    ) -> FilterOutcome {
        if criteria.is_unfiltered() {
            debug!(total = jobs.len(), "no filters active; returning full list");
            return FilterOutcome {
                jobs: self.sort_by_score(jobs.to_vec(), profile),
                is_related: false,
                mode: SelectionMode::Unfiltered,
            };
        }

        let primary: Vec<JobPosting> = jobs
            .iter()
            .filter(|job| criteria.matches_primary(job, now))
            .cloned()
            .collect();

        if primary.len() >= self.config.min_primary_results {
            debug!(
                primary = primary.len(),
                threshold = self.config.min_primary_results,
                "primary filtering sufficient"
            );
            return FilterOutcome {
                jobs: primary,
                is_related: false,
                mode: SelectionMode::Primary,
            };
        }

        if criteria.facets.is_empty() {
            debug!(primary = primary.len(), "search only; relaxation skipped");
            return FilterOutcome {
                jobs: primary,
                is_related: false,
                mode: SelectionMode::SearchOnly,
            };
        }

        let relaxed: Vec<JobPosting> = jobs
            .iter()
            .filter(|job| {
                criteria.matches_primary(job, now) || criteria.matches_any_facet(job, now)
            })
            .cloned()
            .collect();

        debug!(
            primary = primary.len(),
            relaxed = relaxed.len(),
            active_facets = criteria.facets.len(),
            "relaxed filtering to any-facet matches"
        );

        FilterOutcome {
            jobs: self.sort_by_score(relaxed, profile),
            is_related: true,
            mode: SelectionMode::Relaxed,
        }
    }

    /// Descending by score. Stable, so ties keep source order.
    fn sort_by_score(
        &self,
        jobs: Vec<JobPosting>,
        profile: &NormalizedProfile,
    ) -> Vec<JobPosting> {
        let mut scored: Vec<(u8, JobPosting)> = jobs
            .into_iter()
            .map(|job| (self.scorer.score_normalized(&job, profile).total, job))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, job)| job).collect()
    }
}

/// Result-set selection with the default threshold and weights.
pub fn select_result_set(
    jobs: &[JobPosting],
    criteria: &FilterCriteria,
    profile: Option<&CandidateProfile>,
    now: DateTime<Utc>,
) -> FilterOutcome {
    RelaxationStrategy::default().select(jobs, criteria, profile, now)
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{profile::NormalizedProfile, relaxation::FilterOutcome, scoring::MatchScoreCalculator};
use crate::{CandidateProfile, JobPosting};

/// A job annotated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(flatten)]
    pub job: JobPosting,
    pub match_score: u8,
    pub is_related: bool,
    pub is_pending_application: bool,
}

/// What happened to the caller's pending application, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PendingStatus {
    NotRequested,
    Pinned { job_id: String },
    /// The pending job is no longer listed. The caller should clear its stored
    /// pending application; `notify` is true only the first time per session.
    Stale { job_id: String, notify: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssembledResults {
    pub results: Vec<MatchResult>,
    pub pending: PendingStatus,
}

impl AssembledResults {
    pub fn should_clear_pending(&self) -> bool {
        matches!(self.pending, PendingStatus::Stale { .. })
    }
}

/// Notices already shown to the user in the current session. Owned by the
/// caller and passed in, so assembling stays free of hidden state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionNotices {
    shown: BTreeSet<String>,
}

impl SessionNotices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key` and returns true if it had not been shown yet.
    pub fn notify_once(&mut self, key: impl Into<String>) -> bool {
        self.shown.insert(key.into())
    }

    pub fn has_shown(&self, key: &str) -> bool {
        self.shown.contains(key)
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

pub fn unavailable_notice_key(job_id: &str) -> String {
    format!("job_unavailable:{job_id}")
}

#[derive(Debug, Clone, Default)]
pub struct ResultAssembler {
    scorer: MatchScoreCalculator,
}

impl ResultAssembler {
    pub fn new(scorer: MatchScoreCalculator) -> Self {
        Self { scorer }
    }

    pub fn assemble(
        &self,
        outcome: FilterOutcome,
        profile: Option<&CandidateProfile>,
        pending_job_id: Option<&str>,
        notices: &mut SessionNotices,
    ) -> AssembledResults {
        let profile = NormalizedProfile::from_profile(profile);
        self.assemble_normalized(outcome, &profile, pending_job_id, notices)
    }

    pub fn assemble_normalized(
        &self,
        outcome: FilterOutcome,
        profile: &NormalizedProfile,
        pending_job_id: Option<&str>,
        notices: &mut SessionNotices,
    ) -> AssembledResults {
        let is_related = outcome.is_related;
        let mut results: Vec<MatchResult> = outcome
            .jobs
            .into_iter()
            .map(|job| MatchResult {
                match_score: self.scorer.score_normalized(&job, profile).total,
                job,
                is_related,
                is_pending_application: false,
            })
            .collect();

        let pending_job_id = pending_job_id.map(str::trim).filter(|id| !id.is_empty());
        let Some(job_id) = pending_job_id else {
            return AssembledResults {
                results,
                pending: PendingStatus::NotRequested,
            };
        };

        let pending = match results.iter().position(|result| result.job.id == job_id) {
            Some(index) => {
                let mut pinned = results.remove(index);
                pinned.is_pending_application = true;
                results.insert(0, pinned);
                debug!(job_id, from_index = index, "pinned pending application");
                PendingStatus::Pinned {
                    job_id: job_id.to_string(),
                }
            }
            None => {
                let notify = notices.notify_once(unavailable_notice_key(job_id));
                info!(job_id, notify, "pending application no longer listed");
                PendingStatus::Stale {
                    job_id: job_id.to_string(),
                    notify,
                }
            }
        };

        AssembledResults { results, pending }
    }
}

/// Assembly with the default weights.
pub fn assemble(
    outcome: FilterOutcome,
    profile: Option<&CandidateProfile>,
    pending_job_id: Option<&str>,
    notices: &mut SessionNotices,
) -> AssembledResults {
    ResultAssembler::default().assemble(outcome, profile, pending_job_id, notices)
}

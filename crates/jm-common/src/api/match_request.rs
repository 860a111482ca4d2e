use serde::Deserialize;

use crate::{CandidateProfile, FilterCriteria, JobPosting};

/// One ranking call as the job board sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankInput {
    pub jobs: Vec<JobPosting>,
    pub profile: Option<CandidateProfile>,
    pub criteria: FilterCriteria,
    pub pending_job_id: Option<String>,
}

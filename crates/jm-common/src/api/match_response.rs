use serde::Serialize;

use crate::matching::{MatchResult, PendingStatus, RankedJobs, SelectionMode};

/// JSON view of a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedJobsResponse {
    pub results: Vec<MatchResult>,
    pub is_related: bool,
    pub mode: SelectionMode,
    pub active_filter_count: usize,
    pub pending: PendingStatus,
}

impl From<RankedJobs> for RankedJobsResponse {
    fn from(ranked: RankedJobs) -> Self {
        Self {
            results: ranked.assembled.results,
            is_related: ranked.is_related,
            mode: ranked.mode,
            active_filter_count: ranked.active_filter_count,
            pending: ranked.assembled.pending,
        }
    }
}

impl From<&RankedJobs> for RankedJobsResponse {
    fn from(ranked: &RankedJobs) -> Self {
        Self::from(ranked.clone())
    }
}

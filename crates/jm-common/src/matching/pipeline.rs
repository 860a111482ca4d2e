use chrono::{DateTime, Utc};
use tracing::info;

use super::{
    assembler::{AssembledResults, ResultAssembler, SessionNotices},
    predicates::CompiledCriteria,
    profile::NormalizedProfile,
    relaxation::{RelaxationStrategy, SelectionMode},
    scoring::MatchScoreCalculator,
};
use crate::{config::EngineConfig, CandidateProfile, FilterCriteria, JobPosting};

/// Everything the engine needs for one evaluation. `now` anchors the
/// date-posted facet so repeated runs stay reproducible.
#[derive(Debug, Clone, Copy)]
pub struct RankRequest<'a> {
    pub jobs: &'a [JobPosting],
    pub profile: Option<&'a CandidateProfile>,
    pub criteria: &'a FilterCriteria,
    pub pending_job_id: Option<&'a str>,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedJobs {
    pub assembled: AssembledResults,
    pub mode: SelectionMode,
    pub is_related: bool,
    pub active_filter_count: usize,
}

pub struct JobMatchEngine {
    relaxation: RelaxationStrategy,
    assembler: ResultAssembler,
}

impl JobMatchEngine {
    pub fn new(config: EngineConfig) -> Self {
        let scorer = MatchScoreCalculator::new(config.scoring);
        Self {
            relaxation: RelaxationStrategy::new(config.relaxation, scorer.clone()),
            assembler: ResultAssembler::new(scorer),
        }
    }

    pub fn default() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Filter (relaxing if needed), score, then pin the pending application.
    pub fn rank_jobs(
        &self,
        request: RankRequest<'_>,
        notices: &mut SessionNotices,
    ) -> RankedJobs {
        let compiled = CompiledCriteria::new(request.criteria);
        let profile = NormalizedProfile::from_profile(request.profile);

        let outcome = self
            .relaxation
            .select_compiled(request.jobs, &compiled, &profile, request.now);
        let mode = outcome.mode;
        let is_related = outcome.is_related;

        let assembled = self.assembler.assemble_normalized(
            outcome,
            &profile,
            request.pending_job_id,
            notices,
        );

        info!(
            total = request.jobs.len(),
            returned = assembled.results.len(),
            mode = mode.as_ref(),
            is_related,
            active_facets = compiled.facets.len(),
            "ranked jobs"
        );

        RankedJobs {
            assembled,
            mode,
            is_related,
            active_filter_count: compiled.facets.len(),
        }
    }
}

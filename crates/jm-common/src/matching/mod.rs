pub mod assembler;
pub mod facets;
pub mod pipeline;
pub mod predicates;
pub mod profile;
pub mod relaxation;
pub mod scoring;
pub mod weights;

pub use assembler::{assemble, AssembledResults, MatchResult, PendingStatus, SessionNotices};
pub use facets::{collect_facet_options, FacetOptions};
pub use pipeline::{JobMatchEngine, RankRequest, RankedJobs};
pub use predicates::{matches_primary, CompiledCriteria};
pub use relaxation::{select_result_set, FilterOutcome, SelectionMode};
pub use scoring::{calculate_match_score, MatchScore, MatchScoreCalculator};

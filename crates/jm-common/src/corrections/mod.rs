pub mod experience_level;
pub mod workplace;

pub use experience_level::ExperienceBracket;
pub use workplace::{matches_workplace_token, workplace_synonyms, WORKPLACE_SYNONYMS};

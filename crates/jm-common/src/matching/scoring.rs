use serde::{Deserialize, Serialize};

use super::{
    profile::NormalizedProfile,
    weights::{NeutralScores, ScoreWeights},
};
use crate::{
    corrections::experience_level::level_fits_years, non_blank_lower, CandidateProfile,
    JobPosting,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub neutral: NeutralScores,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    pub score: f64,
    pub max_score: f64,
    pub status: &'static str,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    /// Rounded, clamped score in `[0, 100]`.
    pub total: u8,
    pub skills: ScoringResult,
    pub experience: ScoringResult,
    pub workplace: ScoringResult,
    pub goals: ScoringResult,
}

/// Score with the default weights.
pub fn calculate_match_score(job: &JobPosting, profile: Option<&CandidateProfile>) -> u8 {
    MatchScoreCalculator::default().score(job, profile)
}

#[derive(Debug, Clone, Default)]
pub struct MatchScoreCalculator {
    config: ScoringConfig,
}

impl MatchScoreCalculator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, job: &JobPosting, profile: Option<&CandidateProfile>) -> u8 {
        self.score_breakdown(job, profile).total
    }

    pub fn score_breakdown(
        &self,
        job: &JobPosting,
        profile: Option<&CandidateProfile>,
    ) -> MatchScore {
        let profile = NormalizedProfile::from_profile(profile);
        self.score_normalized(job, &profile)
    }

    /// Additive score over an already normalized profile. Callers scoring many
    /// jobs for one profile should normalize once and use this.
    pub fn score_normalized(&self, job: &JobPosting, profile: &NormalizedProfile) -> MatchScore {
        let neutral = self.config.neutral;
        let skills = finite_component(self.score_skills(job, profile), neutral.skills);
        let experience =
            finite_component(self.score_experience(job, profile), neutral.experience);
        let workplace = finite_component(self.score_workplace(job, profile), neutral.workplace);
        let goals = finite_component(self.score_goals(job, profile), 0.0);

        let sum = skills.score + experience.score + workplace.score + goals.score;
        let sum = if sum.is_finite() {
            sum
        } else {
            self.config.neutral.fallback_total
        };

        MatchScore {
            total: clamp_to_percent(sum, self.config.neutral.fallback_total),
            skills,
            experience,
            workplace,
            goals,
        }
    }

    fn score_skills(&self, job: &JobPosting, profile: &NormalizedProfile) -> ScoringResult {
        let max_score = self.config.weights.skills;
        let neutral = self.config.neutral.skills;

        let job_skills: Vec<String> = job
            .skills
            .iter()
            .filter_map(|skill| non_blank_lower(Some(skill.as_str())))
            .collect();

        let profile_skills = match profile.skills.as_deref() {
            Some(skills) if !job_skills.is_empty() => skills,
            _ => {
                return ScoringResult {
                    score: neutral,
                    max_score,
                    status: "UNKNOWN",
                    details: "job or profile skills missing; neutral score".into(),
                };
            }
        };

        let matched: Vec<&str> = job_skills
            .iter()
            .filter(|job_skill| {
                profile_skills.iter().any(|own| {
                    job_skill.contains(own.as_str()) || own.contains(job_skill.as_str())
                })
            })
            .map(String::as_str)
            .collect();

        let ratio = matched.len() as f64 / job_skills.len() as f64;
        let score = ratio * max_score;

        ScoringResult {
            score,
            max_score,
            status: status_from_ratio(score, max_score),
            details: format!(
                "{} of {} job skills covered ({})",
                matched.len(),
                job_skills.len(),
                if matched.is_empty() {
                    "none".to_string()
                } else {
                    matched.join(", ")
                }
            ),
        }
    }

    fn score_experience(&self, job: &JobPosting, profile: &NormalizedProfile) -> ScoringResult {
        let max_score = self.config.weights.experience;

        let (level, years) = match (
            non_blank_lower(job.experience_level.as_deref()),
            profile.experience_years,
        ) {
            (Some(level), Some(years)) => (level, years),
            _ => {
                return ScoringResult {
                    score: self.config.neutral.experience,
                    max_score,
                    status: "UNKNOWN",
                    details: "experience level or history missing; neutral score".into(),
                };
            }
        };

        if level_fits_years(&level, years) {
            ScoringResult {
                score: max_score,
                max_score,
                status: "PERFECT_MATCH",
                details: format!("{years} years fits '{level}'"),
            }
        } else {
            ScoringResult {
                score: 0.0,
                max_score,
                status: "MISS",
                details: format!("{years} years outside '{level}'"),
            }
        }
    }

    fn score_workplace(&self, job: &JobPosting, profile: &NormalizedProfile) -> ScoringResult {
        let max_score = self.config.weights.workplace;

        let work_style = match (
            non_blank_lower(job.location.as_deref()),
            profile.work_style.as_deref(),
        ) {
            (Some(_), Some(work_style)) => work_style,
            _ => {
                return ScoringResult {
                    score: self.config.neutral.workplace,
                    max_score,
                    status: "UNKNOWN",
                    details: "job location or work style missing; neutral score".into(),
                };
            }
        };

        let employment = job
            .employment_type
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        let matched = ["remote", "office"]
            .into_iter()
            .find(|mode| work_style.contains(mode) && employment.contains(mode));

        match matched {
            Some(mode) => ScoringResult {
                score: max_score,
                max_score,
                status: "PERFECT_MATCH",
                details: format!("{mode} preference matches employment type"),
            },
            None => ScoringResult {
                score: 0.0,
                max_score,
                status: "MISS",
                details: format!("work style '{work_style}' vs employment '{employment}'"),
            },
        }
    }

    fn score_goals(&self, job: &JobPosting, profile: &NormalizedProfile) -> ScoringResult {
        let max_score = self.config.weights.goals;

        let (description, goals) = match (
            non_blank_lower(Some(job.description.as_str())),
            profile.career_goals.as_deref(),
        ) {
            (Some(description), Some(goals)) => (description, goals),
            _ => {
                return ScoringResult {
                    score: 0.0,
                    max_score,
                    status: "UNKNOWN",
                    details: "description or career goals missing".into(),
                };
            }
        };

        let goal_word = goals.split_whitespace().next();
        let title = job.title.to_lowercase();
        let title_word = title.split_whitespace().next();

        let aligned = goal_word.is_some_and(|word| description.contains(word))
            || title_word.is_some_and(|word| goals.contains(word));

        if aligned {
            ScoringResult {
                score: max_score,
                max_score,
                status: "PERFECT_MATCH",
                details: "career goals align with the posting".into(),
            }
        } else {
            ScoringResult {
                score: 0.0,
                max_score,
                status: "MISS",
                details: "career goals not mentioned by the posting".into(),
            }
        }
    }
}

/// Replaces a NaN or infinite component with its neutral default.
fn finite_component(result: ScoringResult, neutral: f64) -> ScoringResult {
    if result.score.is_finite() {
        return result;
    }
    ScoringResult {
        score: guard_finite(neutral, 0.0),
        status: "UNKNOWN",
        details: format!("non-finite score replaced by neutral default ({})", result.details),
        ..result
    }
}

fn guard_finite(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn clamp_to_percent(value: f64, fallback: f64) -> u8 {
    let value = guard_finite(value, fallback);
    let value = guard_finite(value, 50.0);
    value.round().clamp(0.0, 100.0) as u8
}

fn status_from_ratio(score: f64, max_score: f64) -> &'static str {
    if max_score <= 0.0 {
        return "UNKNOWN";
    }
    let ratio = score / max_score;
    if ratio >= 0.9 {
        "PERFECT_MATCH"
    } else if ratio >= 0.7 {
        "MATCH"
    } else if ratio >= 0.4 {
        "PARTIAL_MATCH"
    } else {
        "MISS"
    }
}

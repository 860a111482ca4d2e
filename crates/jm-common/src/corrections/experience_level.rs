use strum::AsRefStr;

/// Seniority bracket named in a job's free-text experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ExperienceBracket {
    Entry,
    Junior,
    Mid,
    Senior,
}

impl ExperienceBracket {
    const ALL: [ExperienceBracket; 4] = [
        ExperienceBracket::Entry,
        ExperienceBracket::Junior,
        ExperienceBracket::Mid,
        ExperienceBracket::Senior,
    ];

    /// Brackets mentioned in the text. "Junior to Mid" yields both.
    pub fn detect(experience_level: &str) -> Vec<ExperienceBracket> {
        let lower = experience_level.to_lowercase();
        Self::ALL
            .into_iter()
            .filter(|bracket| lower.contains(bracket.as_ref()))
            .collect()
    }

    /// Years of experience accepted by the bracket (inclusive).
    pub fn accepts(self, years: usize) -> bool {
        match self {
            ExperienceBracket::Entry => years <= 2,
            ExperienceBracket::Junior => years <= 3,
            ExperienceBracket::Mid => (2..=5).contains(&years),
            ExperienceBracket::Senior => years >= 5,
        }
    }
}

/// True when any bracket named by `experience_level` accepts `years`.
pub fn level_fits_years(experience_level: &str, years: usize) -> bool {
    ExperienceBracket::detect(experience_level)
        .into_iter()
        .any(|bracket| bracket.accepts(years))
}

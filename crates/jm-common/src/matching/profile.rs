use serde_json::Value;

use crate::{non_blank_lower, CandidateProfile};

/// A `CandidateProfile` with its optional fields coerced once, so scoring
/// never has to re-check raw JSON shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedProfile {
    /// Lower-cased, non-blank skills. `None` when no usable skill remains.
    pub skills: Option<Vec<String>>,
    /// Length of the experience list, present even when the list is empty.
    pub experience_years: Option<usize>,
    /// Work style coerced to lower-cased text.
    pub work_style: Option<String>,
    /// Trimmed, lower-cased career goals.
    pub career_goals: Option<String>,
}

impl NormalizedProfile {
    pub fn from_profile(profile: Option<&CandidateProfile>) -> Self {
        let Some(profile) = profile else {
            return Self::default();
        };

        let skills = profile.skills.as_ref().and_then(|skills| {
            let cleaned: Vec<String> = skills
                .iter()
                .filter_map(|skill| non_blank_lower(Some(skill.as_str())))
                .collect();
            (!cleaned.is_empty()).then_some(cleaned)
        });

        Self {
            skills,
            experience_years: profile.experience.as_ref().map(Vec::len),
            work_style: profile
                .work_style
                .as_ref()
                .and_then(coerce_to_text)
                .and_then(|text| non_blank_lower(Some(text.as_str()))),
            career_goals: non_blank_lower(profile.career_goals.as_deref()),
        }
    }
}

/// String coercion for loosely typed profile fields.
fn coerce_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(coerce_to_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(map) => Some(
            map.values()
                .filter_map(coerce_to_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_profile_is_fully_neutral() {
        assert_eq!(NormalizedProfile::from_profile(None), NormalizedProfile::default());
    }

    #[test]
    fn blank_skills_are_dropped() {
        let profile = CandidateProfile {
            skills: Some(vec!["  ".into(), "React".into(), "".into()]),
            ..CandidateProfile::default()
        };
        let normalized = NormalizedProfile::from_profile(Some(&profile));
        assert_eq!(normalized.skills, Some(vec!["react".to_string()]));

        let only_blank = CandidateProfile {
            skills: Some(vec![" ".into()]),
            ..CandidateProfile::default()
        };
        assert_eq!(NormalizedProfile::from_profile(Some(&only_blank)).skills, None);
    }

    #[test]
    fn empty_experience_list_means_zero_years() {
        let profile = CandidateProfile {
            experience: Some(vec![]),
            ..CandidateProfile::default()
        };
        assert_eq!(
            NormalizedProfile::from_profile(Some(&profile)).experience_years,
            Some(0)
        );
    }

    #[test]
    fn work_style_is_coerced_to_text() {
        let cases = [
            (json!("Remote first"), Some("remote first")),
            (json!(["Remote", "Async"]), Some("remote,async")),
            (json!({"preference": "Office"}), Some("office")),
            (json!(true), Some("true")),
            (json!(""), None),
            (Value::Null, None),
        ];

        for (raw, expected) in cases {
            let profile = CandidateProfile {
                work_style: Some(raw.clone()),
                ..CandidateProfile::default()
            };
            assert_eq!(
                NormalizedProfile::from_profile(Some(&profile)).work_style.as_deref(),
                expected,
                "work style {raw}"
            );
        }
    }
}

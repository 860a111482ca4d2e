use chrono::{DateTime, Duration, TimeZone, Utc};
use jm_common::matching::{
    calculate_match_score, select_result_set, JobMatchEngine, PendingStatus, RankRequest,
    SelectionMode, SessionNotices,
};
use jm_common::{CandidateProfile, FilterCriteria, JobPosting};
use serde_json::json;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn board() -> Vec<JobPosting> {
    let skills = [
        vec!["Rust", "PostgreSQL"],
        vec!["Go"],
        vec!["React", "TypeScript"],
        vec![],
        vec!["Rust"],
        vec!["Java", "Kotlin"],
        vec!["Python", "SQL"],
        vec!["Rust", "Go", "Kubernetes"],
        vec!["Figma"],
        vec!["C++"],
    ];
    let levels = ["Senior", "Junior", "Mid", "Entry", "Senior"];

    skills
        .iter()
        .enumerate()
        .map(|(i, skills)| JobPosting {
            id: (i + 1).to_string(),
            title: format!("Engineer {}", i + 1),
            company_name: format!("Company {}", i % 3),
            description: "Build things with a small team.".into(),
            location: Some(if i % 2 == 0 { "Toronto, Canada" } else { "Austin, USA" }.into()),
            workplace_type: Some(if i == 6 { "Remote" } else { "On-site" }.into()),
            employment_type: Some("Full-time office".into()),
            experience_level: Some(levels[i % levels.len()].into()),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            posted_at: Some(now() - Duration::days(i as i64)),
            ..JobPosting::default()
        })
        .collect()
}

fn rust_profile() -> CandidateProfile {
    CandidateProfile {
        skills: Some(vec!["rust".into(), "go".into()]),
        experience: Some(vec![json!("a"), json!("b"), json!("c")]),
        work_style: Some(json!("office")),
        career_goals: Some("Engineer building infrastructure".into()),
    }
}

fn scores(jobs: &[JobPosting], profile: Option<&CandidateProfile>) -> Vec<u8> {
    jobs.iter()
        .map(|job| calculate_match_score(job, profile))
        .collect()
}

fn is_descending(values: &[u8]) -> bool {
    values.windows(2).all(|pair| pair[0] >= pair[1])
}

#[test]
fn scores_stay_within_bounds_for_any_profile() {
    let profiles = [
        None,
        Some(CandidateProfile::default()),
        Some(rust_profile()),
        Some(CandidateProfile {
            skills: Some(vec!["".into(), " ".into()]),
            experience: Some(vec![json!(null); 30]),
            work_style: Some(json!({"mode": "remote"})),
            career_goals: Some("   ".into()),
        }),
    ];

    for profile in &profiles {
        for job in board() {
            let score = calculate_match_score(&job, profile.as_ref());
            assert!(score <= 100, "job {} scored {score}", job.id);
        }
    }
}

#[test]
fn pipeline_is_idempotent() {
    let engine = JobMatchEngine::default();
    let jobs = board();
    let profile = rust_profile();
    let criteria = FilterCriteria {
        workplace: vec!["Remote".into()],
        country: Some("Canada".into()),
        ..FilterCriteria::default()
    };
    let request = RankRequest {
        jobs: &jobs,
        profile: Some(&profile),
        criteria: &criteria,
        pending_job_id: Some("5"),
        now: now(),
    };

    let first = engine.rank_jobs(request, &mut SessionNotices::new());
    let second = engine.rank_jobs(request, &mut SessionNotices::new());
    assert_eq!(first, second);
}

#[test]
fn enough_primary_matches_are_returned_unchanged() {
    let jobs = board();
    let criteria = FilterCriteria {
        country: Some("canada".into()),
        ..FilterCriteria::default()
    };

    let outcome = select_result_set(&jobs, &criteria, Some(&rust_profile()), now());
    let ids: Vec<&str> = outcome.jobs.iter().map(|job| job.id.as_str()).collect();

    assert_eq!(outcome.mode, SelectionMode::Primary);
    assert!(!outcome.is_related);
    assert_eq!(ids, vec!["1", "3", "5", "7", "9"]);
}

#[test]
fn unfiltered_returns_the_full_list_by_score() {
    let jobs = board();
    let profile = rust_profile();

    let outcome = select_result_set(&jobs, &FilterCriteria::default(), Some(&profile), now());

    assert_eq!(outcome.mode, SelectionMode::Unfiltered);
    assert!(!outcome.is_related);
    assert_eq!(outcome.jobs.len(), jobs.len());
    assert!(is_descending(&scores(&outcome.jobs, Some(&profile))));
}

#[test]
fn relaxation_never_bypasses_search() {
    let jobs = board();
    let criteria = FilterCriteria {
        workplace: vec!["Hybrid".into()],
        country: Some("USA".into()),
        search_query: "kubernetes".into(),
        ..FilterCriteria::default()
    };

    let outcome = select_result_set(&jobs, &criteria, None, now());

    assert_eq!(outcome.mode, SelectionMode::Relaxed);
    assert!(outcome.is_related);
    // five jobs are in the USA, only one mentions Kubernetes
    assert_eq!(outcome.jobs.len(), 1);
    assert!(outcome
        .jobs
        .iter()
        .all(|job| job.skills.iter().any(|skill| skill == "Kubernetes")));
}

#[test]
fn single_remote_job_triggers_relaxation() {
    let jobs = board();
    let profile = rust_profile();
    let criteria = FilterCriteria {
        workplace: vec!["Remote".into()],
        ..FilterCriteria::default()
    };

    let outcome = select_result_set(&jobs, &criteria, Some(&profile), now());

    assert_eq!(outcome.mode, SelectionMode::Relaxed);
    assert!(outcome.is_related);
    assert!(outcome.jobs.iter().any(|job| job.id == "7"));
    assert!(is_descending(&scores(&outcome.jobs, Some(&profile))));

    // a second facet widens the related set; ordering is still by score
    let criteria = FilterCriteria {
        country: Some("Canada".into()),
        ..criteria
    };
    let outcome = select_result_set(&jobs, &criteria, Some(&profile), now());
    assert!(outcome.is_related);
    assert_eq!(outcome.jobs.len(), 5);
    assert!(is_descending(&scores(&outcome.jobs, Some(&profile))));
}

#[test]
fn pending_job_is_pinned_first() {
    let mut jobs = board();
    jobs[4].id = "42".into();
    let engine = JobMatchEngine::default();
    let criteria = FilterCriteria::default();
    let profile = rust_profile();

    let baseline = engine.rank_jobs(
        RankRequest {
            jobs: &jobs,
            profile: Some(&profile),
            criteria: &criteria,
            pending_job_id: None,
            now: now(),
        },
        &mut SessionNotices::new(),
    );
    let pinned = engine.rank_jobs(
        RankRequest {
            jobs: &jobs,
            profile: Some(&profile),
            criteria: &criteria,
            pending_job_id: Some("42"),
            now: now(),
        },
        &mut SessionNotices::new(),
    );

    let results = &pinned.assembled.results;
    assert_eq!(results[0].job.id, "42");
    assert!(results[0].is_pending_application);

    let before: Vec<&str> = baseline
        .assembled
        .results
        .iter()
        .map(|result| result.job.id.as_str())
        .filter(|id| *id != "42")
        .collect();
    let after: Vec<&str> = results[1..]
        .iter()
        .map(|result| result.job.id.as_str())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn stale_pending_job_notifies_once() {
    let engine = JobMatchEngine::default();
    let jobs = board();
    let criteria = FilterCriteria::default();
    let mut notices = SessionNotices::new();
    let request = RankRequest {
        jobs: &jobs,
        profile: None,
        criteria: &criteria,
        pending_job_id: Some("gone"),
        now: now(),
    };

    let first = engine.rank_jobs(request, &mut notices);
    let second = engine.rank_jobs(request, &mut notices);

    assert_eq!(first.assembled.results.len(), jobs.len());
    assert!(first
        .assembled
        .results
        .iter()
        .all(|result| !result.is_pending_application));
    assert_eq!(
        first.assembled.pending,
        PendingStatus::Stale {
            job_id: "gone".into(),
            notify: true
        }
    );
    assert_eq!(
        second.assembled.pending,
        PendingStatus::Stale {
            job_id: "gone".into(),
            notify: false
        }
    );
    assert_eq!(first.assembled.results, second.assembled.results);
}

#[test]
fn reference_scenario_scores_55() {
    let job = JobPosting {
        id: "1".into(),
        title: "Frontend Developer".into(),
        location: Some("Remote".into()),
        workplace_type: Some("Remote".into()),
        employment_type: Some("Remote".into()),
        skills: vec!["React".into(), "Node".into()],
        ..JobPosting::default()
    };
    let profile = CandidateProfile {
        skills: Some(vec!["react".into()]),
        experience: Some(vec![]),
        work_style: Some(json!("remote")),
        career_goals: None,
    };

    assert_eq!(calculate_match_score(&job, Some(&profile)), 55);
}

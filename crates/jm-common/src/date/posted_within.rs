use chrono::{DateTime, Duration, Utc};
use strum::AsRefStr;

/// "Date posted" filter choices offered by the job board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum DatePostedWindow {
    PastDay,
    PastWeek,
    PastMonth,
}

impl DatePostedWindow {
    pub fn duration(self) -> Duration {
        match self {
            DatePostedWindow::PastDay => Duration::hours(24),
            DatePostedWindow::PastWeek => Duration::days(7),
            DatePostedWindow::PastMonth => Duration::days(30),
        }
    }

    /// Postings dated in the future (clock skew on the backend) are kept.
    pub fn contains(self, posted_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(posted_at) <= self.duration()
    }
}

/// Parses the free-text filter token. `any`, blank and unknown tokens mean
/// "no date constraint" and yield `None`.
pub fn parse_date_posted(token: &str) -> Option<DatePostedWindow> {
    let normalized = token.trim().to_lowercase().replace(['_', '-'], " ");
    match normalized.as_str() {
        "24h" | "past 24 hours" | "last 24 hours" | "today" | "day" | "past day" => {
            Some(DatePostedWindow::PastDay)
        }
        "7d" | "week" | "past week" | "last week" | "last 7 days" => {
            Some(DatePostedWindow::PastWeek)
        }
        "30d" | "month" | "past month" | "last month" | "last 30 days" => {
            Some(DatePostedWindow::PastMonth)
        }
        _ => None,
    }
}

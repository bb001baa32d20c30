use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Basic identity record for a profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BasicInfo {
    /// The unique identifier for the profile.
    pub id: i64,
    /// Full display name of the profile owner.
    pub name: String,
    pub email: Option<String>,
    pub location: Option<String>,
    /// Free-text professional summary.
    pub summary: Option<String>,
    pub linkedin_url: Option<String>,
    /// Username on the repository-hosting platform.
    pub github_username: Option<String>,
}

/// A single skill entry attached to a profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    /// Grouping such as "Backend" or "Languages".
    pub category: Option<String>,
    /// Internal grading. Never exposed in responses.
    pub proficiency_level: Option<String>,
}

/// A work-experience entry. Dates are ISO strings; an absent end date
/// means the position is current.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Experience {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// A portfolio project attached to a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub relevance_tags: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
}

/// A hosted repository as returned by the repository-host contract.
///
/// Field names follow the hosting API's JSON shape so records deserialize
/// directly from its repository listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub description: Option<String>,
    /// Primary implementation language reported by the host.
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(rename = "stargazers_count", default)]
    pub stars: u32,
    #[serde(rename = "forks_count", default)]
    pub forks: u32,
    /// Repository size in kilobytes.
    #[serde(rename = "size", default)]
    pub size_kb: u32,
    #[serde(rename = "fork", default)]
    pub is_fork: bool,
    #[serde(rename = "archived", default)]
    pub is_archived: bool,
    /// Timestamp of the last push, used for the recency bonus.
    pub pushed_at: Option<DateTime<Utc>>,
    pub html_url: Option<String>,
}

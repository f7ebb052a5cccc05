// file: src/models/commit.rs
// description: commit listing entries and last-modified date resolution
// reference: https://docs.github.com/en/rest/commits/commits

use crate::error::{Result, ServerError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub committer: Signature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub name: String,
    pub date: String,
}

impl Commit {
    pub fn with_committer_date(date: impl Into<String>) -> Self {
        Self {
            sha: String::new(),
            commit: CommitDetail {
                committer: Signature {
                    name: String::new(),
                    date: date.into(),
                },
            },
        }
    }

    pub fn committer_date(&self) -> &str {
        &self.commit.committer.date
    }
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_commit_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ServerError::Upstream(format!("Unparseable committer date: {:?}", raw)))
}

/// Committer date of the most recent commit, as the API reported it.
/// Ties keep the commit listed first.
pub fn latest_commit_date(commits: &[Commit]) -> Result<String> {
    let mut latest: Option<(DateTime<Utc>, &Commit)> = None;

    for commit in commits {
        let ts = parse_commit_date(commit.committer_date())?;
        match latest {
            Some((best, _)) if ts <= best => {}
            _ => latest = Some((ts, commit)),
        }
    }

    latest
        .map(|(_, commit)| commit.committer_date().to_string())
        .ok_or_else(|| ServerError::Upstream("Commit history is empty".to_string()))
}

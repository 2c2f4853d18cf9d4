use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A system-info entry: one released version and its change notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: i64,
    pub version: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub updates: String,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub fecha_creacion: Option<DateTime<Utc>>,
}

impl Release {
    pub fn bullets(&self) -> Vec<&str> {
        parse_bullets(&self.updates)
    }
}

/// Split newline-delimited notes into bullets: blank lines are dropped and a
/// leading `- ` marker is removed.
pub fn parse_bullets(updates: &str) -> Vec<&str> {
    updates
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.strip_prefix("- ").unwrap_or(line).trim())
        .collect()
}

/// Editable fields of a release.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReleaseDraft {
    pub version: String,
    pub release_date: String,
    pub updates: String,
    pub is_current: bool,
}

impl ReleaseDraft {
    pub fn from_release(release: &Release) -> Self {
        Self {
            version: release.version.clone(),
            release_date: release.release_date.clone(),
            updates: release.updates.clone(),
            is_current: release.is_current,
        }
    }
}

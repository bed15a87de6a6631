use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Show summary returned by `GET /api/show`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShowInfo {
    pub movie_title: String,
    pub starts_at: DateTime<Utc>,
    pub total_seats: usize,
    pub available_seats: usize,
    /// Optimistic concurrency token
    pub version: String,
}

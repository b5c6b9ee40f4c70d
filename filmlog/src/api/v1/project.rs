//! Project endpoints.

use serde::{Deserialize, Serialize};

use crate::project::ProjectStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,

    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: i64,
    pub name: String,
    pub status: ProjectStatus,
    pub notes: String,

    /// Number of rolls in the project that are still in storage.
    pub rolls_remaining: u64,
}

//! Roll endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::roll::{PushPull, RollStatus};

/// Changes to a roll.
///
/// Specifying `None` means keeping the current value (or the default
/// for a new roll). Nullable fields take `null` to clear them.
///
/// A push/pull of `"0"` is accepted and stored as no push/pull.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollChanges {
    /// The film the roll is of.
    ///
    /// Required when creating a roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub film_id: Option<i64>,

    /// The camera the roll is in.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub camera_id: Option<Option<i64>>,

    /// The camera back the roll is in.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub camera_back_id: Option<Option<i64>>,

    /// The project the roll belongs to.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub project_id: Option<Option<i64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RollStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_pull: Option<PushPull>,

    /// Date the roll was loaded.
    ///
    /// Setting this on a roll without a code starts the roll.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub started_on: Option<Option<NaiveDate>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub ended_on: Option<Option<NaiveDate>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_on_development: Option<String>,
}

/// A roll as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollInfo {
    pub id: i64,
    pub film_id: i64,
    pub camera_id: Option<i64>,
    pub camera_back_id: Option<i64>,
    pub project_id: Option<i64>,

    /// The roll code.
    ///
    /// Empty until the roll is started.
    pub code: String,

    pub status: RollStatus,
    pub push_pull: PushPull,
    pub started_on: Option<NaiveDate>,
    pub ended_on: Option<NaiveDate>,

    /// The box speed adjusted for push/pull processing.
    pub effective_iso: i32,

    pub lens: String,
    pub location: String,
    pub notes: String,
    pub lab: String,
    pub scanner: String,
    pub notes_on_development: String,
}

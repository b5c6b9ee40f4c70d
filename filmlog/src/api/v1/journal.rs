//! Journal and frame endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJournalEntryRequest {
    pub date: NaiveDate,

    /// The last frame shot on that day.
    pub frame: i32,

    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryInfo {
    pub id: i64,
    pub roll_id: i64,
    pub date: NaiveDate,

    /// The first frame shot on that day.
    pub starting_frame: i32,

    /// The last frame shot on that day.
    pub frame: i32,

    pub notes: String,
}

/// Creates one or more frames with identical metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFramesRequest {
    pub starting_frame: i32,

    /// If set, every frame from `starting_frame` to `ending_frame`
    /// (inclusive) is created.
    #[serde(default)]
    pub ending_frame: Option<i32>,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Free text, e.g., "f/8".
    #[serde(default)]
    pub aperture: String,

    /// Free text, e.g., "1/125".
    #[serde(default)]
    pub shutter_speed: String,

    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameInfo {
    pub id: i64,
    pub roll_id: i64,
    pub number: i32,
    pub date: Option<NaiveDate>,
    pub aperture: String,
    pub shutter_speed: String,
    pub notes: String,
}

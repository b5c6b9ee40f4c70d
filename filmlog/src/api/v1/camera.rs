//! Camera endpoints.

use serde::{Deserialize, Serialize};

use crate::catalog::FilmFormat;
use crate::equipment::EquipmentStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCameraRequest {
    /// A freeform name.
    pub name: String,

    pub format: FilmFormat,

    /// Whether the camera takes interchangeable backs.
    #[serde(default)]
    pub multiple_backs: bool,

    /// Initial status.
    ///
    /// Defaults to empty.
    #[serde(default)]
    pub status: EquipmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCameraBackRequest {
    pub name: String,

    /// The format of the back.
    ///
    /// Defaults to the format of the camera.
    #[serde(default)]
    pub format: Option<FilmFormat>,
}

/// A direct status change of a camera or camera back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetEquipmentStatusRequest {
    pub status: EquipmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraInfo {
    pub id: i64,
    pub name: String,
    pub format: FilmFormat,
    pub status: EquipmentStatus,
    pub multiple_backs: bool,

    /// ID of the roll the camera is loaded with.
    pub loaded_roll_id: Option<i64>,

    pub backs: Vec<CameraBackInfo>,

    /// Number of rolls that have been finished in this camera.
    pub finished_rolls: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraBackInfo {
    pub id: i64,
    pub camera_id: i64,
    pub name: String,
    pub format: FilmFormat,
    pub status: EquipmentStatus,

    /// ID of the roll the back is loaded with.
    pub loaded_roll_id: Option<i64>,
}

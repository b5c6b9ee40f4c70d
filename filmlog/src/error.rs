//! Error handling.

use std::error::Error as StdError;

use displaydoc::Display;

pub type FilmlogResult<T> = Result<T, FilmlogError>;

/// An error.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum FilmlogError {
    /// Invalid roll status "{status}"
    InvalidRollStatus { status: String },

    /// Invalid push/pull value "{value}"
    InvalidPushPull { value: String },

    /// Invalid equipment status "{status}"
    InvalidEquipmentStatus { status: String },

    /// Invalid film format "{format}"
    InvalidFilmFormat { format: String },

    /// Invalid film type "{kind}"
    InvalidFilmType { kind: String },

    /// Invalid project status "{status}"
    InvalidProjectStatus { status: String },

    /// Invalid roll code "{code}"
    InvalidRollCode { code: String },

    /// Film {film_id} has no process type
    MissingFilmType { film_id: i64 },

    /// A roll with status "{status}" needs a start date
    MissingStartDate { status: &'static str },

    /// A camera back can only be set together with a camera
    CameraBackWithoutCamera,

    /// Invalid frame range {start}..={end}: {reason}
    InvalidFrameRange {
        start: i32,
        end: i32,
        reason: &'static str,
    },

    /// Invalid frame number {number}
    InvalidFrameNumber { number: i32 },

    /// The camera is already loaded with roll {roll_id}
    CameraOccupied { roll_id: i64 },

    /// The camera back is already loaded with roll {roll_id}
    CameraBackOccupied { roll_id: i64 },

    /// A code sequence number is required to start this roll
    MissingCodeSequence,
}

impl FilmlogError {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRollStatus { .. } => "InvalidRollStatus",
            Self::InvalidPushPull { .. } => "InvalidPushPull",
            Self::InvalidEquipmentStatus { .. } => "InvalidEquipmentStatus",
            Self::InvalidFilmFormat { .. } => "InvalidFilmFormat",
            Self::InvalidFilmType { .. } => "InvalidFilmType",
            Self::InvalidProjectStatus { .. } => "InvalidProjectStatus",
            Self::InvalidRollCode { .. } => "InvalidRollCode",
            Self::MissingFilmType { .. } => "MissingFilmType",
            Self::MissingStartDate { .. } => "MissingStartDate",
            Self::CameraBackWithoutCamera => "CameraBackWithoutCamera",
            Self::InvalidFrameRange { .. } => "InvalidFrameRange",
            Self::InvalidFrameNumber { .. } => "InvalidFrameNumber",
            Self::CameraOccupied { .. } => "CameraOccupied",
            Self::CameraBackOccupied { .. } => "CameraBackOccupied",
            Self::MissingCodeSequence => "MissingCodeSequence",
        }
    }

    /// Returns whether the error was caused by two records competing for
    /// the same piece of equipment.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::CameraOccupied { .. } | Self::CameraBackOccupied { .. }
        )
    }
}

impl StdError for FilmlogError {}

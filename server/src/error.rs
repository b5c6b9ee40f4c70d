//! Error handling.

use std::error::Error as StdError;
use std::fmt;

use anyhow::Error as AnyError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use displaydoc::Display;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use tracing_error::SpanTrace;

use filmlog::error::FilmlogError;

pub type ServerResult<T> = Result<T, ServerError>;

/// An error.
#[derive(Debug)]
pub struct ServerError {
    /// The kind of the error.
    kind: ErrorKind,

    /// Context of where the error occurred.
    context: SpanTrace,
}

/// The kind of an error.
#[derive(Debug, Display)]
pub enum ErrorKind {
    // Generic responses
    /// The URL you requested was not found.
    NotFound,

    /// Unauthorized.
    Unauthorized,

    /// The server encountered an internal error or misconfiguration.
    InternalServerError,

    // Specialized responses
    /// The requested roll does not exist.
    NoSuchRoll,

    /// The requested camera does not exist.
    NoSuchCamera,

    /// The requested camera back does not exist.
    NoSuchCameraBack,

    /// The requested film does not exist.
    NoSuchFilm,

    /// The requested project does not exist.
    NoSuchProject,

    /// The camera back does not belong to the camera.
    CameraBackMismatch,

    /// Only one entry per date per roll.
    DuplicateJournalEntry,

    /// This roll already has frame #{number}.
    DuplicateFrame { number: i32 },

    /// The equipment was loaded with another roll at the same time.
    EquipmentConflict,

    /// Database error: {0}
    DatabaseError(AnyError),

    /// General request error: {0}
    RequestError(AnyError),

    /// {0}
    FilmlogError(FilmlogError),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    code: u16,
    error: String,
    message: String,
}

impl ServerError {
    pub fn database_error(error: impl StdError + Send + Sync + 'static) -> Self {
        ErrorKind::DatabaseError(AnyError::new(error)).into()
    }

    pub fn request_error(error: impl StdError + Send + Sync + 'static) -> Self {
        ErrorKind::RequestError(AnyError::new(error)).into()
    }

    /// Maps a unique constraint violation to a more specific error.
    ///
    /// Any other database error is returned as a generic database error.
    pub fn unique_violation_or(error: DbErr, kind: impl FnOnce() -> ErrorKind) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = error.sql_err() {
            kind().into()
        } else {
            Self::database_error(error)
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns a version of this error for clients.
    fn into_clients(self) -> Self {
        let kind = match self.kind {
            ErrorKind::DatabaseError(_) => ErrorKind::InternalServerError,
            ErrorKind::FilmlogError(FilmlogError::MissingCodeSequence) => {
                ErrorKind::InternalServerError
            }

            k => k,
        };

        Self {
            kind,
            context: self.context,
        }
    }
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::Unauthorized => "Unauthorized",
            Self::InternalServerError => "InternalServerError",

            Self::NoSuchRoll => "NoSuchRoll",
            Self::NoSuchCamera => "NoSuchCamera",
            Self::NoSuchCameraBack => "NoSuchCameraBack",
            Self::NoSuchFilm => "NoSuchFilm",
            Self::NoSuchProject => "NoSuchProject",
            Self::CameraBackMismatch => "CameraBackMismatch",
            Self::DuplicateJournalEntry => "DuplicateJournalEntry",
            Self::DuplicateFrame { .. } => "DuplicateFrame",
            Self::EquipmentConflict => "EquipmentConflict",
            Self::DatabaseError(_) => "DatabaseError",
            Self::RequestError(_) => "RequestError",
            Self::FilmlogError(e) => e.name(),
        }
    }

    fn http_status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,

            Self::NoSuchRoll => StatusCode::NOT_FOUND,
            Self::NoSuchCamera => StatusCode::NOT_FOUND,
            Self::NoSuchCameraBack => StatusCode::NOT_FOUND,
            Self::NoSuchFilm => StatusCode::NOT_FOUND,
            Self::NoSuchProject => StatusCode::NOT_FOUND,
            Self::CameraBackMismatch => StatusCode::BAD_REQUEST,
            Self::DuplicateJournalEntry => StatusCode::CONFLICT,
            Self::DuplicateFrame { .. } => StatusCode::CONFLICT,
            Self::EquipmentConflict => StatusCode::CONFLICT,
            Self::RequestError(_) => StatusCode::BAD_REQUEST,
            Self::FilmlogError(e) if e.is_conflict() => StatusCode::CONFLICT,
            Self::FilmlogError(FilmlogError::MissingCodeSequence) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::FilmlogError(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        write!(f, "{}", self.context)
    }
}

impl StdError for ServerError {}

impl From<ErrorKind> for ServerError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: SpanTrace::capture(),
        }
    }
}

impl From<FilmlogError> for ServerError {
    fn from(error: FilmlogError) -> Self {
        ErrorKind::FilmlogError(error).into()
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if matches!(self.kind, ErrorKind::DatabaseError(_)) {
            tracing::error!("{}", self);
        }

        let sanitized = self.into_clients();

        let status_code = sanitized.kind.http_status_code();
        let error_response = ErrorResponse {
            code: status_code.as_u16(),
            message: sanitized.kind.to_string(),
            error: sanitized.kind.name().to_string(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

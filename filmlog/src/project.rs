//! Projects.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::catalog::string_serde;
use crate::error::{FilmlogError, FilmlogResult};

/// The status of a project.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum ProjectStatus {
    #[default]
    Current,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = FilmlogError;

    fn from_str(s: &str) -> FilmlogResult<Self> {
        match s {
            "current" => Ok(Self::Current),
            "archived" => Ok(Self::Archived),
            _ => Err(FilmlogError::InvalidProjectStatus {
                status: s.to_owned(),
            }),
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

string_serde!(ProjectStatus);

//! Film catalog reference.
//!
//! The catalog (manufacturers, stocks and films) is maintained outside
//! of the roll workflow. The lifecycle engine only ever reads a
//! [`FilmProfile`] distilled from a film and its optional stock.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::{FilmlogError, FilmlogResult};

/// The physical format of a film or camera.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum FilmFormat {
    /// 35mm film.
    Format135,

    /// Medium format roll film.
    Format120,
}

/// The development process of a film.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum FilmType {
    /// C-41 color negative.
    C41,

    /// Black and white.
    BlackAndWhite,

    /// E-6 color reversal.
    E6,
}

/// What the lifecycle engine needs to know about a film.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilmProfile {
    /// The format of the film.
    pub format: FilmFormat,

    /// The process type.
    ///
    /// The stock's type wins over the film's own type.
    pub process: FilmType,

    /// The box speed.
    ///
    /// The stock's ISO wins over the film's own ISO.
    pub iso: i32,
}

/// A stock linked to a film.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockProfile {
    pub process: FilmType,
    pub iso: i32,
}

impl FilmFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Format135 => "135",
            Self::Format120 => "120",
        }
    }

    /// Returns the format as it appears in roll codes.
    ///
    /// 35mm film is abbreviated to "35".
    pub fn code_prefix(&self) -> &'static str {
        match self {
            Self::Format135 => "35",
            other => other.as_str(),
        }
    }

    /// Returns the human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Format135 => "35mm",
            Self::Format120 => "120",
        }
    }
}

impl FromStr for FilmFormat {
    type Err = FilmlogError;

    fn from_str(s: &str) -> FilmlogResult<Self> {
        match s {
            "135" => Ok(Self::Format135),
            "120" => Ok(Self::Format120),
            _ => Err(FilmlogError::InvalidFilmFormat {
                format: s.to_owned(),
            }),
        }
    }
}

impl Display for FilmFormat {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FilmType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C41 => "c41",
            Self::BlackAndWhite => "bw",
            Self::E6 => "e6",
        }
    }

    /// Returns the human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::C41 => "C41 Color",
            Self::BlackAndWhite => "Black and White",
            Self::E6 => "E6 Color Reversal",
        }
    }
}

impl FromStr for FilmType {
    type Err = FilmlogError;

    fn from_str(s: &str) -> FilmlogResult<Self> {
        match s {
            "c41" => Ok(Self::C41),
            "bw" => Ok(Self::BlackAndWhite),
            "e6" => Ok(Self::E6),
            _ => Err(FilmlogError::InvalidFilmType { kind: s.to_owned() }),
        }
    }
}

impl Display for FilmType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FilmProfile {
    /// Builds the profile of a film, preferring the properties of its stock.
    pub fn resolve(
        film_id: i64,
        format: FilmFormat,
        film_type: Option<FilmType>,
        film_iso: i32,
        stock: Option<StockProfile>,
    ) -> FilmlogResult<Self> {
        let process = stock
            .map(|s| s.process)
            .or(film_type)
            .ok_or(FilmlogError::MissingFilmType { film_id })?;
        let iso = stock.map(|s| s.iso).unwrap_or(film_iso);

        Ok(Self {
            format,
            process,
            iso,
        })
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                use ::serde::de::Error;
                let s = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <$ty as ::std::str::FromStr>::from_str(&s).map_err(|e| D::Error::custom(e.to_string()))
            }
        }
    };
}

pub(crate) use string_serde;

string_serde!(FilmFormat);
string_serde!(FilmType);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_prefix() {
        assert_eq!("35", FilmFormat::Format135.code_prefix());
        assert_eq!("120", FilmFormat::Format120.code_prefix());
    }

    #[test]
    fn test_stock_wins() {
        let stock = StockProfile {
            process: FilmType::E6,
            iso: 100,
        };

        let profile = FilmProfile::resolve(
            1,
            FilmFormat::Format120,
            Some(FilmType::C41),
            400,
            Some(stock),
        )
        .unwrap();
        assert_eq!(FilmType::E6, profile.process);
        assert_eq!(100, profile.iso);

        let profile =
            FilmProfile::resolve(1, FilmFormat::Format120, Some(FilmType::C41), 400, None).unwrap();
        assert_eq!(FilmType::C41, profile.process);
        assert_eq!(400, profile.iso);

        let err = FilmProfile::resolve(7, FilmFormat::Format135, None, 400, None).unwrap_err();
        assert_eq!(FilmlogError::MissingFilmType { film_id: 7 }, err);
    }

    #[test]
    fn test_serde() {
        assert_eq!(
            FilmType::BlackAndWhite,
            serde_json::from_str::<FilmType>("\"bw\"").unwrap()
        );
        assert_eq!(
            "\"135\"",
            serde_json::to_string(&FilmFormat::Format135).unwrap()
        );
        serde_json::from_str::<FilmFormat>("\"110\"").unwrap_err();
    }
}

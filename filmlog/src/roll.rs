//! Rolls of film.
//!
//! ## Status
//!
//! A roll moves through `storage → loaded → shot → processing →
//! processed → scanned → archived`. In storage each status carries a
//! two-digit prefix (e.g., `02_loaded`) so that sorting by the stored
//! value sorts by lifecycle order.
//!
//! ## Codes
//!
//! A roll receives a code the first time it is started, in the format
//! `{format}-{type}-{sequence}` (e.g., `35-c41-12`). The sequence counts
//! the owner's rolls of the same format and type started in the same
//! calendar year.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::catalog::{string_serde, FilmFormat, FilmProfile, FilmType};
use crate::error::{FilmlogError, FilmlogResult};

lazy_static! {
    static ref ROLL_CODE_REGEX: Regex = Regex::new(r"^(35|120)-(c41|bw|e6)-([1-9][0-9]{0,8})$").unwrap();
}

/// The status of a roll.
///
/// The variants are declared in lifecycle order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum RollStatus {
    /// Not yet loaded into a camera.
    #[default]
    Storage,

    /// Loaded into a camera.
    Loaded,

    /// Fully exposed and taken out of the camera.
    Shot,

    /// At the lab or in the tank.
    Processing,

    /// Developed.
    Processed,

    /// Developed and scanned.
    Scanned,

    /// Filed away.
    Archived,
}

/// Push or pull processing.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum PushPull {
    /// Processed at box speed.
    #[default]
    None,

    /// Pulled 2 stops.
    Pull2,

    /// Pulled 1 stop.
    Pull1,

    /// Pushed 1 stop.
    Push1,

    /// Pushed 2 stops.
    Push2,

    /// Pushed 3 stops.
    Push3,
}

/// A generated roll code.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct RollCode {
    pub format: FilmFormat,
    pub process: FilmType,
    pub sequence: u32,
}

/// The lifecycle-relevant fields of a roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollState {
    /// ID of the roll.
    pub id: i64,

    /// The status.
    pub status: RollStatus,

    /// The roll code.
    ///
    /// Empty until the roll is started.
    pub code: String,

    /// Push/pull processing.
    pub push_pull: PushPull,

    /// ID of the camera the roll is in.
    pub camera: Option<i64>,

    /// ID of the camera back the roll is in.
    pub camera_back: Option<i64>,

    /// Date the roll was loaded.
    pub started_on: Option<NaiveDate>,

    /// Date the roll was finished.
    pub ended_on: Option<NaiveDate>,
}

impl RollStatus {
    pub const ALL: [Self; 7] = [
        Self::Storage,
        Self::Loaded,
        Self::Shot,
        Self::Processing,
        Self::Processed,
        Self::Scanned,
        Self::Archived,
    ];

    /// Returns the bare name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Loaded => "loaded",
            Self::Shot => "shot",
            Self::Processing => "processing",
            Self::Processed => "processed",
            Self::Scanned => "scanned",
            Self::Archived => "archived",
        }
    }

    /// Returns the prefixed form used in storage.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            Self::Storage => "01_storage",
            Self::Loaded => "02_loaded",
            Self::Shot => "03_shot",
            Self::Processing => "04_processing",
            Self::Processed => "05_processed",
            Self::Scanned => "06_scanned",
            Self::Archived => "07_archived",
        }
    }

    /// Returns whether the roll has been taken out of its camera.
    pub fn is_finished(&self) -> bool {
        *self >= Self::Shot
    }
}

impl FromStr for RollStatus {
    type Err = FilmlogError;

    /// Parses either the bare name or the prefixed form.
    fn from_str(s: &str) -> FilmlogResult<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s || status.as_db_str() == s)
            .ok_or_else(|| FilmlogError::InvalidRollStatus {
                status: s.to_owned(),
            })
    }
}

impl Display for RollStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

string_serde!(RollStatus);

impl PushPull {
    /// Rational ISO multipliers as (numerator, denominator).
    const MULTIPLIERS: [(Self, i32, i32); 6] = [
        (Self::None, 1, 1),
        (Self::Pull2, 1, 4),
        (Self::Pull1, 1, 2),
        (Self::Push1, 2, 1),
        (Self::Push2, 4, 1),
        (Self::Push3, 8, 1),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Pull2 => "-2",
            Self::Pull1 => "-1",
            Self::Push1 => "+1",
            Self::Push2 => "+2",
            Self::Push3 => "+3",
        }
    }

    /// Returns the ISO multiplier as (numerator, denominator).
    pub fn multiplier(&self) -> (i32, i32) {
        Self::MULTIPLIERS
            .iter()
            .find(|(pp, _, _)| pp == self)
            .map(|(_, num, den)| (*num, *den))
            .unwrap_or((1, 1))
    }

    /// Adjusts a box speed.
    ///
    /// Pulls round down.
    pub fn apply(&self, iso: i32) -> i32 {
        let (num, den) = self.multiplier();
        iso.saturating_mul(num).div_euclid(den)
    }
}

impl FromStr for PushPull {
    type Err = FilmlogError;

    /// Parses a push/pull value.
    ///
    /// `"0"` is accepted and means no push or pull.
    fn from_str(s: &str) -> FilmlogResult<Self> {
        match s {
            "" | "0" => Ok(Self::None),
            "-2" => Ok(Self::Pull2),
            "-1" => Ok(Self::Pull1),
            "+1" => Ok(Self::Push1),
            "+2" => Ok(Self::Push2),
            "+3" => Ok(Self::Push3),
            _ => Err(FilmlogError::InvalidPushPull {
                value: s.to_owned(),
            }),
        }
    }
}

impl Display for PushPull {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

string_serde!(PushPull);

impl RollCode {
    pub fn new(profile: &FilmProfile, sequence: u32) -> Self {
        Self {
            format: profile.format,
            process: profile.process,
            sequence,
        }
    }
}

impl FromStr for RollCode {
    type Err = FilmlogError;

    fn from_str(s: &str) -> FilmlogResult<Self> {
        let invalid = || FilmlogError::InvalidRollCode { code: s.to_owned() };
        let captures = ROLL_CODE_REGEX.captures(s).ok_or_else(invalid)?;

        let format = match &captures[1] {
            "35" => FilmFormat::Format135,
            other => FilmFormat::from_str(other)?,
        };
        let process = FilmType::from_str(&captures[2])?;
        let sequence = captures[3].parse().map_err(|_| invalid())?;

        Ok(Self {
            format,
            process,
            sequence,
        })
    }
}

impl Display for RollCode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.format.code_prefix(),
            self.process,
            self.sequence
        )
    }
}

impl RollState {
    /// Returns a fresh roll in storage.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            status: RollStatus::Storage,
            code: String::new(),
            push_pull: PushPull::None,
            camera: None,
            camera_back: None,
            started_on: None,
            ended_on: None,
        }
    }

    /// Returns whether the next save will assign a code.
    pub fn needs_code(&self) -> bool {
        self.code.is_empty() && self.started_on.is_some()
    }

    /// Returns the speed the roll is exposed and developed at.
    pub fn effective_iso(&self, film: &FilmProfile) -> i32 {
        self.push_pull.apply(film.iso)
    }

    /// Checks the rules a caller must satisfy before saving.
    pub fn validate(&self) -> FilmlogResult<()> {
        if self.status != RollStatus::Storage && self.started_on.is_none() {
            return Err(FilmlogError::MissingStartDate {
                status: self.status.as_str(),
            });
        }

        if self.camera_back.is_some() && self.camera.is_none() {
            return Err(FilmlogError::CameraBackWithoutCamera);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_order() {
        let mut prefixed: Vec<&str> = RollStatus::ALL.iter().map(|s| s.as_db_str()).collect();
        prefixed.reverse();
        prefixed.sort();

        let parsed: Vec<RollStatus> = prefixed
            .into_iter()
            .map(|s| RollStatus::from_str(s).unwrap())
            .collect();
        assert_eq!(RollStatus::ALL.to_vec(), parsed);

        assert!(RollStatus::Storage < RollStatus::Loaded);
        assert!(RollStatus::Scanned < RollStatus::Archived);
        assert!(RollStatus::Shot.is_finished());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(RollStatus::Shot, RollStatus::from_str("shot").unwrap());
        assert_eq!(RollStatus::Shot, RollStatus::from_str("03_shot").unwrap());
        RollStatus::from_str("03_loaded").unwrap_err();
        RollStatus::from_str("").unwrap_err();

        assert_eq!(
            RollStatus::Archived,
            serde_json::from_str::<RollStatus>("\"07_archived\"").unwrap()
        );
    }

    #[test]
    fn test_push_pull_zero() {
        assert_eq!(PushPull::None, PushPull::from_str("0").unwrap());
        assert_eq!("", PushPull::from_str("0").unwrap().as_str());
        PushPull::from_str("+4").unwrap_err();
        PushPull::from_str("2").unwrap_err();
    }

    #[test]
    fn test_effective_iso() {
        assert_eq!(400, PushPull::None.apply(400));
        assert_eq!(1600, PushPull::Push2.apply(400));
        assert_eq!(800, PushPull::Push1.apply(400));
        assert_eq!(3200, PushPull::Push3.apply(400));
        assert_eq!(200, PushPull::Pull1.apply(400));

        // Pulls round down
        assert_eq!(12, PushPull::Pull1.apply(25));
        assert_eq!(6, PushPull::Pull2.apply(25));
        assert_eq!(0, PushPull::Pull2.apply(3));

        let film = FilmProfile {
            format: FilmFormat::Format135,
            process: FilmType::C41,
            iso: 400,
        };
        let mut roll = RollState::new(1);
        assert_eq!(400, roll.effective_iso(&film));
        roll.push_pull = PushPull::Push2;
        assert_eq!(1600, roll.effective_iso(&film));
    }

    #[test]
    fn test_roll_code() {
        let code = RollCode {
            format: FilmFormat::Format135,
            process: FilmType::E6,
            sequence: 2,
        };
        assert_eq!("35-e6-2", code.to_string());
        assert_eq!(code, RollCode::from_str("35-e6-2").unwrap());

        let code = RollCode::from_str("120-bw-14").unwrap();
        assert_eq!(FilmFormat::Format120, code.format);
        assert_eq!(FilmType::BlackAndWhite, code.process);
        assert_eq!(14, code.sequence);

        let bad_codes = vec!["", "135-c41-1", "35-c41-0", "35-k14-1", "35-c41-", "35-c41-01"];
        for code in bad_codes {
            RollCode::from_str(code).unwrap_err();
        }
    }

    #[test]
    fn test_validate() {
        let mut roll = RollState::new(1);
        roll.validate().unwrap();

        roll.status = RollStatus::Shot;
        assert_eq!(
            FilmlogError::MissingStartDate { status: "shot" },
            roll.validate().unwrap_err()
        );

        roll.started_on = NaiveDate::from_ymd_opt(2023, 5, 1);
        roll.validate().unwrap();

        roll.camera_back = Some(3);
        assert_eq!(
            FilmlogError::CameraBackWithoutCamera,
            roll.validate().unwrap_err()
        );
    }
}

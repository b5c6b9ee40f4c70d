//! Cameras and camera backs.
//!
//! Equipment has no behavior of its own. Its status only changes when a
//! user edits it directly or when the lifecycle engine loads or unloads
//! a roll.
//!
//! ## Occupancy
//!
//! Besides the status, every piece of equipment records which roll it is
//! loaded with. A roll only ever unloads equipment that it occupies, so a
//! roll that finishes on a camera that has since been reloaded with
//! another roll leaves the camera alone.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::catalog::string_serde;
use crate::error::{FilmlogError, FilmlogResult};

/// The availability of a camera or camera back.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum EquipmentStatus {
    /// Ready to be loaded.
    #[default]
    Empty,

    /// Loaded with a roll.
    Loaded,

    /// Out for repair, lent out, etc.
    Unavailable,
}

/// The lifecycle-relevant state of a camera or camera back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipmentState {
    /// ID of the camera or camera back.
    pub id: i64,

    /// The status.
    pub status: EquipmentStatus,

    /// ID of the roll the equipment is loaded with.
    pub loaded_roll: Option<i64>,

    /// Whether the equipment is shared between several rolls.
    ///
    /// This is the case for cameras with multiple backs, where the
    /// backs are tracked individually and the camera itself does not
    /// gate loading.
    pub shared: bool,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loaded => "loaded",
            Self::Unavailable => "unavailable",
        }
    }
}

impl FromStr for EquipmentStatus {
    type Err = FilmlogError;

    fn from_str(s: &str) -> FilmlogResult<Self> {
        match s {
            "empty" => Ok(Self::Empty),
            "loaded" => Ok(Self::Loaded),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(FilmlogError::InvalidEquipmentStatus {
                status: s.to_owned(),
            }),
        }
    }
}

impl Display for EquipmentStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

string_serde!(EquipmentStatus);

impl EquipmentState {
    /// Sets the status directly.
    ///
    /// Any status other than `Loaded` also forgets the occupying roll.
    pub fn set_status(&mut self, status: EquipmentStatus) {
        self.status = status;

        if status != EquipmentStatus::Loaded {
            self.loaded_roll = None;
        }
    }

    /// Returns whether the equipment is loaded with a specific roll.
    pub fn is_occupied_by(&self, roll_id: i64) -> bool {
        self.status == EquipmentStatus::Loaded && self.loaded_roll == Some(roll_id)
    }

    /// Returns the roll other than `roll_id` that occupies the equipment.
    pub fn other_occupant(&self, roll_id: i64) -> Option<i64> {
        match self.loaded_roll {
            Some(other) if other != roll_id && self.status == EquipmentStatus::Loaded => {
                Some(other)
            }
            _ => None,
        }
    }

    /// Loads a roll if the equipment is empty.
    ///
    /// Returns whether anything changed.
    pub fn load(&mut self, roll_id: i64) -> bool {
        if self.status == EquipmentStatus::Empty {
            self.status = EquipmentStatus::Loaded;
            self.loaded_roll = Some(roll_id);
            true
        } else {
            false
        }
    }

    /// Unloads a roll if the equipment is loaded with it.
    ///
    /// Returns whether anything changed.
    pub fn unload(&mut self, roll_id: i64) -> bool {
        if self.is_occupied_by(roll_id) {
            self.status = EquipmentStatus::Empty;
            self.loaded_roll = None;
            true
        } else {
            false
        }
    }
}

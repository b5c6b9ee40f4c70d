//! The roll lifecycle state machine.
//!
//! Every time a roll is saved, its caller-supplied fields are run through
//! [`transition`] together with the camera and camera back it refers to.
//! The result is the final state of all three records, which the caller
//! must then persist as a single unit.
//!
//! The rules run in a fixed order:
//!
//! 1. A roll without a code that has a start date receives a code. If it
//!    was in storage, it is promoted to `loaded`.
//! 2. A coded roll past `loaded` without an end date is finished: the
//!    equipment it occupies is unloaded and the end date is set to today.
//! 3. A `loaded` roll loads its equipment if it is empty, and loses its
//!    end date (a roll moved back from `shot` is in the camera again).
//! 4. A coded roll moved back to `storage` is reset: it leaves its
//!    equipment and loses its code, push/pull and dates.
//!
//! Because rule 1 can promote a roll before rule 3 runs, a roll that is
//! started for the first time is loaded into its camera by the same save.
//!
//! The transition is idempotent. Saving its output again without changes
//! yields the same output and no events.


use chrono::NaiveDate;
use displaydoc::Display;

use crate::catalog::FilmProfile;
use crate::equipment::EquipmentState;
use crate::error::{FilmlogError, FilmlogResult};
use crate::roll::{PushPull, RollCode, RollState, RollStatus};

/// Context of a save.
#[derive(Debug, Clone, Copy)]
pub struct SaveContext {
    /// The film the roll is of.
    pub film: FilmProfile,

    /// The current date.
    pub today: NaiveDate,

    /// The sequence number for a new code.
    ///
    /// This is only consulted if the roll is about to receive a code
    /// (see [`RollState::needs_code`]).
    pub sequence: Option<u32>,

    /// Where the roll was loaded before the save.
    ///
    /// Occupancy conflicts are only raised for equipment the roll is
    /// entering. Equipment it already sits in is left alone even if it
    /// has since been handed to another roll.
    pub loaded_in: Placement,
}

/// The equipment a loaded roll sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub camera: Option<i64>,
    pub camera_back: Option<i64>,
}

/// The outcome of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The final state of the roll.
    pub roll: RollState,

    /// The final state of the camera.
    ///
    /// This is returned even if the roll was detached from it.
    pub camera: Option<EquipmentState>,

    /// The final state of the camera back.
    ///
    /// This is returned even if the roll was detached from it.
    pub camera_back: Option<EquipmentState>,

    /// What happened.
    pub events: Vec<LifecycleEvent>,
}

/// A side effect of a save.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Assigned code {code}
    CodeAssigned { code: String },

    /// Promoted from storage to loaded
    Promoted,

    /// Loaded camera {camera_id}
    CameraLoaded { camera_id: i64 },

    /// Unloaded camera {camera_id}
    CameraUnloaded { camera_id: i64 },

    /// Loaded camera back {camera_back_id}
    CameraBackLoaded { camera_back_id: i64 },

    /// Unloaded camera back {camera_back_id}
    CameraBackUnloaded { camera_back_id: i64 },

    /// Finished on {date}
    Ended { date: NaiveDate },

    /// Reopened
    Reopened,

    /// Reset to storage
    Reset,
}

impl Placement {
    /// Returns where a roll is loaded, if it is loaded at all.
    pub fn of(roll: &RollState) -> Self {
        if roll.status == RollStatus::Loaded {
            Self {
                camera: roll.camera,
                camera_back: roll.camera_back,
            }
        } else {
            Self::default()
        }
    }
}

/// Runs the lifecycle rules on a roll that is about to be saved.
///
/// `camera` and `camera_back` must be the equipment that `roll.camera`
/// and `roll.camera_back` refer to.
///
/// The only failures are an occupancy conflict when entering equipment
/// that holds a different roll, and a missing sequence number when the roll
/// needs a code.
pub fn transition(
    roll: RollState,
    camera: Option<EquipmentState>,
    camera_back: Option<EquipmentState>,
    context: &SaveContext,
) -> FilmlogResult<Transition> {
    let mut t = Transition {
        roll,
        camera,
        camera_back,
        events: Vec::new(),
    };

    t.assign_code(context)?;
    t.finish(context.today);
    t.load(context.loaded_in)?;
    t.reset();

    Ok(t)
}

/// Releases equipment a roll no longer refers to.
///
/// Used when a caller moves a roll to a different camera or back.
/// Returns whether the equipment changed.
pub fn release(equipment: &mut EquipmentState, roll_id: i64) -> bool {
    equipment.unload(roll_id)
}

impl Transition {
    /// Returns whether anything happened.
    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }

    fn assign_code(&mut self, context: &SaveContext) -> FilmlogResult<()> {
        if !self.roll.needs_code() {
            return Ok(());
        }

        let sequence = context.sequence.ok_or(FilmlogError::MissingCodeSequence)?;
        let code = RollCode::new(&context.film, sequence).to_string();

        self.roll.code = code.clone();
        self.events.push(LifecycleEvent::CodeAssigned { code });

        if self.roll.status == RollStatus::Storage {
            self.roll.status = RollStatus::Loaded;
            self.events.push(LifecycleEvent::Promoted);
        }

        Ok(())
    }

    fn finish(&mut self, today: NaiveDate) {
        let roll = &mut self.roll;

        if roll.code.is_empty() || !roll.status.is_finished() || roll.ended_on.is_some() {
            return;
        }

        if let Some(camera) = self.camera.as_mut() {
            if camera.unload(roll.id) {
                self.events.push(LifecycleEvent::CameraUnloaded {
                    camera_id: camera.id,
                });
            }
        }

        if let Some(back) = self.camera_back.as_mut() {
            if back.unload(roll.id) {
                self.events.push(LifecycleEvent::CameraBackUnloaded {
                    camera_back_id: back.id,
                });
            }
        }

        roll.ended_on = Some(today);
        self.events.push(LifecycleEvent::Ended { date: today });
    }

    fn load(&mut self, loaded_in: Placement) -> FilmlogResult<()> {
        let roll = &mut self.roll;

        if roll.status != RollStatus::Loaded {
            return Ok(());
        }

        if let Some(camera) = self.camera.as_mut() {
            if !camera.shared && loaded_in.camera != Some(camera.id) {
                if let Some(other) = camera.other_occupant(roll.id) {
                    return Err(FilmlogError::CameraOccupied { roll_id: other });
                }
            }

            if camera.load(roll.id) {
                self.events.push(LifecycleEvent::CameraLoaded {
                    camera_id: camera.id,
                });
            }
        }

        if let Some(back) = self.camera_back.as_mut() {
            if loaded_in.camera_back != Some(back.id) {
                if let Some(other) = back.other_occupant(roll.id) {
                    return Err(FilmlogError::CameraBackOccupied { roll_id: other });
                }
            }

            if back.load(roll.id) {
                self.events.push(LifecycleEvent::CameraBackLoaded {
                    camera_back_id: back.id,
                });
            }
        }

        if roll.ended_on.take().is_some() {
            self.events.push(LifecycleEvent::Reopened);
        }

        Ok(())
    }

    fn reset(&mut self) {
        let roll = &mut self.roll;

        if roll.code.is_empty() || roll.status != RollStatus::Storage {
            return;
        }

        if let Some(camera) = self.camera.as_mut() {
            if camera.unload(roll.id) {
                self.events.push(LifecycleEvent::CameraUnloaded {
                    camera_id: camera.id,
                });
            }
        }

        if let Some(back) = self.camera_back.as_mut() {
            if back.unload(roll.id) {
                self.events.push(LifecycleEvent::CameraBackUnloaded {
                    camera_back_id: back.id,
                });
            }
        }

        roll.camera = None;
        roll.camera_back = None;
        roll.code.clear();
        roll.push_pull = PushPull::None;
        roll.started_on = None;
        roll.ended_on = None;

        self.events.push(LifecycleEvent::Reset);
    }
}

//! Journal entries and frames.
//!
//! A journal entry records the last frame shot on a given day. The first
//! frame of the day is derived from the previous entry of the same roll.

use std::ops::RangeInclusive;

use chrono::NaiveDate;

use crate::error::{FilmlogError, FilmlogResult};

/// The maximum number of frames that can be created at once.
pub const MAX_FRAME_RANGE: i32 = 250;

/// A range of frame numbers sharing the same metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    start: i32,
    end: i32,
}

/// Returns the first frame of a journal entry given the entry before it.
pub fn starting_frame(previous_frame: Option<i32>) -> i32 {
    match previous_frame {
        Some(frame) => frame.saturating_add(1),
        None => 1,
    }
}

/// Pairs journal entries with their starting frames.
///
/// The entries are returned in ascending date order.
pub fn with_starting_frames<T, D, F>(mut entries: Vec<T>, date: D, frame: F) -> Vec<(T, i32)>
where
    D: Fn(&T) -> NaiveDate,
    F: Fn(&T) -> i32,
{
    entries.sort_by_key(|entry| date(entry));

    let mut previous = None;
    entries
        .into_iter()
        .map(|entry| {
            let starting = starting_frame(previous);
            previous = Some(frame(&entry));
            (entry, starting)
        })
        .collect()
}

impl FrameRange {
    /// Creates a range from a starting and an optional ending frame.
    pub fn new(start: i32, end: Option<i32>) -> FilmlogResult<Self> {
        if start < 1 {
            return Err(FilmlogError::InvalidFrameNumber { number: start });
        }

        let end = end.unwrap_or(start);

        if end < start {
            return Err(FilmlogError::InvalidFrameRange {
                start,
                end,
                reason: "the ending frame comes before the starting frame",
            });
        }

        if end - start >= MAX_FRAME_RANGE {
            return Err(FilmlogError::InvalidFrameRange {
                start,
                end,
                reason: "too many frames",
            });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    /// Returns the number of frames.
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// Returns whether the range holds no frames.
    ///
    /// This is never the case: [`FrameRange::new`] rejects an ending frame
    /// before the starting frame, so a range holds at least one frame.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn numbers(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

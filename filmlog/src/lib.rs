//! The Filmlog Library.
//!
//! Domain types shared between the server and its callers, plus the
//! pure parts of the roll workflow: the lifecycle state machine and the
//! journal frame sequencer.

#![deny(
    asm_sub_register,
    deprecated,
    missing_abi,
    unsafe_code,
    unused_macros,
    unused_must_use,
    unused_unsafe
)]
#![deny(clippy::from_over_into, clippy::needless_question_mark)]
#![cfg_attr(
    not(debug_assertions),
    deny(unused_imports, unused_mut, unused_variables,)
)]

pub mod api;
pub mod catalog;
pub mod equipment;
pub mod error;
pub mod journal;
pub mod lifecycle;
pub mod project;
pub mod roll;

pub use error::{FilmlogError, FilmlogResult};

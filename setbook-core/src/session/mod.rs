//! Session module for composing a workout before it is saved.
//!
//! A [`Draft`] is a plain value. Every editing operation borrows the current
//! draft and returns a new one, so the caller's previous value stays intact
//! and a UI layer can keep it around for undo or diffing.

mod draft;
mod sets;
pub mod summary;
mod validate;
mod workout;

pub use draft::{Draft, DraftExercise, DraftSet, SetField};

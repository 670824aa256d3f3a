pub mod db;
pub mod error;
pub mod logging;
pub mod session;

pub use db::WorkoutStore;
pub use db::models::{Exercise, Set, Workout};
pub use error::{DraftError, StoreError, ValidationError};
pub use session::{Draft, DraftExercise, DraftSet, SetField};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
#[cfg(feature = "uniffi")]
mod runtime;
#[cfg(feature = "uniffi")]
pub mod uniffi_interface;

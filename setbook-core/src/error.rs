//! Error taxonomy for the store, the draft model and save-time validation.

use thiserror::Error;

/// Failures talking to the key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Enumerating or reading records failed. Listing callers show "no workouts".
    #[error("workout store unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),

    /// A save or delete did not go through. The caller keeps its draft and may retry.
    #[error("failed to write workout {id}: {source}")]
    Write {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    /// A single stored record could not be decoded.
    #[error("stored record {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejected mutation of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("no exercise with id {0} in this workout")]
    UnknownExercise(String),

    #[error("set {index} out of range for exercise {exercise_id} ({len} sets)")]
    SetIndexOutOfRange {
        exercise_id: String,
        index: usize,
        len: usize,
    },
}

/// First rule a draft breaks when it is checked for saving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please add at least one exercise")]
    NoExercises,

    #[error("Please enter exercise name")]
    MissingExerciseName { exercise_index: usize },

    #[error("Please add at least one set to {exercise}")]
    NoSets { exercise: String },

    #[error("Reps must be greater than 0 ({exercise}, set {})", .set_index + 1)]
    InvalidReps {
        exercise: String,
        set_index: usize,
        value: String,
    },

    #[error("Weight must be 0 or greater ({exercise}, set {})", .set_index + 1)]
    InvalidWeight {
        exercise: String,
        set_index: usize,
        value: String,
    },
}

//! Save-time checks that turn a [`Draft`] into a [`Workout`].

use crate::db::models::{Exercise, Set, Workout};
use crate::error::ValidationError;
use crate::session::draft::{Draft, DraftSet};

impl Draft {
    /// Check the draft and build the record to persist.
    ///
    /// Exercises are checked in order, and within each exercise its sets in
    /// order; the first broken rule is returned. The draft itself is never
    /// modified, so a failed save can be corrected and retried.
    pub fn validate_for_save(&self) -> Result<Workout, ValidationError> {
        if self.exercises.is_empty() {
            return Err(ValidationError::NoExercises);
        }

        let mut exercises = Vec::with_capacity(self.exercises.len());
        for (exercise_index, exercise) in self.exercises.iter().enumerate() {
            let name = exercise.name.trim();
            if name.is_empty() {
                return Err(ValidationError::MissingExerciseName { exercise_index });
            }
            if exercise.sets.is_empty() {
                return Err(ValidationError::NoSets {
                    exercise: name.to_string(),
                });
            }

            let sets = exercise
                .sets
                .iter()
                .enumerate()
                .map(|(set_index, set)| validate_set(name, set_index, set))
                .collect::<Result<Vec<_>, _>>()?;

            exercises.push(Exercise::new(exercise.id.clone(), name.to_string(), sets));
        }

        Ok(Workout::new(self.id.clone(), self.date, exercises))
    }
}

fn validate_set(exercise: &str, set_index: usize, set: &DraftSet) -> Result<Set, ValidationError> {
    let reps = parse_reps(&set.reps).ok_or_else(|| ValidationError::InvalidReps {
        exercise: exercise.to_string(),
        set_index,
        value: set.reps.clone(),
    })?;

    let weight = set.weight.trim();
    let weight = if weight.is_empty() {
        None
    } else {
        Some(
            parse_weight(weight).ok_or_else(|| ValidationError::InvalidWeight {
                exercise: exercise.to_string(),
                set_index,
                value: set.weight.clone(),
            })?,
        )
    };

    Ok(Set { reps, weight })
}

fn parse_reps(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|reps| *reps > 0)
}

fn parse_weight(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite() && *weight >= 0.0)
        // "-0" is stored and shown as 0.
        .map(|weight| if weight == 0.0 { 0.0 } else { weight })
}

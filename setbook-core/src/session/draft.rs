use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::db::models::{ExerciseId, Workout, WorkoutId};

/// Workout under edit. Held only in memory until it passes
/// [`Draft::validate_for_save`].
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub id: WorkoutId,
    pub date: DateTime<Utc>,
    pub exercises: Vec<DraftExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftExercise {
    pub id: ExerciseId,
    pub name: String,
    pub sets: Vec<DraftSet>,
}

/// Raw text as typed. An empty string means the field is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftSet {
    pub reps: String,
    pub weight: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Reps,
    Weight,
}

impl fmt::Display for SetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetField::Reps => write!(f, "reps"),
            SetField::Weight => write!(f, "weight"),
        }
    }
}

impl FromStr for SetField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reps" => Ok(SetField::Reps),
            "weight" => Ok(SetField::Weight),
            other => Err(format!("unknown set field: {}", other)),
        }
    }
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Draft {
    /// Start an empty draft dated `now`. The id is fixed from here on so UI
    /// keys stay stable before the first save.
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            date: now,
            exercises: Vec::new(),
        }
    }

    /// Reopen a saved workout for a full rewrite under the same id.
    pub fn from_workout(workout: &Workout) -> Self {
        Self {
            id: workout.id().to_string(),
            date: workout.date(),
            exercises: workout
                .exercises()
                .iter()
                .map(|e| DraftExercise {
                    id: e.id().to_string(),
                    name: e.name().to_string(),
                    sets: e
                        .sets()
                        .iter()
                        .map(|s| DraftSet {
                            reps: s.reps.to_string(),
                            weight: s.weight.map(|w| w.to_string()).unwrap_or_default(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_assigns_fresh_ids() {
        let now = Utc::now();
        let a = Draft::start(now);
        let b = Draft::start(now);

        assert_ne!(a.id, b.id);
        assert_eq!(a.date, now);
        assert!(a.is_empty());
    }

    #[test]
    fn set_field_parses_case_insensitively() {
        assert_eq!("Reps".parse::<SetField>(), Ok(SetField::Reps));
        assert_eq!("weight".parse::<SetField>(), Ok(SetField::Weight));
        assert!("rpe".parse::<SetField>().is_err());
    }

    #[test]
    fn from_workout_keeps_ids_and_renders_values() {
        let draft = Draft::start(Utc::now()).add_exercise();
        let exercise_id = draft.exercises[0].id.clone();
        let draft = draft
            .rename_exercise(&exercise_id, "Dips")
            .and_then(|d| d.update_set_field(&exercise_id, 0, SetField::Reps, "12"))
            .and_then(|d| d.add_set(&exercise_id))
            .and_then(|d| d.update_set_field(&exercise_id, 1, SetField::Reps, "10"))
            .and_then(|d| d.update_set_field(&exercise_id, 1, SetField::Weight, "7.5"))
            .unwrap();
        let workout = draft.validate_for_save().unwrap();

        let reopened = Draft::from_workout(&workout);
        assert_eq!(reopened.id, draft.id);
        assert_eq!(reopened.exercises[0].id, exercise_id);
        assert_eq!(
            reopened.exercises[0].sets,
            vec![
                DraftSet {
                    reps: "12".into(),
                    weight: String::new()
                },
                DraftSet {
                    reps: "10".into(),
                    weight: "7.5".into()
                },
            ]
        );
        assert_eq!(reopened.validate_for_save().unwrap(), workout);
    }
}

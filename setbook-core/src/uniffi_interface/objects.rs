use chrono::{DateTime, Utc};

use crate::db::models::{Exercise, Set, Workout};
use crate::session::{Draft, DraftExercise, DraftSet, SetField, summary};
use crate::uniffi_interface::errors::SetbookError;

#[derive(Debug, Clone, uniffi::Enum)]
pub enum SetFieldKind {
    Reps,
    Weight,
}

impl From<SetFieldKind> for SetField {
    fn from(kind: SetFieldKind) -> Self {
        match kind {
            SetFieldKind::Reps => SetField::Reps,
            SetFieldKind::Weight => SetField::Weight,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct DraftSetRecord {
    pub reps: String,
    pub weight: String,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct DraftExerciseRecord {
    pub id: String,
    pub name: String,
    pub sets: Vec<DraftSetRecord>,
}

/// Draft as handed across the boundary. `date` is RFC 3339.
#[derive(Debug, Clone, uniffi::Record)]
pub struct DraftRecord {
    pub id: String,
    pub date: String,
    pub exercises: Vec<DraftExerciseRecord>,
}

impl From<Draft> for DraftRecord {
    fn from(d: Draft) -> Self {
        DraftRecord {
            id: d.id,
            date: d.date.to_rfc3339(),
            exercises: d
                .exercises
                .into_iter()
                .map(|e| DraftExerciseRecord {
                    id: e.id,
                    name: e.name,
                    sets: e
                        .sets
                        .into_iter()
                        .map(|s| DraftSetRecord {
                            reps: s.reps,
                            weight: s.weight,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl TryFrom<DraftRecord> for Draft {
    type Error = SetbookError;

    fn try_from(r: DraftRecord) -> Result<Self, SetbookError> {
        Ok(Draft {
            id: r.id,
            date: parse_date(&r.date)?,
            exercises: r
                .exercises
                .into_iter()
                .map(|e| DraftExercise {
                    id: e.id,
                    name: e.name,
                    sets: e
                        .sets
                        .into_iter()
                        .map(|s| DraftSet {
                            reps: s.reps,
                            weight: s.weight,
                        })
                        .collect(),
                })
                .collect(),
        })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<DateTime<Utc>, SetbookError> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct SetRecord {
    pub reps: u32,
    pub weight: Option<f64>,
}

impl From<&Set> for SetRecord {
    fn from(s: &Set) -> Self {
        SetRecord {
            reps: s.reps,
            weight: s.weight,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct ExerciseRecord {
    pub id: String,
    pub name: String,
    pub sets: Vec<SetRecord>,
}

impl From<&Exercise> for ExerciseRecord {
    fn from(e: &Exercise) -> Self {
        ExerciseRecord {
            id: e.id().to_string(),
            name: e.name().to_string(),
            sets: e.sets().iter().map(SetRecord::from).collect(),
        }
    }
}

/// Saved workout plus the labels the list view shows.
#[derive(Debug, Clone, uniffi::Record)]
pub struct WorkoutRecord {
    pub id: String,
    pub date: String,
    pub date_label: String,
    pub exercise_count_label: String,
    pub exercises: Vec<ExerciseRecord>,
}

impl From<&Workout> for WorkoutRecord {
    fn from(w: &Workout) -> Self {
        WorkoutRecord {
            id: w.id().to_string(),
            date: w.date().to_rfc3339(),
            date_label: summary::format_date(w.date()),
            exercise_count_label: summary::exercise_count_label(w.exercises().len()),
            exercises: w.exercises().iter().map(ExerciseRecord::from).collect(),
        }
    }
}

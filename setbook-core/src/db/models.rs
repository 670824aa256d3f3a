use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::session::{Draft, DraftExercise, DraftSet};

pub type WorkoutId = String;
pub type ExerciseId = String;

// Workout models

/// A validated training session, the only shape [`WorkoutStore`](crate::db::WorkoutStore)
/// writes. Built by `validate_for_save` or decoded (and re-validated) from the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "StoredWorkout")]
pub struct Workout {
    id: WorkoutId,
    date: DateTime<Utc>,
    exercises: Vec<Exercise>,
}

impl Workout {
    pub(crate) fn new(id: WorkoutId, date: DateTime<Utc>, exercises: Vec<Exercise>) -> Self {
        Self {
            id,
            date,
            exercises,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    id: ExerciseId,
    name: String,
    sets: Vec<Set>,
}

impl Exercise {
    pub(crate) fn new(id: ExerciseId, name: String, sets: Vec<Set>) -> Self {
        Self { id, name, sets }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }
}

// Set models
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub reps: u32,
    pub weight: Option<f64>,
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            Some(weight) => write!(f, "{} reps × {} kg", self.reps, weight),
            None => write!(f, "{} reps", self.reps),
        }
    }
}

// Stored shapes. Records written by earlier versions of the app kept reps and
// weight as the raw text typed by the user, so both numbers and strings decode.

#[derive(Deserialize)]
struct StoredWorkout {
    id: WorkoutId,
    date: DateTime<Utc>,
    exercises: Vec<StoredExercise>,
}

#[derive(Deserialize)]
struct StoredExercise {
    id: ExerciseId,
    name: String,
    sets: Vec<StoredSet>,
}

#[derive(Deserialize)]
struct StoredSet {
    reps: StoredField,
    #[serde(default)]
    weight: StoredField,
}

#[derive(Deserialize, Default)]
#[serde(untagged)]
enum StoredField {
    Integer(i64),
    Float(f64),
    Text(String),
    #[default]
    Null,
}

impl StoredField {
    /// Reps as text. Legacy strings keep only their leading integer, the way
    /// the original app read them.
    fn into_reps_text(self) -> String {
        match self {
            StoredField::Text(s) => leading_integer(&s).to_string(),
            other => other.into_text(),
        }
    }

    /// Weight as text. Legacy strings keep only their leading decimal; text
    /// with no number in front reads as no weight.
    fn into_weight_text(self) -> String {
        match self {
            StoredField::Text(s) => leading_decimal(&s).to_string(),
            other => other.into_text(),
        }
    }

    fn into_text(self) -> String {
        match self {
            StoredField::Integer(n) => n.to_string(),
            StoredField::Float(n) => n.to_string(),
            StoredField::Text(s) => s,
            StoredField::Null => String::new(),
        }
    }
}

fn digit_count(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn sign_len(s: &str) -> usize {
    usize::from(s.starts_with(['+', '-']))
}

/// `" 8.5 reps"` -> `"8"`. Empty when there is no leading integer.
fn leading_integer(raw: &str) -> &str {
    let s = raw.trim_start();
    let sign = sign_len(s);
    match digit_count(&s[sign..]) {
        0 => "",
        digits => &s[..sign + digits],
    }
}

/// `"20kg"` -> `"20"`, `"1.5e1x"` -> `"1.5e1"`. Empty when there is no
/// leading number.
fn leading_decimal(raw: &str) -> &str {
    let s = raw.trim_start();
    let mut end = sign_len(s);
    let int_digits = digit_count(&s[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if s[end..].starts_with('.') {
        frac_digits = digit_count(&s[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return "";
    }

    let rest = &s[end..];
    if rest.starts_with(['e', 'E']) {
        let exp_sign = sign_len(&rest[1..]);
        let exp_digits = digit_count(&rest[1 + exp_sign..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }
    &s[..end]
}

impl TryFrom<StoredWorkout> for Workout {
    type Error = ValidationError;

    fn try_from(stored: StoredWorkout) -> Result<Self, ValidationError> {
        let draft = Draft {
            id: stored.id,
            date: stored.date,
            exercises: stored
                .exercises
                .into_iter()
                .map(|e| DraftExercise {
                    id: e.id,
                    name: e.name,
                    sets: e
                        .sets
                        .into_iter()
                        .map(|s| DraftSet {
                            reps: s.reps.into_reps_text(),
                            weight: s.weight.into_weight_text(),
                        })
                        .collect(),
                })
                .collect(),
        };
        draft.validate_for_save()
    }
}

//! Workout-level draft edits: date and exercise list.

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;

use crate::error::DraftError;
use crate::session::draft::{Draft, DraftExercise, DraftSet, new_id};

impl Draft {
    /// Append an unnamed exercise holding one empty set.
    pub fn add_exercise(&self) -> Draft {
        let mut next = self.clone();
        let exercise = DraftExercise {
            id: new_id(),
            name: String::new(),
            sets: vec![DraftSet::default()],
        };
        debug!("Adding exercise {} to draft {}", exercise.id, self.id);
        next.exercises.push(exercise);
        next
    }

    /// Replace an exercise's name as typed. Trimming happens at save time.
    pub fn rename_exercise(&self, exercise_id: &str, name: &str) -> Result<Draft, DraftError> {
        let mut next = self.clone();
        next.exercise_mut(exercise_id)?.name = name.to_string();
        Ok(next)
    }

    /// Drop an exercise. The remaining ones keep their order; an unknown id
    /// leaves the draft as it was.
    pub fn remove_exercise(&self, exercise_id: &str) -> Draft {
        let mut next = self.clone();
        next.exercises.retain(|e| e.id != exercise_id);
        next
    }

    pub fn set_date(&self, date: DateTime<Utc>) -> Draft {
        Draft {
            date,
            ..self.clone()
        }
    }

    /// Date picked from a calendar, stored as midnight UTC of that day.
    pub fn set_calendar_day(&self, day: NaiveDate) -> Draft {
        self.set_date(day.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

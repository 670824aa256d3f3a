//! Text renderings of saved workouts for list and detail views.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::db::models::{Set, Workout};

/// `"Wed, Nov 12"`: short weekday, short month, day of month.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%a, %b %-d").to_string()
}

pub fn exercise_count_label(count: usize) -> String {
    if count == 1 {
        "1 exercise".to_string()
    } else {
        format!("{} exercises", count)
    }
}

/// One line of the detail view, `index` being 0-based.
pub fn set_line(index: usize, set: &Set) -> String {
    format!("Set {}: {}", index + 1, set)
}

/// One row of the workout list.
pub struct WorkoutListItem<'a>(pub &'a Workout);

impl fmt::Display for WorkoutListItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  [{}]",
            format_date(self.0.date()),
            exercise_count_label(self.0.exercises().len()),
            self.0.id()
        )
    }
}

/// Full detail view of a workout.
pub struct WorkoutDetail<'a>(pub &'a Workout);

impl fmt::Display for WorkoutDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let workout = self.0;
        writeln!(f, "{}", format_date(workout.date()))?;
        for exercise in workout.exercises() {
            writeln!(f)?;
            writeln!(f, "{}", exercise.name())?;
            for (idx, set) in exercise.sets().iter().enumerate() {
                writeln!(f, "  {}", set_line(idx, set))?;
            }
        }
        Ok(())
    }
}

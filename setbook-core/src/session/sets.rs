use crate::error::DraftError;
use crate::session::draft::{Draft, DraftExercise, DraftSet, SetField};

impl Draft {
    pub(super) fn exercise_mut(
        &mut self,
        exercise_id: &str,
    ) -> Result<&mut DraftExercise, DraftError> {
        self.exercises
            .iter_mut()
            .find(|e| e.id == exercise_id)
            .ok_or_else(|| DraftError::UnknownExercise(exercise_id.to_string()))
    }

    /// Append an empty set to the exercise.
    pub fn add_set(&self, exercise_id: &str) -> Result<Draft, DraftError> {
        let mut next = self.clone();
        next.exercise_mut(exercise_id)?.sets.push(DraftSet::default());
        Ok(next)
    }

    /// Store raw input for one field of the set at `set_index` (0-based).
    pub fn update_set_field(
        &self,
        exercise_id: &str,
        set_index: usize,
        field: SetField,
        value: &str,
    ) -> Result<Draft, DraftError> {
        let mut next = self.clone();
        let exercise = next.exercise_mut(exercise_id)?;
        let len = exercise.sets.len();
        let set = exercise
            .sets
            .get_mut(set_index)
            .ok_or_else(|| DraftError::SetIndexOutOfRange {
                exercise_id: exercise_id.to_string(),
                index: set_index,
                len,
            })?;

        match field {
            SetField::Reps => set.reps = value.to_string(),
            SetField::Weight => set.weight = value.to_string(),
        }
        Ok(next)
    }
}

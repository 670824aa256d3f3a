use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use log::*;

use crate::db::WorkoutStore;
use crate::session::Draft;
use crate::uniffi_interface::errors::SetbookError;
use crate::uniffi_interface::objects::{DraftRecord, SetFieldKind, WorkoutRecord, parse_date};

#[uniffi::export]
pub fn start_draft() -> DraftRecord {
    Draft::start(Utc::now()).into()
}

#[uniffi::export]
pub fn add_exercise(draft: DraftRecord) -> std::result::Result<DraftRecord, SetbookError> {
    let draft = Draft::try_from(draft)?;
    Ok(draft.add_exercise().into())
}

#[uniffi::export]
pub fn rename_exercise(
    draft: DraftRecord,
    exercise_id: String,
    name: String,
) -> std::result::Result<DraftRecord, SetbookError> {
    let draft = Draft::try_from(draft)?;
    Ok(draft.rename_exercise(&exercise_id, &name)?.into())
}

#[uniffi::export]
pub fn add_set(
    draft: DraftRecord,
    exercise_id: String,
) -> std::result::Result<DraftRecord, SetbookError> {
    let draft = Draft::try_from(draft)?;
    Ok(draft.add_set(&exercise_id)?.into())
}

#[uniffi::export]
pub fn update_set_field(
    draft: DraftRecord,
    exercise_id: String,
    set_index: u32,
    field: SetFieldKind,
    value: String,
) -> std::result::Result<DraftRecord, SetbookError> {
    let draft = Draft::try_from(draft)?;
    Ok(draft
        .update_set_field(&exercise_id, set_index as usize, field.into(), &value)?
        .into())
}

#[uniffi::export]
pub fn remove_exercise(
    draft: DraftRecord,
    exercise_id: String,
) -> std::result::Result<DraftRecord, SetbookError> {
    let draft = Draft::try_from(draft)?;
    Ok(draft.remove_exercise(&exercise_id).into())
}

#[uniffi::export]
pub fn set_date(
    draft: DraftRecord,
    date: String,
) -> std::result::Result<DraftRecord, SetbookError> {
    let draft = Draft::try_from(draft)?;
    Ok(draft.set_date(parse_date(&date)?).into())
}

/// Check a draft without saving it.
#[uniffi::export]
pub fn validate_for_save(draft: DraftRecord) -> std::result::Result<WorkoutRecord, SetbookError> {
    let workout = Draft::try_from(draft)?.validate_for_save()?;
    Ok(WorkoutRecord::from(&workout))
}

/// Workout history for the host app.
#[derive(uniffi::Object)]
pub struct WorkoutLog {
    store: WorkoutStore,
}

#[uniffi::export]
impl WorkoutLog {
    #[uniffi::constructor]
    pub fn open(dir: String) -> std::result::Result<Arc<Self>, SetbookError> {
        let store = WorkoutStore::open_dir(Path::new(&dir))?;
        Ok(Arc::new(Self { store }))
    }

    /// Most recent first. An unavailable store reads as empty.
    pub fn list_workouts(&self) -> std::result::Result<Vec<WorkoutRecord>, SetbookError> {
        let rt = crate::runtime::global_runtime()?;
        let workouts = rt.block_on(self.store.load_workouts());
        Ok(workouts.iter().map(WorkoutRecord::from).collect())
    }

    pub fn get_workout(
        &self,
        id: String,
    ) -> std::result::Result<Option<WorkoutRecord>, SetbookError> {
        let rt = crate::runtime::global_runtime()?;
        let workout = rt.block_on(self.store.get_workout(&id))?;
        Ok(workout.as_ref().map(WorkoutRecord::from))
    }

    /// Validate and persist. On failure the host keeps its draft as is.
    pub fn save_draft(
        &self,
        draft: DraftRecord,
    ) -> std::result::Result<WorkoutRecord, SetbookError> {
        let workout = Draft::try_from(draft)?.validate_for_save()?;
        let rt = crate::runtime::global_runtime()?;
        rt.block_on(self.store.save_workout(&workout))?;
        debug!("Saved draft {} from host", workout.id());
        Ok(WorkoutRecord::from(&workout))
    }

    pub fn delete_workout(&self, id: String) -> std::result::Result<(), SetbookError> {
        let rt = crate::runtime::global_runtime()?;
        rt.block_on(self.store.delete_workout(&id))?;
        Ok(())
    }
}

use log::{debug, error, info, warn};

use crate::db::models::Workout;
use crate::db::{WORKOUT_KEY_PREFIX, WorkoutStore, workout_key};
use crate::error::StoreError;

impl WorkoutStore {
    /// All readable workouts, most recent first.
    ///
    /// Records that vanish between listing and reading, fail to read, or fail
    /// to decode are skipped with a warning; only a failed enumeration is an
    /// error.
    pub async fn list_workouts(&self) -> Result<Vec<Workout>, StoreError> {
        let listed = self
            .backend
            .list(WORKOUT_KEY_PREFIX)
            .await
            .map_err(StoreError::Unavailable)?;

        let mut workouts = Vec::with_capacity(listed.keys.len());
        for key in listed.keys {
            let stored = match self.backend.get(&key).await {
                Ok(Some(stored)) => stored,
                Ok(None) => {
                    debug!("Workout {} disappeared while listing", key);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping unreadable workout {}: {:#}", key, e);
                    continue;
                }
            };

            match serde_json::from_str::<Workout>(&stored.value) {
                Ok(workout) => workouts.push(workout),
                Err(e) => warn!("Skipping corrupt workout {}: {}", key, e),
            }
        }

        workouts.sort_by(|a, b| b.date().cmp(&a.date()));
        debug!("Listed {} workouts", workouts.len());
        Ok(workouts)
    }

    /// [`list_workouts`](Self::list_workouts), with an unavailable store shown
    /// as an empty history.
    pub async fn load_workouts(&self) -> Vec<Workout> {
        match self.list_workouts().await {
            Ok(workouts) => workouts,
            Err(e) => {
                error!("No workouts loaded: {}", e);
                Vec::new()
            }
        }
    }

    /// One workout for the detail view.
    pub async fn get_workout(&self, id: &str) -> Result<Option<Workout>, StoreError> {
        let key = workout_key(id);
        let Some(stored) = self
            .backend
            .get(&key)
            .await
            .map_err(StoreError::Unavailable)?
        else {
            return Ok(None);
        };

        serde_json::from_str(&stored.value)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { key, source })
    }

    /// Write the workout under `workout:<id>`, replacing any earlier version.
    pub async fn save_workout(&self, workout: &Workout) -> Result<(), StoreError> {
        let write_error = |source: anyhow::Error| StoreError::Write {
            id: workout.id().to_string(),
            source,
        };

        let json = serde_json::to_string(workout).map_err(|e| write_error(e.into()))?;
        self.backend
            .set(&workout_key(workout.id()), &json)
            .await
            .map_err(write_error)?;

        info!(
            "Saved workout {} with {} exercises",
            workout.id(),
            workout.exercises().len()
        );
        Ok(())
    }

    /// Remove a workout. Unknown ids are not an error.
    pub async fn delete_workout(&self, id: &str) -> Result<(), StoreError> {
        self.backend
            .delete(&workout_key(id))
            .await
            .map_err(|source| StoreError::Write {
                id: id.to_string(),
                source,
            })?;

        info!("Deleted workout {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::db::{InMemoryBackend, KvBackend, ListResult, StoredValue};
    use crate::session::{Draft, SetField};

    fn workout_on(date: &str, exercise: &str) -> Workout {
        let date: DateTime<Utc> = date.parse().unwrap();
        let draft = Draft::start(date).add_exercise();
        let id = draft.exercises[0].id.clone();
        draft
            .rename_exercise(&id, exercise)
            .and_then(|d| d.update_set_field(&id, 0, SetField::Reps, "5"))
            .unwrap()
            .validate_for_save()
            .unwrap()
    }

    /// Backend whose calls can be made to fail.
    struct FlakyBackend {
        inner: InMemoryBackend,
        fail_list: bool,
        fail_writes: bool,
        fail_get_for: Option<String>,
    }

    impl FlakyBackend {
        fn new() -> Self {
            Self {
                inner: InMemoryBackend::new(),
                fail_list: false,
                fail_writes: false,
                fail_get_for: None,
            }
        }
    }

    #[async_trait]
    impl KvBackend for FlakyBackend {
        async fn list(&self, prefix: &str) -> anyhow::Result<ListResult> {
            if self.fail_list {
                return Err(anyhow!("storage offline"));
            }
            self.inner.list(prefix).await
        }

        async fn get(&self, key: &str) -> anyhow::Result<Option<StoredValue>> {
            if self.fail_get_for.as_deref() == Some(key) {
                return Err(anyhow!("read timeout"));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            if self.fail_writes {
                return Err(anyhow!("quota exceeded"));
            }
            self.inner.set(key, value).await
        }

        async fn delete(&self, key: &str) -> anyhow::Result<()> {
            if self.fail_writes {
                return Err(anyhow!("quota exceeded"));
            }
            self.inner.delete(key).await
        }
    }

    #[tokio::test]
    async fn save_then_list_round_trips() {
        let store = WorkoutStore::in_memory();
        let workout = workout_on("2025-11-12T08:00:00Z", "Bench Press");

        store.save_workout(&workout).await.unwrap();

        let listed = store.list_workouts().await.unwrap();
        assert_eq!(listed, vec![workout.clone()]);
        assert_eq!(store.get_workout(workout.id()).await.unwrap(), Some(workout));
    }

    #[tokio::test]
    async fn list_is_most_recent_first() {
        let store = WorkoutStore::in_memory();
        let dates = [
            "2025-11-10T08:00:00Z",
            "2025-11-12T08:00:00Z",
            "2025-10-01T08:00:00Z",
            "2025-11-11T20:00:00Z",
        ];
        for date in dates {
            store.save_workout(&workout_on(date, "Row")).await.unwrap();
        }

        let listed: Vec<_> = store
            .list_workouts()
            .await
            .unwrap()
            .iter()
            .map(|w| w.date().to_rfc3339())
            .collect();
        assert_eq!(
            listed,
            vec![
                "2025-11-12T08:00:00+00:00",
                "2025-11-11T20:00:00+00:00",
                "2025-11-10T08:00:00+00:00",
                "2025-10-01T08:00:00+00:00",
            ]
        );
    }

    #[tokio::test]
    async fn save_overwrites_same_id() {
        let store = WorkoutStore::in_memory();
        let workout = workout_on("2025-11-12T08:00:00Z", "Squat");
        store.save_workout(&workout).await.unwrap();

        let edited = Draft::from_workout(&workout);
        let exercise_id = edited.exercises[0].id.clone();
        let edited = edited
            .rename_exercise(&exercise_id, "Front Squat")
            .unwrap()
            .validate_for_save()
            .unwrap();
        store.save_workout(&edited).await.unwrap();

        let listed = store.list_workouts().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].exercises()[0].name(), "Front Squat");
    }

    #[tokio::test]
    async fn delete_removes_and_tolerates_unknown_ids() {
        let store = WorkoutStore::in_memory();
        let keep = workout_on("2025-11-12T08:00:00Z", "Squat");
        let gone = workout_on("2025-11-13T08:00:00Z", "Deadlift");
        store.save_workout(&keep).await.unwrap();
        store.save_workout(&gone).await.unwrap();

        store.delete_workout(gone.id()).await.unwrap();
        store.delete_workout("never-saved").await.unwrap();

        let ids: Vec<_> = store
            .list_workouts()
            .await
            .unwrap()
            .iter()
            .map(|w| w.id().to_string())
            .collect();
        assert_eq!(ids, vec![keep.id().to_string()]);
        assert_eq!(store.get_workout(gone.id()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_and_unreadable_records_are_skipped() {
        let mut backend = FlakyBackend::new();
        backend.fail_get_for = Some("workout:broken-read".into());
        let backend = Arc::new(backend);
        let store = WorkoutStore::new(backend.clone());

        let good = workout_on("2025-11-12T08:00:00Z", "Squat");
        store.save_workout(&good).await.unwrap();
        backend.inner.set("workout:garbage", "{not json").await.unwrap();
        backend
            .inner
            .set(
                "workout:zero-reps",
                r#"{"id":"zero-reps","date":"2025-11-12T08:00:00Z","exercises":[{"id":"e","name":"Squat","sets":[{"reps":"0","weight":""}]}]}"#,
            )
            .await
            .unwrap();
        backend.inner.set("workout:broken-read", "{}").await.unwrap();

        assert_eq!(store.list_workouts().await.unwrap(), vec![good]);
        assert!(matches!(
            store.get_workout("garbage").await,
            Err(StoreError::Corrupt { .. })
        ));
        assert!(matches!(
            store.get_workout("broken-read").await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn legacy_text_records_are_listed() {
        let backend = Arc::new(InMemoryBackend::new());
        let store = WorkoutStore::new(backend.clone());

        let sets = [
            ("10abc", "20"),
            ("8", "abc"),
            ("8.5", ""),
            (" 8 ", "20kg"),
            ("8", ""),
        ];
        for (i, (reps, weight)) in sets.iter().enumerate() {
            let record = serde_json::json!({
                "id": format!("legacy-{}", i),
                "date": format!("2024-11-1{}T08:00:00.000Z", i),
                "exercises": [{
                    "id": "e",
                    "name": "Row",
                    "sets": [{ "reps": reps, "weight": weight }]
                }]
            });
            backend
                .set(&format!("workout:legacy-{}", i), &record.to_string())
                .await
                .unwrap();
        }

        let listed: Vec<_> = store
            .list_workouts()
            .await
            .unwrap()
            .iter()
            .map(|w| (w.id().to_string(), w.exercises()[0].sets()[0]))
            .collect();
        let ids: Vec<_> = listed.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["legacy-4", "legacy-3", "legacy-2", "legacy-1", "legacy-0"]
        );
        assert_eq!(listed[1].1.weight, Some(20.0));
        assert_eq!(listed[3].1.weight, None);
        assert_eq!(listed[4].1.reps, 10);
    }

    #[tokio::test]
    async fn failed_enumeration_is_unavailable() {
        let mut backend = FlakyBackend::new();
        backend.fail_list = true;
        let store = WorkoutStore::new(Arc::new(backend));

        assert!(matches!(
            store.list_workouts().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.load_workouts().await.is_empty());
    }

    #[tokio::test]
    async fn failed_writes_surface_as_write_errors() {
        let mut backend = FlakyBackend::new();
        backend.fail_writes = true;
        let store = WorkoutStore::new(Arc::new(backend));
        let workout = workout_on("2025-11-12T08:00:00Z", "Squat");

        match store.save_workout(&workout).await {
            Err(StoreError::Write { id, .. }) => assert_eq!(id, workout.id()),
            other => panic!("expected write error, got {:?}", other),
        }
        assert!(matches!(
            store.delete_workout(workout.id()).await,
            Err(StoreError::Write { .. })
        ));
        assert!(store.list_workouts().await.unwrap().is_empty());
    }
}

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::{debug, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use setbook::session::summary::{
    WorkoutDetail, WorkoutListItem, exercise_count_label, format_date,
};
use setbook::{Draft, SetField, WorkoutStore};

#[derive(Parser, Debug)]
#[command(version, about = "Setbook - Workout Log CLI", long_about = None)]
struct Args {
    /// Directory holding saved workouts
    #[arg(long, env = "SETBOOK_STORE_DIR", default_value = "setbook-data")]
    store_dir: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, env = "SETBOOK_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List saved workouts, most recent first
    List {
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show one workout in detail
    Show { id: String },
    /// Record a new workout
    Log {
        /// Day of the workout (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// `NAME:REPSxWEIGHT,REPS,...`, e.g. "Bench Press:10x20,8x22.5"
        #[arg(short, long = "exercise", required = true)]
        exercises: Vec<String>,
    },
    /// Rewrite a saved workout under the same id
    Edit {
        id: String,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Exercises to append, same format as `log`
        #[arg(short, long = "exercise")]
        exercises: Vec<String>,
        /// Names of exercises to drop
        #[arg(short, long = "remove")]
        remove: Vec<String>,
    },
    /// Delete a saved workout
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// One `--exercise` argument, split into raw fields for the draft.
#[derive(Debug, PartialEq)]
struct ExerciseArg {
    name: String,
    sets: Vec<(String, String)>,
}

fn parse_exercise_arg(raw: &str) -> Result<ExerciseArg> {
    let (name, sets) = raw
        .rsplit_once(':')
        .with_context(|| format!("expected NAME:SETS, got {:?}", raw))?;

    let sets = sets
        .split(',')
        .map(|entry| match entry.split_once(['x', 'X']) {
            Some((reps, weight)) => (reps.trim().to_string(), weight.trim().to_string()),
            None => (entry.trim().to_string(), String::new()),
        })
        .collect();

    Ok(ExerciseArg {
        name: name.to_string(),
        sets,
    })
}

/// Feed an exercise into the draft through the same edits a UI would make.
fn append_exercise(draft: Draft, arg: &ExerciseArg) -> Result<Draft> {
    let mut draft = draft.add_exercise();
    let id = draft
        .exercises
        .last()
        .map(|e| e.id.clone())
        .context("exercise was not added")?;

    draft = draft.rename_exercise(&id, &arg.name)?;
    for (idx, (reps, weight)) in arg.sets.iter().enumerate() {
        if idx > 0 {
            draft = draft.add_set(&id)?;
        }
        draft = draft.update_set_field(&id, idx, SetField::Reps, reps)?;
        draft = draft.update_set_field(&id, idx, SetField::Weight, weight)?;
    }
    Ok(draft)
}

async fn save(store: &WorkoutStore, draft: &Draft) -> Result<()> {
    let workout = draft.validate_for_save()?;
    store
        .save_workout(&workout)
        .await
        .context("workout not saved, try again")?;
    println!(
        "Saved {} ({}) as {}",
        format_date(workout.date()),
        exercise_count_label(workout.exercises().len()),
        workout.id()
    );
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    if !setbook::logging::set_log_level(&args.log_level) {
        bail!("unknown log level {:?}", args.log_level);
    }
    debug!("Using store at {}", args.store_dir.display());
    let store = WorkoutStore::open_dir(&args.store_dir)?;

    match args.command {
        Commands::List { verbose } => {
            let workouts = store.load_workouts().await;
            if workouts.is_empty() {
                println!("No workouts yet. Record one with `log`.");
            }
            for workout in &workouts {
                println!("{}", WorkoutListItem(workout));
                if verbose {
                    for exercise in workout.exercises() {
                        println!("\t{}: {} sets", exercise.name(), exercise.sets().len());
                    }
                }
            }
            Ok(())
        }
        Commands::Show { id } => {
            let workout = store
                .get_workout(&id)
                .await?
                .with_context(|| format!("no workout with id {}", id))?;
            print!("{}", WorkoutDetail(&workout));
            Ok(())
        }
        Commands::Log { date, exercises } => {
            let mut draft = Draft::start(Utc::now());
            if let Some(day) = date {
                draft = draft.set_calendar_day(day);
            }
            for raw in &exercises {
                draft = append_exercise(draft, &parse_exercise_arg(raw)?)?;
            }
            save(&store, &draft).await
        }
        Commands::Edit {
            id,
            date,
            exercises,
            remove,
        } => {
            let workout = store
                .get_workout(&id)
                .await?
                .with_context(|| format!("no workout with id {}", id))?;

            let mut draft = Draft::from_workout(&workout);
            if let Some(day) = date {
                draft = draft.set_calendar_day(day);
            }
            for name in &remove {
                let matching: Vec<String> = draft
                    .exercises
                    .iter()
                    .filter(|e| e.name.eq_ignore_ascii_case(name.trim()))
                    .map(|e| e.id.clone())
                    .collect();
                if matching.is_empty() {
                    warn!("No exercise named {:?} in workout {}", name, id);
                }
                for exercise_id in matching {
                    draft = draft.remove_exercise(&exercise_id);
                }
            }
            for raw in &exercises {
                draft = append_exercise(draft, &parse_exercise_arg(raw)?)?;
            }
            if draft.is_empty() {
                bail!("workout {} would have no exercises left, use `delete` instead", id);
            }
            save(&store, &draft).await
        }
        Commands::Delete { id, yes } => {
            // Corrupt records can still be deleted.
            let what = match store.get_workout(&id).await {
                Ok(Some(workout)) => format!("the workout from {}", format_date(workout.date())),
                Ok(None) => {
                    println!("No workout with id {}, nothing to delete", id);
                    return Ok(());
                }
                Err(e) => {
                    warn!("{}", e);
                    format!("unreadable workout {}", id)
                }
            };

            let prompt = format!("Delete {}? This cannot be undone.", what);
            if !yes && !confirm(&prompt)? {
                println!("Kept workout {}", id);
                return Ok(());
            }

            store.delete_workout(&id).await?;
            println!("Deleted workout {}", id);
            Ok(())
        }
    }
}

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use desk_core::model::{ExamInfo, Task, TaskId};
use storage::repository::{KvKey, Storage, StorageError};
use storage::sqlite::{DEFAULT_DB_URL, database_url_from_lookup, sqlite_url_for_path};

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    tasks: u32,
    notes: Option<String>,
    exam_label: String,
    exam_in_days: i64,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTasks { raw: String },
    InvalidExamDays { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTasks { raw } => write!(f, "invalid --tasks value: {raw}"),
            ArgsError::InvalidExamDays { raw } => write!(f, "invalid --exam-in-days value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = database_url_from_lookup(|name| std::env::var(name).ok());
        let mut tasks = std::env::var("DESK_SEED_TASKS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(5);
        let mut notes = std::env::var("DESK_SEED_NOTES").ok();
        let mut exam_label = "Maths paper 1".to_string();
        let mut exam_in_days = 14;
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = sqlite_url_for_path(value.trim());
                }
                "--tasks" => {
                    let value = require_value(&mut args, "--tasks")?;
                    tasks = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidTasks { raw: value.clone() })?;
                }
                "--notes" => {
                    notes = Some(require_value(&mut args, "--notes")?);
                }
                "--exam-label" => {
                    exam_label = require_value(&mut args, "--exam-label")?;
                }
                "--exam-in-days" => {
                    let value = require_value(&mut args, "--exam-in-days")?;
                    exam_in_days = value
                        .parse::<i64>()
                        .map_err(|_| ArgsError::InvalidExamDays { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            tasks,
            notes,
            exam_label,
            exam_in_days,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url|path>    SQLite URL or file path (default: {DEFAULT_DB_URL})");
    eprintln!("  --tasks <n>               Number of sample tasks to insert (default: 5)");
    eprintln!("  --notes <text>            Notes text to store");
    eprintln!("  --exam-label <text>       Exam label (default: Maths paper 1)");
    eprintln!("  --exam-in-days <n>        Exam date relative to now (default: 14)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  DESK_DB_URL, DB_PATH, DESK_SEED_TASKS, DESK_SEED_NOTES");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let samples = [
        "Past paper: algebra section",
        "Flashcards: cell biology",
        "Re-read essay feedback",
        "Formula sheet from memory",
        "Mark yesterday's mock",
    ];
    let mut inserted = 0_u32;
    for i in 0..args.tasks {
        let idx = (i as usize) % samples.len();
        let created_at = (now - Duration::minutes(i64::from(args.tasks - i))).timestamp_millis();
        let task = Task::new(TaskId::generate(), samples[idx], created_at)?;
        match storage.tasks.insert_task(&task).await {
            Ok(()) => inserted += 1,
            Err(StorageError::Conflict) => {}
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(notes) = &args.notes {
        storage
            .kv
            .put_value(KvKey::Notes, &serde_json::to_string(notes)?)
            .await?;
    }

    let exam_date = (now + Duration::days(args.exam_in_days)).date_naive();
    let exam = ExamInfo::new(args.exam_label.clone(), Some(exam_date));
    storage
        .kv
        .put_value(KvKey::Exam, &serde_json::to_string(&exam)?)
        .await?;

    println!(
        "Seeded {} tasks and exam '{}' on {} into {}",
        inserted,
        exam.label(),
        exam.date_string(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

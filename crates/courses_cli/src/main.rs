//! Command-line probe for the course catalog core.
//!
//! # Responsibility
//! - Run the two catalog use-cases against a SQLite file.
//! - Print results as JSON for quick local checks.

use clap::{Parser, Subcommand, ValueEnum};
use courses_core::db::open_db;
use courses_core::{
    core_version, default_log_level, init_logging, AddTeacherRequest, CatalogConfig,
    CourseService, SqliteUnitOfWork, TeacherType,
};
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "courses", version, about = "University course catalog")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, default_value = "courses.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level; only meaningful together with `--log-dir`.
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,

    /// Page size for semester listings.
    #[arg(long, global = true)]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List course instances taught in a semester.
    Semester {
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        semester: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Register a teacher to a course instance.
    AddTeacher {
        #[arg(long)]
        course_instance: i64,
        #[arg(long)]
        ssn: String,
        #[arg(long, value_enum)]
        role: Role,
    },
    /// Print the core version.
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Role {
    Main,
    Assistant,
}

impl From<Role> for TeacherType {
    fn from(value: Role) -> Self {
        match value {
            Role::Main => TeacherType::MainTeacher,
            Role::Assistant => TeacherType::AssistantTeacher,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, Box<dyn Error>> {
    let mut config = CatalogConfig::default();
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    match cli.command {
        Command::Version => Ok(format!("courses_core version={}", core_version())),
        Command::Semester {
            language,
            semester,
            page,
        } => {
            let mut conn = open_db(&cli.db)?;
            let service = CourseService::new(SqliteUnitOfWork::try_new(&mut conn)?, config)?;
            let envelope = service.list_course_instances_for_semester(
                language.as_deref(),
                semester.as_deref(),
                page,
            )?;
            Ok(serde_json::to_string_pretty(&envelope)?)
        }
        Command::AddTeacher {
            course_instance,
            ssn,
            role,
        } => {
            let mut conn = open_db(&cli.db)?;
            let mut service = CourseService::new(SqliteUnitOfWork::try_new(&mut conn)?, config)?;
            let request = AddTeacherRequest::new(ssn, role.into());
            let summary = service.add_teacher_to_course(course_instance, &request)?;
            Ok(serde_json::to_string_pretty(&summary)?)
        }
    }
}

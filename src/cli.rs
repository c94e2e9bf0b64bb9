//! Notion Epic Tracker - CLI Tool
//!
//! Runs the tracker operations directly against Notion and prints the result.

use anyhow::Result;
use clap::{Parser, Subcommand};
use notion_epic_tracker::tracker::CreateTaskRequest;
use notion_epic_tracker::{AppState, Config};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "epic")]
#[command(about = "CLI for the Notion Epic tracker")]
struct Cli {
    /// YAML config file (defaults to ./config.yaml when present)
    #[arg(long, env = "EPIC_TRACKER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Epic operations
    Epic {
        #[command(subcommand)]
        action: EpicAction,
    },

    /// Task operations
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Append a session log to an Epic
    Log {
        /// Epic name
        epic: String,

        /// What was done
        #[arg(short, long)]
        summary: String,

        /// Comma-separated Task names to mark done
        #[arg(short, long, default_value = "")]
        tasks: String,
    },
}

#[derive(Subcommand)]
enum EpicAction {
    /// List Epics
    List {
        /// Only Epics with this status
        #[arg(short, long, default_value = "")]
        status: String,
    },

    /// Show an Epic dashboard
    Dashboard {
        /// Epic name
        name: String,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// List the Tasks of an Epic (all Tasks without --epic)
    List {
        #[arg(short, long, default_value = "")]
        epic: String,

        #[arg(short, long, default_value = "")]
        status: String,
    },

    /// Create a Task under an Epic
    Add {
        /// Epic name
        #[arg(short, long)]
        epic: String,

        /// Task name
        name: String,

        /// Feature, Maintenance, Research or Bug
        #[arg(long = "type", default_value = "Feature")]
        task_type: String,

        /// HIGH, MEDIUM or LOW
        #[arg(short, long, default_value = "MEDIUM")]
        priority: String,

        /// Internal or External
        #[arg(long, default_value = "Internal")]
        source: String,
    },

    /// Mark a Task done
    Done {
        /// Epic the Task belongs to (searches every Task when empty)
        #[arg(short, long, default_value = "")]
        epic: String,

        /// Task name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("notion_epic_tracker=warn".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::from_yaml_and_env(cli.config.as_deref())?;
    let state = AppState::new(config);
    let tracker = &state.tracker;

    let output = match cli.command {
        Commands::Epic { action } => match action {
            EpicAction::List { status } => tracker.list_epics(&status).await?,
            EpicAction::Dashboard { name } => tracker.update_dashboard(&name).await?,
        },
        Commands::Task { action } => match action {
            TaskAction::List { epic, status } => tracker.list_tasks(&epic, &status).await?,
            TaskAction::Add {
                epic,
                name,
                task_type,
                priority,
                source,
            } => {
                let mut req = CreateTaskRequest::new(&epic, &name);
                req.task_type = task_type;
                req.priority = priority;
                req.source = source;
                tracker.create_task(req).await?
            }
            TaskAction::Done { epic, name } => tracker.complete_task(&epic, &name).await?,
        },
        Commands::Log {
            epic,
            summary,
            tasks,
        } => tracker.log_session(&epic, &summary, &tasks).await?,
    };

    println!("{}", output);
    Ok(())
}

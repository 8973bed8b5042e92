//! Minuta CLI.
//!
//! Argument parsing and top-level error handling live here; the
//! application logic is in the library crate.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use minuta::api::{run_server, ApiContext};
use minuta::config::{self, Settings};
use minuta::llm::OpenAiClient;
use minuta::pipeline::{assemble, MeetingPipeline};
use minuta::storage::MeetingStore;

#[derive(Parser)]
#[command(name = "minuta")]
#[command(author, version, about = "Meeting transcript intelligence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
    /// Run the extraction pipeline over one transcript
    Process {
        /// Transcript file to store and process
        #[arg(long, conflicts_with = "key")]
        file: Option<PathBuf>,
        /// Key of an already-stored transcript
        #[arg(long)]
        key: Option<String>,
    },
    /// List stored transcripts
    Transcripts,
    /// List generated meeting data
    Meetings {
        /// Only meetings this person attended
        #[arg(long)]
        participant: Option<String>,
    },
    /// Print the minutes of one meeting
    Meeting {
        /// Meeting data id
        id: String,
    },
    /// List action items across meetings
    Tasks {
        /// Only tasks owned by this person
        #[arg(long, conflicts_with = "high_priority")]
        owner: Option<String>,
        /// Only high-priority tasks
        #[arg(long)]
        high_priority: bool,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), String> {
    let settings = Settings::from_env();

    match cli.command {
        Commands::Serve { host, port } => serve(&settings, &host, port),
        Commands::Process { file, key } => process(&settings, file, key),
        Commands::Transcripts => transcripts(&settings),
        Commands::Meetings { participant } => meetings(&settings, participant.as_deref()),
        Commands::Meeting { id } => minutes(&settings, &id),
        Commands::Tasks {
            owner,
            high_priority,
        } => tasks(&settings, owner.as_deref(), high_priority),
    }
}

fn serve(settings: &Settings, host: &str, port: u16) -> Result<(), String> {
    // The generation client is blocking; it must be constructed before
    // the async runtime exists.
    let ctx = ApiContext::from_settings(settings).map_err(|e| e.to_string())?;
    tracing::info!("{} v{} starting", config::APP_NAME, config::APP_VERSION);

    let runtime = tokio::runtime::Runtime::new().map_err(|e| e.to_string())?;
    runtime
        .block_on(run_server(ctx, host, port))
        .map_err(|e| e.to_string())
}

fn process(settings: &Settings, file: Option<PathBuf>, key: Option<String>) -> Result<(), String> {
    let store = MeetingStore::open(settings).map_err(|e| e.to_string())?;

    let (key, content) = match (file, key) {
        (Some(path), None) => {
            let bytes = std::fs::read(&path)
                .map_err(|e| format!("Cannot read {}: {e}", path.display()))?;
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("transcript.txt");
            let key = store
                .save_transcript(filename, &bytes)
                .map_err(|e| e.to_string())?;
            println!("Stored transcript {key}");
            (key, String::from_utf8_lossy(&bytes).into_owned())
        }
        (None, Some(key)) => {
            let (_, content) = store
                .get_transcript(&key)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("Transcript not found: {key}"))?;
            (key, content)
        }
        _ => return Err("Provide exactly one of --file or --key".to_string()),
    };

    if let Some(existing) = store.find_by_source(&key).map_err(|e| e.to_string())? {
        println!(
            "Meeting data already exists for this transcript: {}",
            existing.id
        );
        return Ok(());
    }

    let generator = OpenAiClient::from_settings(settings);
    let pipeline = MeetingPipeline::new(Box::new(generator));
    let record = pipeline.run(&content, &key).map_err(|e| e.to_string())?;
    let data = assemble(&record, None, Local::now().naive_local());
    store
        .persist_outputs(&record, &data)
        .map_err(|e| e.to_string())?;

    println!("Generated meeting data {}", data.id);
    println!("  Title: {}", data.title);
    if !data.participants.is_empty() {
        println!("  Participants: {}", data.participants.join(", "));
    }
    println!("  Decisions: {}", data.key_points.len());
    println!("  Action items: {}", data.action_items.len());
    Ok(())
}

fn transcripts(settings: &Settings) -> Result<(), String> {
    let store = MeetingStore::open(settings).map_err(|e| e.to_string())?;
    let entries = store.list_transcripts().map_err(|e| e.to_string())?;

    if entries.is_empty() {
        println!("No transcripts stored.");
        return Ok(());
    }
    println!("Transcripts ({}):", entries.len());
    for entry in entries {
        let status = if entry.processed {
            "processed"
        } else {
            "pending"
        };
        println!("- {} ({}, {status})", entry.id, entry.date);
    }
    Ok(())
}

fn meetings(settings: &Settings, participant: Option<&str>) -> Result<(), String> {
    let store = MeetingStore::open(settings).map_err(|e| e.to_string())?;
    let list = match participant {
        Some(name) => store.meetings_by_participant(name),
        None => store.list_meeting_data(),
    }
    .map_err(|e| e.to_string())?;

    if list.is_empty() {
        println!("No meeting data found.");
        return Ok(());
    }
    for data in list {
        println!("- {} | {} ({})", data.id, data.title, data.date);
    }
    Ok(())
}

fn minutes(settings: &Settings, id: &str) -> Result<(), String> {
    let store = MeetingStore::open(settings).map_err(|e| e.to_string())?;
    let minutes = store
        .get_minutes(id)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("No minutes found for meeting: {id}"))?;
    println!("{minutes}");
    Ok(())
}

fn tasks(settings: &Settings, owner: Option<&str>, high_priority: bool) -> Result<(), String> {
    let store = MeetingStore::open(settings).map_err(|e| e.to_string())?;
    let tasks = match owner {
        Some(name) => store.tasks_by_owner(name),
        None if high_priority => store.high_priority_tasks(),
        None => return Err("Provide --owner <name> or --high-priority".to_string()),
    }
    .map_err(|e| e.to_string())?;

    if tasks.is_empty() {
        println!("No matching tasks.");
        return Ok(());
    }
    for task in tasks {
        let due = if task.due.is_empty() {
            "TBD"
        } else {
            task.due.as_str()
        };
        println!(
            "- [{}] {} (owner: {}, due: {due}, meeting: {})",
            task.priority.as_str(),
            task.text,
            task.owner,
            task.meeting_id
        );
    }
    Ok(())
}

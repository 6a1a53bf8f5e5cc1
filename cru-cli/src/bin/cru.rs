use clap::{Parser, Subcommand};
use cru_cli::{
    loader::{self, LoadedFile},
    output::{RoomsView, SessionView, output_json, render_diagnostic},
};
use cru_core::{
    Day, Error, ParseOptions, Session,
    query::{by_day, matches_needle, rooms_for_course},
};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const PREVIEW_LEN: usize = 10;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON file with parse options
    #[arg(short, long, env = "CRU_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if a file is a valid .cru file
    Check(CheckArgs),

    /// Search for sessions in a .cru file
    Search(SearchArgs),

    /// List the rooms of a course across every .cru file of the data directory
    Rooms(RoomsArgs),
}

#[derive(Parser)]
struct CheckArgs {
    /// The file to check
    file: PathBuf,

    /// Log the grammar decision taken for each line
    #[arg(short = 's', long)]
    show_symbols: bool,

    /// Log every token
    #[arg(short = 't', long)]
    show_tokenize: bool,
}

#[derive(Parser)]
struct SearchArgs {
    /// The file to search
    file: PathBuf,

    /// Case-insensitive text to look for in every field
    #[arg(short, long)]
    needle: Option<String>,

    /// Only sessions on this day (L, MA, ME, J, V)
    #[arg(short, long)]
    day: Option<Day>,
}

#[derive(Parser)]
struct RoomsArgs {
    /// Course name, as written in its header
    course: String,

    /// Directory searched recursively for .cru files
    #[arg(long, env = "CRU_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
}

/// Options from `--config`, with the trace switches of `check` on top.
fn load_options(cli: &Cli) -> Result<ParseOptions, Error> {
    let options = match &cli.config {
        Some(path) => ParseOptions::from_file(path)?,
        None => ParseOptions::default(),
    };
    Ok(match &cli.command {
        Commands::Check(args) => ParseOptions {
            trace_tokens: options.trace_tokens || args.show_tokenize,
            trace_grammar: options.trace_grammar || args.show_symbols,
            ..options
        },
        _ => options,
    })
}

fn read_file(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|e| {
        error!(path = %path.display(), "Failed to read file");
        Error::from(e)
    })
}

fn check_file(args: &CheckArgs, options: ParseOptions) -> Result<(), Error> {
    let text = read_file(&args.file)?;
    let result = cru_core::parse(&text, &options);
    let file = args.file.display().to_string();

    if result.is_valid() {
        println!("{} is a valid cru file", file);
        println!("Parsed entries: {}", result.sessions.len());
        return Ok(());
    }

    println!("{} contains errors", file);
    for diagnostic in &result.diagnostics {
        println!("{}", render_diagnostic(&file, diagnostic));
    }
    Err(Error::internal(format!(
        "{} error(s) in {}",
        result.error_count(),
        file
    )))
}

fn search_file(args: &SearchArgs, options: ParseOptions) -> Result<(), Error> {
    let text = read_file(&args.file)?;
    let result = cru_core::parse(&text, &options);
    if !result.is_valid() {
        info!(
            errors = result.error_count(),
            "skipping lines with errors, run `cru check` for details"
        );
    }

    let mut matches: Vec<&Session> = match args.day {
        Some(day) => by_day(&result.sessions, day),
        None => result.sessions.iter().collect(),
    };
    if let Some(needle) = &args.needle {
        matches.retain(|session| matches_needle(session, needle));
    }
    if args.needle.is_none() && args.day.is_none() {
        info!("No filter provided, showing the first {} entries", PREVIEW_LEN);
        matches.truncate(PREVIEW_LEN);
    }

    info!("Found {} matching sessions", matches.len());
    let views: Vec<SessionView> = matches.into_iter().map(SessionView::from).collect();
    output_json(&views, true)
        .map_err(|e| Error::internal(format!("JSON serialization error: {}", e)))
}

async fn list_rooms(args: &RoomsArgs, options: ParseOptions) -> Result<(), Error> {
    let files: Vec<LoadedFile> = loader::load_dir(&args.data_dir, options)
        .await
        .map_err(|e| Error::internal(format!("Failed to load {}: {}", args.data_dir.display(), e)))?;
    debug!("loaded {} files", files.len());

    let mut rooms: Vec<String> = Vec::new();
    for file in &files {
        if !file.result.is_valid() {
            info!(
                path = %file.path.display(),
                errors = file.result.error_count(),
                "file has errors"
            );
        }
        for room in rooms_for_course(&file.result.sessions, &args.course) {
            if !rooms.contains(&room) {
                rooms.push(room);
            }
        }
    }

    if rooms.is_empty() {
        info!("No rooms found for course {}", args.course);
    }
    output_json(
        &RoomsView {
            course: &args.course,
            rooms,
        },
        true,
    )
    .map_err(|e| Error::internal(format!("JSON serialization error: {}", e)))
}

/// `--verbose` and the trace options only apply when `RUST_LOG` is not set.
fn default_filter(cli: &Cli, options: &ParseOptions) -> String {
    let mut filter = String::from(if cli.verbose { "debug" } else { "info" });
    if options.trace_tokens {
        filter.push_str(",cru::tokenize=debug");
    }
    if options.trace_grammar {
        filter.push_str(",cru::symbols=debug");
    }
    filter
}

async fn run(cli: &Cli, options: ParseOptions) -> Result<(), Error> {
    debug!("options: {:?}", options);
    match &cli.command {
        Commands::Check(args) => check_file(args, options),
        Commands::Search(args) => search_file(args, options),
        Commands::Rooms(args) => list_rooms(args, options).await,
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    let options = match load_options(&cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(&cli, &options).into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli, options).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

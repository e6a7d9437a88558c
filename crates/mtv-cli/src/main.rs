//! mtv CLI: Command-line interface for the mission timeline viewer

use clap::{Parser, Subcommand};
use mtv_engine::time::{format_countdown, format_elapsed};
use mtv_engine::{load_events, DisplayEvent, NextEvent, Session, ViewerConfig};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Interactive viewer for scheduled mission events
#[derive(Parser)]
#[command(name = "mtv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Viewer config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Event dictionary document (overrides the config)
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Events timeline document (overrides the config)
    #[arg(long, global = true)]
    timeline: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the viewer (default when no command specified)
    View,

    /// Print the joined mission events
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the next event after a playhead offset
    Next {
        /// Playhead offset in seconds from the reference start
        #[arg(long)]
        at: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::View));

    if let Err(e) = init_logging(cli.log_file.as_deref(), interactive) {
        eprintln!("Error: failed to open log file: {e}");
        std::process::exit(1);
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config.with_paths(cli.dictionary, cli.timeline),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        None | Some(Commands::View) => cmd_view(config),
        Some(Commands::List { json }) => cmd_list(&config, json),
        Some(Commands::Next { at, json }) => cmd_next(&config, at, json),
    }
}

/// Install the tracing subscriber.
///
/// The viewer owns the terminal, so without a log file its output is
/// discarded; the other commands log to stderr.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match (log_file, interactive) {
        (Some(path), _) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, true) => builder.with_writer(io::sink).init(),
        (None, false) => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ViewerConfig, mtv_engine::ConfigError> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading config");
            ViewerConfig::load(path)
        }
        None => Ok(ViewerConfig::default()),
    }
}

fn cmd_view(config: ViewerConfig) {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(mtv_tui::run_tui(config)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load the session for a one-shot command, exiting on failure.
fn load_session(config: &ViewerConfig) -> Session {
    match load_events(&config.event_dictionary, &config.events_timeline) {
        Ok(events) => {
            info!(count = events.len(), "Loaded mission events");
            Session::new(events, config)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_list(config: &ViewerConfig, json: bool) {
    let session = load_session(config);

    if json {
        match serde_json::to_string_pretty(session.events()) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    for event in session.events() {
        println!("{}", list_line(event));
    }
    println!("\n{} event(s)", session.len());
}

/// One row of the plain-text event listing.
fn list_line(event: &DisplayEvent) -> String {
    format!(
        "{:<24} {}  {}  {:>8}",
        event.event_name,
        event.start_str(),
        event.end_str(),
        format_countdown(event.duration())
    )
}

fn cmd_next(config: &ViewerConfig, at: i64, json: bool) {
    let mut session = load_session(config);
    session.set_playhead(at);

    if json {
        match serde_json::to_string_pretty(&next_json(&session)) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", next_text(&session));
    }
}

/// Plain-text next-event report, matching the chart annotations.
fn next_text(session: &Session) -> String {
    let elapsed = format_elapsed(session.playhead().elapsed());
    match session.next_event() {
        NextEvent::Upcoming { event, until } => format!(
            "Current Time: {elapsed}\nTime Until Next Event: {}\nNext Event: {}",
            format_countdown(until),
            event.event_name
        ),
        NextEvent::NoMoreEvents => format!("No Upcoming Events\n(Current Time: {elapsed})"),
    }
}

fn next_json(session: &Session) -> serde_json::Value {
    let elapsed = session.playhead().elapsed();
    match session.next_event() {
        NextEvent::Upcoming { event, until } => serde_json::json!({
            "elapsed_seconds": elapsed,
            "next_event": event.event_name,
            "start_time": event.start_str(),
            "seconds_until": until.num_seconds(),
        }),
        NextEvent::NoMoreEvents => serde_json::json!({
            "elapsed_seconds": elapsed,
            "next_event": null,
        }),
    }
}

//! linecut: delete a range of lines from a file, optionally only when the
//! range still opens and closes with the expected markers.

mod actions;
mod config;
mod error;
mod executor;
mod fs;
mod lines;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use colored::*;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use config::Config;
use executor::{Edit, RunOptions};
use lines::{LineRange, Markers};

#[derive(Parser, Debug)]
#[command(name = "linecut", version, about = "Delete a range of lines from a file")]
struct Cli {
    /// Config file with named edits (defaults to ./linecut.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log each step to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Report what would be removed without writing the file
    #[arg(long, global = true)]
    dry_run: bool,

    /// Ask before writing the file
    #[arg(long, global = true)]
    confirm: bool,

    /// Print the outcome as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove a line range unconditionally, listing every removed line
    Remove {
        path: String,
        /// 1-based inclusive range, e.g. 484-508
        range: LineRange,
    },
    /// Remove a line range only if its first and last lines carry the markers
    Guarded {
        path: String,
        /// 1-based inclusive range, e.g. 485-508
        range: LineRange,
        #[arg(long, default_value = Markers::DEFAULT_OPEN, value_parser = NonEmptyStringValueParser::new())]
        open: String,
        #[arg(long, default_value = Markers::DEFAULT_CLOSE, value_parser = NonEmptyStringValueParser::new())]
        close: String,
    },
    /// Find the block delimited by the markers and remove it
    Block {
        path: String,
        #[arg(long, default_value = Markers::DEFAULT_OPEN, value_parser = NonEmptyStringValueParser::new())]
        open: String,
        #[arg(long, default_value = Markers::DEFAULT_CLOSE, value_parser = NonEmptyStringValueParser::new())]
        close: String,
        /// Which block to remove when several match (1-based)
        #[arg(long)]
        occurrence: Option<usize>,
    },
    /// Run a named edit from the config
    Run { name: String },
    /// List the named edits
    List,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("Warning: could not install the log subscriber");
        }
    }

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the parsed command and returns the process exit status.
async fn run(cli: Cli) -> Result<u8> {
    let options = RunOptions {
        dry_run: cli.dry_run,
        confirm: cli.confirm,
        quiet: cli.json,
    };

    let edit = match cli.command {
        Commands::Remove { path, range } => Edit::RemoveLines {
            path,
            start_line: range.start_line(),
            end_line: range.end_line(),
        },
        Commands::Guarded { path, range, open, close } => Edit::GuardedRemove {
            path,
            start_line: range.start_line(),
            end_line: range.end_line(),
            open_marker: open,
            close_marker: close,
        },
        Commands::Block { path, open, close, occurrence } => Edit::RemoveBlock {
            path,
            open_marker: open,
            close_marker: close,
            occurrence,
        },
        Commands::Run { name } => {
            let config = Config::load(cli.config.as_deref())?;
            config.get(&name)?.clone()
        }
        Commands::List => {
            let config = Config::load(cli.config.as_deref())?;
            list_edits(&config, cli.json)?;
            return Ok(0);
        }
    };

    if !cli.json {
        println!("{}", edit.describe().cyan());
    }
    let report = edit.execute(&options).await?;
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_status();
    }

    Ok(report.status.exit_code())
}

fn list_edits(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&config.edits)?);
        return Ok(());
    }
    if config.edits.is_empty() {
        println!("No edits configured.");
        return Ok(());
    }
    for (name, edit) in &config.edits {
        println!("{}  {}", name.green(), edit.describe());
    }
    Ok(())
}

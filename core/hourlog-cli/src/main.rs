//! `hourlog`: write, emit and inspect hourly rotated log files.
//!
//! ```bash
//! some-server 2>&1 | hourlog pipe --dir /var/log/some-server --tee
//! hourlog emit warn disk usage at 91%
//! hourlog list --dir /var/log/some-server
//! ```

use clap::{Parser, Subcommand};
use hourlog::{Level, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod emit;
mod files;
mod logging;
mod pipe;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Log(#[from] hourlog::Error),
}

#[derive(Parser, Debug)]
#[command(name = "hourlog", version, about = "Hourly rotating log files")]
struct Cli {
    /// Base directory for log files (defaults to the configured directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy stdin, line by line, into the hourly files
    Pipe {
        /// Also echo every line to stdout
        #[arg(long)]
        tee: bool,
    },
    /// Emit one message through the leveled logger
    Emit {
        /// Minimum level written (defaults to the configured level)
        #[arg(long)]
        threshold: Option<Level>,
        /// Write to the file only, not stdout
        #[arg(long)]
        no_console: bool,
        /// Level of the message: debug, info, warn or error
        level: Level,
        /// Message words, joined by single spaces
        #[arg(required = true, trailing_var_arg = true)]
        words: Vec<String>,
    },
    /// List hourly files, oldest first
    List,
    /// Print the file a write would go to right now
    Path,
}

fn main() -> ExitCode {
    let _guard = logging::init();
    let cli = Cli::parse();

    let mut config = LogConfig::load();
    if let Some(dir) = cli.dir {
        config.dir = dir;
    }

    let result = match cli.command {
        Command::Pipe { tee } => pipe::run(&config.dir, tee).map(|_| ()),
        Command::Emit {
            threshold,
            no_console,
            level,
            words,
        } => {
            if let Some(threshold) = threshold {
                config.level = threshold;
            }
            if no_console {
                config.console = false;
            }
            emit::run(&config, level, &words)
        }
        Command::List => files::list(&config.dir),
        Command::Path => {
            files::print_current_path(&config.dir);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("hourlog: {e}");
            ExitCode::FAILURE
        }
    }
}

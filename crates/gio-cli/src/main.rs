//! gio-activity - host simulator for the activity bridge
//!
//! Reads one command per line from stdin, plays the host OS around a
//! single activity container, and prints protocol lines to stdout.
//! Logs go to stderr (and optionally a file), never stdout.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`GIO_*`)
//! 3. Project config (`.gio/config.toml` under the project root)
//! 4. Global config (`~/.gio/config.toml`, or `--config FILE`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `GIO_DEBUG`: Enable debug logging (`true`/`false`)
//! - `GIO_HOST_VERSION`: Simulated host API level
//! - `GIO_LOG_LEVEL`: Default log level when `RUST_LOG` is unset
//!
//! # Output
//!
//! | Line | Meaning |
//! |------|---------|
//! | `request <id> <capability>` | prompt issued to the host |
//! | `surface: <op>` | call reached the rendering surface |
//! | `notify: <message>` | user-visible permission outcome |
//! | `back: consumed\|finish` | back-press decision |
//! | `low-memory: <n> hooks` | trim hooks run |
//! | `pending <id> <capability>` / `pending: none` | open requests |
//! | `abandoned <id> <capability>` | open request dropped on destroy |
//! | `ignored: <id>` | response matched no open request |
//! | `error: <message>` | rejected command or surface failure |

mod command;
mod console;
mod session;
mod tracing_writer;

use anyhow::{bail, Context, Result};
use clap::Parser;
use gio_auth::{Capability, CapabilitySet, GrantStatus};
use gio_runtime::config::{ConfigLoader, ConfigResolver};
use gio_runtime::{BridgeConfig, ConfigError, SimulatedHost};
use gio_types::HostVersion;
use session::{Flow, Session};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_NAME: &str = "gio-activity.log";

/// Host simulator for the activity bridge
#[derive(Parser, Debug)]
#[command(name = "gio-activity")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable info logging
    #[arg(short, long)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long)]
    project: Option<PathBuf>,

    /// Global config file (defaults to ~/.gio/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Simulated host API level (also: GIO_HOST_VERSION)
    #[arg(long, value_name = "LEVEL")]
    host_version: Option<u32>,

    /// Capabilities the host reports as already granted
    #[arg(long, value_name = "CAPS", value_delimiter = ',')]
    granted: Vec<String>,

    /// Capabilities the host does not support at all
    #[arg(long, value_name = "CAPS", value_delimiter = ',')]
    unsupported: Vec<String>,

    /// Surface consumes back presses instead of finishing
    #[arg(long)]
    consume_back: bool,

    /// Write logs to `<DIR>/gio-activity.log` as well
    #[arg(long, value_name = "DIR")]
    log_file: Option<PathBuf>,
}

/// CLI-based configuration resolver.
///
/// Loads file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    global_config: Option<PathBuf>,
    debug: bool,
    host_version: Option<u32>,
    log_file: Option<PathBuf>,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                eprintln!("Warning: cannot read current directory, using '.': {e}");
                PathBuf::from(".")
            })
        });

        Self {
            project_root,
            global_config: args.config.clone(),
            debug: args.debug,
            host_version: args.host_version,
            log_file: args.log_file.clone(),
        }
    }

    fn resolve(&self) -> Result<BridgeConfig, ConfigError> {
        let mut loader = ConfigLoader::new().with_project_root(&self.project_root);
        if let Some(path) = &self.global_config {
            loader = loader.with_global_config(path);
        }

        let mut config = loader.load()?;
        self.apply(&mut config);
        Ok(config)
    }
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut BridgeConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(level) = self.host_version {
            config.host.version = Some(HostVersion::new(level));
        }
        if let Some(dir) = &self.log_file {
            config.logging.file = true;
            config.logging.file_path = Some(dir.clone());
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver.resolve()?;

    init_tracing(&config, args.verbose);

    info!(
        path = %resolver.project_root.display(),
        host = %config.host.version_or_default(),
        requested = %config.permissions.requested(),
        "Starting activity"
    );

    let host = build_host(&config, &args.granted, &args.unsupported)?;
    let mut session = Session::new(&config, host, args.consume_back);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&mut session, stdin.lock(), stdout.lock())
}

/// Terminal filter priority: debug > verbose > `RUST_LOG` > config.
fn init_tracing(config: &BridgeConfig, verbose: bool) {
    let terminal_filter = if config.debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(&config.logging.level).unwrap_or_else(|e| {
                eprintln!(
                    "Warning: invalid log level '{}', using warn: {e}",
                    config.logging.level
                );
                EnvFilter::new("warn")
            })
        })
    };
    let terminal_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let log_file = if config.logging.file {
        let dir = config
            .logging
            .file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        open_log_file(&dir)
    } else {
        None
    };

    if let Some(file) = log_file {
        let file_filter = EnvFilter::new(if config.debug { "debug" } else { "info" });
        let file_layer = fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(tracing_writer::FileMakeWriter::new(file));

        tracing_subscriber::registry()
            .with(terminal_layer.with_filter(terminal_filter))
            .with(file_layer.with_filter(file_filter))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(terminal_layer.with_filter(terminal_filter))
            .init();
    }
}

/// Opens `<log_dir>/gio-activity.log` in append mode.
///
/// Returns `None` if the directory or file cannot be created (non-fatal).
fn open_log_file(log_dir: &Path) -> Option<Arc<parking_lot::Mutex<std::fs::File>>> {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!(
            "Warning: cannot create log directory {}: {e}",
            log_dir.display()
        );
        return None;
    }

    let log_path = log_dir.join(LOG_FILE_NAME);
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => Some(Arc::new(parking_lot::Mutex::new(file))),
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {e}", log_path.display());
            None
        }
    }
}

/// Builds the simulated host from config plus `--granted`/`--unsupported`.
fn build_host(
    config: &BridgeConfig,
    granted: &[String],
    unsupported: &[String],
) -> Result<SimulatedHost> {
    let host = SimulatedHost::new(config.host.version_or_default());
    for capability in parse_capabilities(granted, "--granted")?.capabilities() {
        host.set_status(capability, GrantStatus::Granted);
    }
    for capability in parse_capabilities(unsupported, "--unsupported")?.capabilities() {
        host.set_status(capability, GrantStatus::Unsupported);
    }
    Ok(host)
}

fn parse_capabilities(names: &[String], flag: &str) -> Result<CapabilitySet> {
    let names: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| !n.trim().is_empty())
        .collect();
    let (set, unknown) = Capability::parse_list(&names);
    if let Some(name) = unknown.first() {
        bail!("unknown capability '{name}' in {flag}");
    }
    Ok(set)
}

/// Feeds `input` to the session line by line until EOF or quit.
fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read stdin")?;
        let (flow, lines) = session.handle_line(&line);
        for out in lines {
            writeln!(output, "{out}")?;
        }
        output.flush()?;

        if flow == Flow::Quit {
            info!("Quit requested");
            return Ok(());
        }
    }
    info!("End of input");
    Ok(())
}

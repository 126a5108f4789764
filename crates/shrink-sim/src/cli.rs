use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use shrink_core::ShrinkConfig;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, SimError};
use crate::runner::{Report, simulate, write_json, write_text};
use crate::script::Script;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SHRINK_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "shrink-sim",
    about = "Replay scripted drag and tap gestures against the swipe-shrink interaction",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a gesture script (TOML).
    Run(RunArgs),

    /// Run the built-in 300x600 scenario.
    Demo(DemoArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Script file.
    #[arg(long)]
    pub script: PathBuf,

    /// Optional shrink config (TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Simulated frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Emit JSON lines instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct DemoArgs {
    /// Emit JSON lines instead of text.
    #[arg(long)]
    pub json: bool,

    /// Simulated frame interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,
}

pub fn run_from_env() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run_script(&args, out),
        Commands::Demo(args) => run_demo(&args, out),
    }
}

fn run_script(args: &RunArgs, out: &mut impl Write) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let script = Script::load(&args.script)?;
    let report = simulate(&script, config, frame_step(args.frame_ms)?)?;
    emit(&report, args.json, out)
}

fn run_demo(args: &DemoArgs, out: &mut impl Write) -> Result<()> {
    let script = Script::demo()?;
    let report = simulate(&script, ShrinkConfig::default(), frame_step(args.frame_ms)?)?;
    emit(&report, args.json, out)
}

fn load_config(path: Option<&PathBuf>) -> Result<ShrinkConfig> {
    let Some(path) = path else {
        return Ok(ShrinkConfig::default());
    };
    if !path.exists() {
        return Err(SimError::MissingPath { path: path.clone() });
    }
    Ok(ShrinkConfig::from_toml_file(path)?)
}

fn frame_step(frame_ms: u64) -> Result<Duration> {
    if frame_ms == 0 {
        return Err(SimError::invalid("--frame-ms must be at least 1"));
    }
    Ok(Duration::from_millis(frame_ms))
}

fn emit(report: &Report, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        write_json(report, out)
    } else {
        write_text(report, out)
    }
}

/// Install a stderr subscriber filtered by `SHRINK_LOG` (default `warn`).
///
/// A second call is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use tempfile::tempdir;

    use super::{Cli, Commands, DemoArgs, RunArgs, run};
    use crate::error::SimError;

    fn run_args(script: PathBuf) -> RunArgs {
        RunArgs {
            script,
            config: None,
            frame_ms: 16,
            json: false,
        }
    }

    #[test]
    fn demo_command_dispatches_successfully() {
        let mut out = Vec::new();
        let result = run(
            Cli {
                command: Commands::Demo(DemoArgs {
                    json: false,
                    frame_ms: 16,
                }),
            },
            &mut out,
        );
        assert!(result.is_ok());
        assert!(String::from_utf8_lossy(&out).contains("final: full"));
    }

    #[test]
    fn run_command_reports_missing_script() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        let mut out = Vec::<u8>::new();
        let error = run(
            Cli {
                command: Commands::Run(run_args(missing.clone())),
            },
            &mut out,
        )
        .expect_err("missing script should fail");
        assert!(matches!(
            &error,
            SimError::MissingPath { path } if *path == missing
        ));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn run_command_rejects_zero_frame_step() {
        let dir = tempdir().expect("tempdir");
        let script = dir.path().join("s.toml");
        std::fs::write(&script, "container = { width = 300, height = 600 }\n").expect("write");
        let mut args = run_args(script);
        args.frame_ms = 0;
        let error = run(
            Cli {
                command: Commands::Run(args),
            },
            &mut Vec::<u8>::new(),
        )
        .expect_err("zero frame step");
        assert!(matches!(error, SimError::InvalidArgument { .. }));
    }

    #[test]
    fn run_command_reports_missing_config() {
        let dir = tempdir().expect("tempdir");
        let script = dir.path().join("s.toml");
        std::fs::write(&script, "container = { width = 300, height = 600 }\n").expect("write");
        let mut args = run_args(script);
        args.config = Some(dir.path().join("absent.toml"));
        let error = run(
            Cli {
                command: Commands::Run(args),
            },
            &mut Vec::<u8>::new(),
        )
        .expect_err("missing config");
        assert!(matches!(error, SimError::MissingPath { .. }));
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "shrink-sim",
            "run",
            "--script",
            "a.toml",
            "--frame-ms",
            "8",
            "--json",
        ])
        .expect("parse");
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.script, PathBuf::from("a.toml"));
        assert_eq!(args.frame_ms, 8);
        assert!(args.json);
        assert!(args.config.is_none());
    }
}

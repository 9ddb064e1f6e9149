use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use routetopo::config::{ConfigError, PolicyOverrides};
use routetopo::policy::Mode;
use routetopo::replay::{self, Script};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid script: {0}")]
    InvalidScript(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Viewer,
    Editor,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Viewer => Mode::Viewer,
            ModeArg::Editor => Mode::Editor,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "routetopo", about = "Replay route-editing gestures and inspect viewport policies")]
struct Cli {
    /// Viewport preset; overrides ROUTETOPO_MODE.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Pretty-print JSON output.
    #[arg(long, env = "ROUTETOPO_PRETTY")]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON input script and print the resulting actions and state.
    Replay { script: PathBuf },
    /// Print the resolved viewport policy.
    Policy,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut overrides = PolicyOverrides::from_env()?;
    if let Some(mode) = cli.mode {
        overrides.mode = Some(mode.into());
    }
    let policy = overrides.resolve(Mode::Editor)?;

    let output = match cli.command {
        Command::Policy => to_json(&policy, cli.pretty)?,
        Command::Replay { script } => {
            let raw = fs::read_to_string(&script).map_err(|source| CliError::Read { path: script.clone(), source })?;
            let parsed: Script = serde_json::from_str(&raw)?;
            tracing::info!(events = parsed.events.len(), path = %script.display(), "replaying script");
            to_json(&replay::run(&parsed, policy), cli.pretty)?
        }
    };
    println!("{output}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) }
}

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use contracts::SinkType;

/// tzclock - a live analog/digital clock for any IANA timezone
#[derive(Parser, Debug)]
#[command(
    name = "tzclock",
    author,
    version,
    about = "Live analog/digital clock for any timezone",
    long_about = "Renders the wall-clock time of a selected IANA timezone every frame.\n\n\
                  Unknown or empty timezones fall back to the local zone. Frames go to \n\
                  the configured sinks: terminal dial, log lines or a JSON-lines file."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "TZCLOCK_VERBOSE")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format (logs go to stderr)
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "TZCLOCK_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the clock until Ctrl+C or the frame limit
    Run(RunArgs),

    /// Resolve the time once and print it
    Now(NowArgs),

    /// List selectable timezones
    Zones(ZonesArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Timezone and hour-format overrides shared by `run` and `now`
#[derive(Args, Debug, Clone, Default)]
pub struct ClockOverrides {
    /// Path to configuration file (TOML or JSON); defaults apply when omitted
    #[arg(short, long, env = "TZCLOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Target timezone (IANA name); empty means the local zone
    #[arg(short, long, env = "TZCLOCK_TIMEZONE")]
    pub timezone: Option<String>,

    /// Show 24-hour time
    #[arg(long = "24h", conflicts_with = "twelve_hour")]
    pub twenty_four_hour: bool,

    /// Show 12-hour time with AM/PM
    #[arg(long = "12h")]
    pub twelve_hour: bool,
}

impl ClockOverrides {
    /// Hour format requested on the command line, if any
    pub fn use_24h(&self) -> Option<bool> {
        match (self.twenty_four_hour, self.twelve_hour) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub clock: ClockOverrides,

    /// Override the frame rate (Hz)
    #[arg(long, env = "TZCLOCK_FPS")]
    pub fps: Option<f64>,

    /// Stop after this many frames (0 = until Ctrl+C)
    #[arg(long, default_value = "0", env = "TZCLOCK_FRAMES")]
    pub frames: u64,

    /// Replace the configured sinks (repeatable)
    #[arg(long = "sink", value_enum)]
    pub sinks: Vec<SinkKind>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "TZCLOCK_METRICS_PORT")]
    pub metrics_port: u16,

    /// Validate configuration and exit without running
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `now` command
#[derive(Parser, Debug, Clone)]
pub struct NowArgs {
    #[command(flatten)]
    pub clock: ClockOverrides,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `zones` command
#[derive(Parser, Debug)]
pub struct ZonesArgs {
    /// Only list zones containing this text (case-insensitive)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "tzclock.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file; defaults apply when omitted
    #[arg(short, long, env = "TZCLOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show sink parameters
    #[arg(long)]
    pub sinks: bool,
}

/// Sink selectable with `run --sink`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkKind {
    Terminal,
    Log,
    File,
}

impl SinkKind {
    pub fn sink_type(self) -> SinkType {
        match self {
            Self::Terminal => SinkType::Terminal,
            Self::Log => SinkType::Log,
            Self::File => SinkType::File,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Log => "log",
            Self::File => "file",
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::try_parse_from([
            "tzclock",
            "run",
            "--timezone",
            "Asia/Tokyo",
            "--12h",
            "--fps",
            "30",
            "--frames",
            "10",
            "--sink",
            "log",
            "--sink",
            "file",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.clock.timezone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(args.clock.use_24h(), Some(false));
        assert_eq!(args.fps, Some(30.0));
        assert_eq!(args.frames, 10);
        assert_eq!(args.sinks, vec![SinkKind::Log, SinkKind::File]);
    }

    #[test]
    fn test_hour_flags_conflict() {
        assert!(Cli::try_parse_from(["tzclock", "now", "--24h", "--12h"]).is_err());
    }

    #[test]
    fn test_no_hour_flag_keeps_config() {
        let cli = Cli::try_parse_from(["tzclock", "now", "--json"]).unwrap();
        let Commands::Now(args) = cli.command else {
            panic!("expected now");
        };
        assert_eq!(args.clock.use_24h(), None);
        assert!(args.json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tzclock", "zones", "-vv", "--log-format", "json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.log_format, LogFormat::Json));
    }
}

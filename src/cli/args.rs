// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Scan Options:
    --session, -s <DIR>    Recorded session directory (one <step-id>.json per pose step)
    --timer <SECONDS>      Countdown seconds before each capture commits [default: 3]
    --units <UNITS>        Display units for results (inches or cm) [default: inches]
    --export, -e <PATH>    Export artifact path [default: body-measurements-<date>.json]
    --save                 Save annotated snapshot overlays next to the export
    --store <DIR>          Persist results to a measurement store rooted at this directory
    --profile <ID>         Attach the measurement to an existing profile id
    --verbose              Show verbose output

Examples:
    bodyscan scan --session recordings/alice/
    bodyscan scan --session recordings/alice/ --units cm
    bodyscan scan -s recordings/alice/ --timer 0 --export results.json
    bodyscan scan -s recordings/alice/ --save --store ./measurement-store
    bodyscan steps"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded capture session and compute body measurements
    Scan(ScanArgs),
    /// List the guided capture steps
    Steps,
}

/// Arguments for the scan command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Recorded session directory (one <step-id>.json frame per pose step)
    #[arg(short, long)]
    pub session: String,

    /// Countdown seconds before each capture commits (0 = immediate)
    #[arg(long, default_value_t = 3)]
    pub timer: u32,

    /// Display units for results (inches or cm)
    #[arg(long, default_value = "inches")]
    pub units: String,

    /// Export artifact path (defaults to a dated file name)
    #[arg(short, long)]
    pub export: Option<String>,

    /// Save annotated snapshot overlays next to the export
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Persist results to a measurement store rooted at this directory
    #[arg(long)]
    pub store: Option<String>,

    /// Existing profile id to attach the measurement to
    #[arg(long)]
    pub profile: Option<String>,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use bodyscan::cli::args::{Cli, Commands};
use bodyscan::cli::scan::{print_steps, run_scan};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => run_scan(&args),
        Commands::Steps => print_steps(),
    }
}

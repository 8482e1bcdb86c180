mod cli;

use clap::{Parser, Subcommand};
use spyglass_core::config::MonitorConfig;
use spyglass_core::logging::{self, LogMode, init_logging};
use spyglass_core::monitor;

#[derive(Parser, Debug)]
#[command(
    name = "spyglass",
    version,
    about = "Spyglass: HTTP access log monitoring agent"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the agent's JSON log events from stdin
    Logs {
        #[arg(long)]
        pretty: bool,

        #[arg(long)]
        raw: bool,
    },

    /// Tail the access log and report statistics (default)
    Run {
        /// Path to the spyglass config file
        #[arg(long, default_value = "config/spyglass.toml")]
        config: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Logs { pretty, raw }) => {
            let mode = if raw {
                LogMode::Raw
            } else if pretty {
                LogMode::Pretty
            } else {
                logging::default_log_mode()
            };
            cli::logs::run_logs(mode).expect("Failed to run logs command");
        }

        Some(Command::Run { config }) => run_monitor(&config),

        None => run_monitor("config/spyglass.toml"),
    }
}

fn run_monitor(config_path: &str) {
    let cfg = MonitorConfig::from_file(config_path).expect("Failed to load spyglass config");

    init_logging(&cfg.log_level);
    cfg.log();

    monitor::run(cfg).expect("Failed to start spyglass agent");
}

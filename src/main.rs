mod commands;
mod render;
mod server;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use flight2ics_core::config::Flight2IcsConfig;
use flight2ics_core::lookup::MockFlightLookup;

#[derive(Parser)]
#[command(name = "flight2ics")]
#[command(about = "Look up a flight and export it as a calendar invite (.ics)")]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the details of a flight
    Lookup {
        /// Flight number, e.g. "AA123"
        flight: String,
    },
    /// Write a calendar invite for a flight
    Ics {
        /// Flight number, e.g. "AA123"
        flight: String,

        /// Directory to write flight-<number>.ics into (defaults to output_dir from config)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the invite instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Show the flight details stored in an .ics file
    Inspect {
        /// Path to an .ics file
        file: PathBuf,
    },
    /// Serve flight lookups and invites over HTTP
    Serve {
        /// Port to listen on (defaults to server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show config location and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = Flight2IcsConfig::load()?;
    let lookup = MockFlightLookup::new(&config.lookup);

    match cli.command {
        Commands::Lookup { flight } => commands::lookup::run(&lookup, &flight).await,
        Commands::Ics {
            flight,
            output,
            stdout,
        } => {
            let target = if stdout {
                commands::ics::Target::Stdout
            } else {
                commands::ics::Target::Dir(output.unwrap_or_else(|| config.output_path()))
            };
            commands::ics::run(&lookup, &config.ics, &flight, target).await
        }
        Commands::Inspect { file } => commands::inspect::run(&file),
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            commands::serve::run(config, lookup, port).await
        }
        Commands::Config => commands::config::run(&config),
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use satoshi_dalasi::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Quote provider base URL, overrides the configuration file
    #[arg(short, long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for satoshi_dalasi::AppCommand {
    fn from(cmd: Commands) -> satoshi_dalasi::AppCommand {
        match cmd {
            Commands::Convert { fiat, crypto } => {
                satoshi_dalasi::AppCommand::Convert { fiat, crypto }
            }
            Commands::Interactive => satoshi_dalasi::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount once and print both directions
    Convert {
        /// Fiat amount; takes priority when both amounts are given
        #[arg(short, long)]
        fiat: Option<String>,

        /// Crypto amount in the smallest unit
        #[arg(short = 'k', long)]
        crypto: Option<String>,
    },
    /// Edit amounts and convert from an interactive prompt
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => satoshi_dalasi::cli::setup::setup(),
        Some(cmd) => {
            satoshi_dalasi::run_command(
                cmd.into(),
                cli.config_path.as_deref(),
                cli.base_url.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

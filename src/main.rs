use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use wp_timeline::OutputFormat;
use wp_timeline::commands;
use wp_timeline::commands::InputArgs;
use wp_timeline::config;
use wp_timeline::logging;

#[derive(Parser)]
#[command(name = "wpt")]
#[command(about = "Status dwell-time timelines for work packages")]
#[command(version)]
struct Cli {
    #[arg(short, long, global = true, help = "Log engine decisions to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct the status timeline from an activity export
    Timeline {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show time spent per status
    Summary {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Inspect configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    List,
    /// Print a single value, e.g. timeline.minimum_unit
    Get { key: String },
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        #[arg(long, help = "Overwrite an existing config file")]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    match &cli.command {
        Commands::Timeline { input, format } => {
            commands::timeline::run(&config::load()?, input, *format)?;
        }
        Commands::Summary { input, format } => {
            commands::summary::run(&config::load()?, input, *format)?;
        }
        // `path` and `init` must work even when the existing file is invalid
        Commands::Config(args) => match &args.action {
            ConfigAction::List => commands::config::list(&config::load()?)?,
            ConfigAction::Get { key } => commands::config::get(key, &config::load()?)?,
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Init { force } => commands::config::init(*force)?,
        },
    }

    Ok(())
}

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use nameforge::config::Config;
use nameforge::NfResult;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file. Flags given on the command line win.
    #[arg(global = true, long)]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Generate(cmd::generate::GenerateArgs),
    Score(cmd::score::ScoreArgs),
    TableStats(cmd::stats::StatsArgs),
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// File configuration (if any) with explicit command-line values on top.
fn resolve_config(path: Option<&str>, cli: &Config, matches: &ArgMatches) -> NfResult<Config> {
    match path {
        Some(path) => {
            info!("⚙️  Loading configuration from {}", path);
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(cli, matches);
            Ok(config)
        }
        None => Ok(cli.clone()),
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> NfResult<()> {
    let sub_matches = matches
        .subcommand()
        .map(|(_, m)| m)
        .unwrap_or(matches);
    let config_file = cli.config_file.as_deref();

    match cli.command {
        Commands::Generate(args) => {
            let config = resolve_config(config_file, &args.config, sub_matches)?;
            cmd::generate::run(&args, config)
        }
        Commands::Score(args) => {
            let config = resolve_config(config_file, &args.config, sub_matches)?;
            cmd::score::run(&args, config)
        }
        Commands::TableStats(args) => cmd::stats::run(&args),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);

    if let Err(e) = run(cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

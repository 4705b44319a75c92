use crate::reports;
use clap::Args;
use nameforge::config::Config;
use nameforge::{Engine, NfResult};

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    pub family: String,

    pub given: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ScoreArgs, config: Config) -> NfResult<()> {
    let engine = Engine::load(&config.data)?;
    let report = engine.score_name(&args.family, &args.given)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        reports::print_grid_report(&format!("{}{}", args.family, args.given), &report);
    }
    Ok(())
}

use crate::reports;
use clap::Args;
use nameforge::config::Config;
use nameforge::ganzhi::FourPillars;
use nameforge::generator::Constraints;
use nameforge::{Engine, NfResult};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Family name, one or two characters.
    pub family: String,

    /// Four pillars of the birth chart, e.g. "甲子,丙寅,戊辰,庚申".
    #[arg(long)]
    pub pillars: Option<String>,

    /// Print the report as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &GenerateArgs, config: Config) -> NfResult<()> {
    let pillars = args
        .pillars
        .as_deref()
        .map(str::parse::<FourPillars>)
        .transpose()?;

    info!("📂 Loading data from {}", config.data.data_dir.display());
    let mut engine = Engine::load(&config.data)?;
    engine.init();

    let constraints = Constraints::from_search(&args.family, &config.search);
    let report = engine.kirsen(&constraints, pillars.as_ref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    reports::print_name_list(&report.list);
    if let Some(chart) = &report.chart {
        reports::print_chart(chart);
    }
    if !report.folkways.is_empty() {
        reports::print_folkways(&report.folkways);
    }
    println!("Total: {}", report.total);
    Ok(())
}

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use radiomast_config::{plan::load_plan, RadiomastConfig};
use radiomast_core::technology::Generation;
use radiomast_engine::{SimulationError, StationRuntime};
use radiomast_simulator::ConsoleSink;
use radiomast_sizing::CoreSizer;
use radiomast_tower::CellTower;

use crate::render;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one full station cycle (allocate, transmit, report)
    Run(RunArgs),
    /// Print channel capacity figures for a radio configuration
    Capacity(CapacityArgs),
    /// Dry-run a deployment plan through the registration gate
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Deployment plan file applied before the cycle
    #[arg(short, long)]
    pub plan: Option<PathBuf>,
    /// Configuration file (defaults to config/radiomast.yaml plus env)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Placement strategy override (round_robin or best_fit)
    #[arg(long)]
    pub strategy: Option<String>,
    /// Write the cycle report to this path as YAML
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CapacityArgs {
    /// Technology generation token (2G, 3G, 4G, 5G)
    #[arg(short, long)]
    pub technology: String,
    /// Spectrum allotment in MHz
    #[arg(short, long, default_value_t = 1.0)]
    pub bandwidth_mhz: f64,
    /// MIMO antenna count
    #[arg(short, long, default_value_t = 1)]
    pub antennas: u32,
    /// Also size the core network for this many payload messages
    #[arg(short, long)]
    pub messages: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Deployment plan file to validate
    #[arg(short, long)]
    pub plan: PathBuf,
    /// Configuration file (defaults to config/radiomast.yaml plus env)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<RadiomastConfig, SimulationError> {
    let config = match path {
        Some(path) => RadiomastConfig::load_from_path(path)?,
        None => RadiomastConfig::load()?,
    };
    Ok(config)
}

/// Runs one allocate/transmit/report cycle and renders every section of
/// the station report.
pub async fn run_station(args: RunArgs) -> Result<(), SimulationError> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(strategy) = &args.strategy {
        config.station.strategy = strategy.clone();
    }
    let runtime = StationRuntime::new(config)?;

    if let Some(path) = &args.plan {
        let plan = load_plan(path)?;
        let summary = runtime.ingest_plan(&plan);
        println!(
            "Plan {}: {} admitted, {} rejected",
            path.display(),
            summary.admitted,
            summary.rejected
        );
    }

    let report = runtime.run_cycle(Arc::new(ConsoleSink)).await?;

    println!("\n--- SIMULATION COMPLETE ---\n");
    print!("{}", render::spectrum_map(&report.spectrum));

    let bars = render::traffic_bars(&report.outcomes);
    if !bars.is_empty() {
        println!();
        print!("{bars}");
    }

    println!();
    print!("{}", render::analytics_block(&report));
    println!();
    print!("{}", render::status_panel(&runtime.status()));
    println!();
    print!("{}", render::subscriber_table(&report.outcomes));

    if let Some(path) = &args.output {
        report.save(path)?;
        info!("Report written to {}", path.display());
    }
    Ok(())
}

/// Prints the channel arithmetic for one radio configuration, without
/// touching any roster state.
pub fn show_capacity(args: CapacityArgs) -> Result<(), SimulationError> {
    let generation: Generation = args.technology.parse()?;

    let tower = CellTower::new();
    tower.set_technology(generation);
    tower.set_bandwidth(args.bandwidth_mhz);
    tower.set_antennas(args.antennas);

    println!("Technology        : {generation}");
    println!("Bandwidth         : {} MHz", args.bandwidth_mhz);
    println!("Antennas          : {}x MIMO", args.antennas);
    println!("Channels          : {}", tower.channel_count());
    println!("Users per channel : {}", tower.per_channel_capacity());
    println!("Total capacity    : {}", tower.total_capacity());

    if let Some(messages) = args.messages {
        let sizer = CoreSizer::default();
        println!("Network overhead  : {} msgs", sizer.overhead_for(messages));
        println!("Cores needed      : {}", sizer.cores_needed(messages));
    }
    Ok(())
}

/// Replays a plan through configuration and admission without simulating,
/// reporting what a real run would accept.
pub fn check_plan(args: CheckArgs) -> Result<(), SimulationError> {
    let config = load_config(args.config.as_ref())?;
    let runtime = StationRuntime::new(config)?;
    let plan = load_plan(&args.plan)?;
    let summary = runtime.ingest_plan(&plan);

    println!("Plan {}", args.plan.display());
    println!(" Directives applied   : {}", summary.directives);
    println!(" Subscribers admitted : {}", summary.admitted);
    println!(" Subscribers rejected : {}", summary.rejected);
    println!(" Lines skipped        : {}", summary.skipped_lines);
    println!(" Planned messages     : {}", runtime.planned_messages());
    println!(" Station capacity     : {}", runtime.tower().total_capacity());
    Ok(())
}

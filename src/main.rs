use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use clap::Parser;
use tracing::{error, info};

use elevator_sim::config::{AlgorithmId, LogConfig, LogTarget, SimulationConfig};
use elevator_sim::{logging, Simulation};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(long, default_value = "100")]
    floors: usize,

    #[clap(long, default_value = "25")]
    elevators: usize,

    #[clap(long, default_value = "10")]
    capacity: usize,

    #[clap(long, default_value = "10000")]
    persons: usize,

    /// Dispatch algorithm to run, may be repeated. Runs every algorithm if omitted.
    #[clap(long = "algorithm")]
    algorithms: Vec<AlgorithmId>,

    /// Seed for reproducible person generation.
    #[clap(long)]
    seed: Option<u64>,

    /// Interval between two dispatcher ticks in microseconds.
    #[clap(long, default_value = "1000")]
    tick_us: u64,

    /// Write logs to this file instead of stdout.
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `elevator_sim=debug`.
    #[clap(long, default_value = "info")]
    log_filter: String,

    /// Directory the reports are written to.
    #[clap(long, default_value = ".")]
    out_dir: PathBuf
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let log = LogConfig {
        target: args.log_file.map(LogTarget::File).unwrap_or(LogTarget::Stdout),
        filter: args.log_filter
    };
    let _guard = match logging::init(&log, "elevator_sim") {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut config = SimulationConfig::new(args.floors, args.elevators, args.capacity, args.persons)
        .with_tick_interval(Duration::from_micros(args.tick_us))
        .with_log(log);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let simulation = Simulation::new(config, args.algorithms, args.out_dir);
    match simulation.run().await {
        Ok(runs) => {
            for run in runs {
                info!(
                    algorithm = %run.algorithm,
                    ticks = run.summary.ticks,
                    mean_waiting_time = run.report.mean_waiting_time,
                    mean_travel_time = run.report.mean_travel_time,
                    "Finished {}",
                    run.report_path.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Simulation failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

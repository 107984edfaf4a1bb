//! This module contains the [Controller], which wires up and runs one simulation.

use std::sync::Arc;
use futures::future::join_all;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{info, instrument, warn};

use crate::barrier::CompletionBarrier;
use crate::building::Building;
use crate::config::{ConfigError, SimulationConfig};
use crate::dispatch::{DispatchError, DispatchStrategy, Dispatcher};
use crate::elevator::{ElevatorActor, ElevatorStats};
use crate::person::PersonGenerator;
use crate::report::{PersonRecord, ReportError, ReportSink, SimulationReport};
use crate::shutdown;

#[derive(Error, Debug)]
/// This enum represents everything which can end a simulation early.
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("A simulation task failed: {0}")]
    Join(#[from] JoinError),
    #[error("This controller has already run its simulation")]
    AlreadyRan
}

/// Outcome of [Controller::run].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of ticks the dispatcher executed.
    pub ticks: u64,
    /// Number of persons which reached their destination.
    pub arrived: usize
}

/// Composition root of a simulation.
///
/// A controller runs exactly once: it creates the elevators, the person generator and the
/// dispatcher, waits until every person has arrived, stops all tasks and keeps the results
/// for [Controller::evaluate].
/// # Example
///
/// ```
/// use std::time::Duration;
/// use elevator_sim::config::SimulationConfig;
/// use elevator_sim::controller::Controller;
/// use elevator_sim::report::WriterSink;
///
/// #[tokio::main]
/// async fn main() {
///     let config = SimulationConfig::new(5, 2, 3, 10)
///         .with_seed(7)
///         .with_tick_interval(Duration::from_micros(100));
///     let mut controller = Controller::new(config).unwrap();
///     let summary = controller.run_configured().await.unwrap();
///     assert_eq!(summary.arrived, 10);
///
///     let mut sink = WriterSink::new("stdout", std::io::stdout());
///     controller.evaluate(&mut sink).unwrap();
/// }
/// ```
pub struct Controller {
    config: SimulationConfig,
    building: Arc<Building>,
    report: Option<SimulationReport>,
    ran: bool
}

impl Controller {
    /// Validates the configuration and creates the empty building. No task is started yet.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        // a floor holds at most as many waiting persons as fit into one elevator
        let building = Building::new(config.floor_count, config.elevator_capacity);
        Ok(Self {
            config,
            building,
            report: None,
            ran: false
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn building(&self) -> &Arc<Building> {
        &self.building
    }

    /// Runs the simulation with the algorithm selected in the configuration.
    pub async fn run_configured(&mut self) -> Result<RunSummary, SimulationError> {
        let strategy = self.config.algorithm.strategy(self.config.floor_count);
        self.run(strategy).await
    }

    /// Runs the simulation with the given algorithm and returns once every person has arrived and
    /// every task has stopped. A failing dispatcher ends the run early with its error, after all
    /// tasks have been stopped as well.
    #[instrument(skip_all, fields(algorithm = strategy.name()))]
    pub async fn run(&mut self, strategy: Box<dyn DispatchStrategy>) -> Result<RunSummary, SimulationError> {
        if self.ran {
            return Err(SimulationError::AlreadyRan);
        }
        self.ran = true;

        let config = &self.config;
        let barrier = Arc::new(CompletionBarrier::new(config.person_count));
        let (trigger, shutdown) = shutdown::channel();
        info!(
            floors = config.floor_count,
            elevators = config.elevator_count,
            capacity = config.elevator_capacity,
            persons = config.person_count,
            "Starting simulation"
        );

        let mut dispatcher = Dispatcher::new(self.building.clone(), strategy);
        let mut elevators = Vec::with_capacity(config.elevator_count);
        for id in 0..config.elevator_count {
            let (elevator, addr) = ElevatorActor::new(id, config.elevator_capacity, self.building.clone());
            dispatcher.attach(addr, elevator.status());
            elevators.push(tokio::spawn(elevator.run(shutdown.clone())));
        }

        let generator = PersonGenerator::new(config, self.building.clone(), barrier.clone());
        let generator = tokio::spawn(generator.run(shutdown.clone()));
        let mut dispatcher = tokio::spawn(dispatcher.run(config.tick_interval, shutdown));

        let failed_early = tokio::select! {
            _ = barrier.wait() => None,
            result = &mut dispatcher => Some(result)
        };
        trigger.trigger();

        let dispatched = match failed_early {
            Some(result) => {
                warn!("Dispatcher stopped before every person arrived");
                result
            }
            None => dispatcher.await
        };
        let stats = join_all(elevators).await.into_iter().collect::<Result<Vec<ElevatorStats>, JoinError>>();
        let arrived = generator.await;

        let ticks = dispatched??;
        let stats = stats?;
        let arrived = arrived?;

        let persons = self
            .building
            .persons()
            .iter()
            .map(|person| PersonRecord::from(person.as_ref()))
            .collect();
        self.report = Some(SimulationReport::new(stats, persons));

        info!(ticks, arrived, "Simulation finished");
        Ok(RunSummary { ticks, arrived })
    }

    /// Report of the finished run, `None` before [Controller::run] succeeded.
    pub fn report(&self) -> Option<&SimulationReport> {
        self.report.as_ref()
    }

    /// Hands the report of the finished run to `sink`.
    pub fn evaluate(&self, sink: &mut dyn ReportSink) -> Result<(), ReportError> {
        match &self.report {
            Some(report) => sink.write_report(report),
            None => Err(ReportError::NotFinished)
        }
    }
}

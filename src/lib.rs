//! This library simulates the elevators of a building. Every elevator and every person runs as its
//! own task, while a dispatcher advances the whole building one tick at a time: each tick it gives
//! every elevator exactly one command and waits for the elevator to acknowledge it before moving on.
//! Which command an elevator gets is decided by a pluggable [DispatchStrategy].
//!
//! A [Controller] runs one simulation until every person has reached their destination and
//! produces a [SimulationReport]. [Simulation] compares several dispatch algorithms on the same
//! parameters. The [testing] module offers a building which is stepped by hand for reproducible
//! tests.

pub mod barrier;
pub mod building;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod elevator;
pub mod floor;
pub mod logging;
pub mod message;
pub mod person;
pub mod report;
pub mod shutdown;
pub mod simulation;

pub mod testing;

pub use config::{AlgorithmId, SimulationConfig};
pub use controller::{Controller, RunSummary, SimulationError};
pub use dispatch::DispatchStrategy;
pub use report::{ReportSink, SimulationReport};
pub use simulation::Simulation;

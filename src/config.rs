//! This module contains the immutable parameters of a simulation run and their validation.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default interval between two dispatcher ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Default upper bound (exclusive) of the random pause between two generated persons.
pub const DEFAULT_MAX_ARRIVAL_DELAY: Duration = Duration::from_micros(1000);

#[derive(Error, Debug, PartialEq, Eq)]
/// This enum represents invalid simulation parameters. All of them are detected before any task is started.
pub enum ConfigError {
    #[error("A building needs at least 2 floors, got {0}")]
    TooFewFloors(usize),
    #[error("At least one elevator is required")]
    NoElevators,
    #[error("Elevator capacity must be at least 1")]
    ZeroCapacity,
    #[error("The tick interval must be greater than zero")]
    ZeroTickInterval,
    #[error("Unknown dispatch algorithm '{0}'")]
    UnknownAlgorithm(String),
    #[error("Floor {floor} is outside of the building (floor count {floor_count})")]
    FloorOutOfRange { floor: usize, floor_count: usize },
    #[error("A person cannot start and end on the same floor ({0})")]
    SameFloorJourney(usize),
    #[error("Floor {floor} cannot hold more than {capacity} waiting persons")]
    FloorOverCapacity { floor: usize, capacity: usize }
}

/// Identifies one of the available dispatch algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// Nearest elevator with spare capacity per request, nearest pending destination per elevator.
    NearestRequest,
    /// Loaded elevators head for the most requested destination of their passengers.
    MostRequestedDestination
}

impl AlgorithmId {
    /// All algorithms in a stable order.
    pub const ALL: [AlgorithmId; 2] = [AlgorithmId::NearestRequest, AlgorithmId::MostRequestedDestination];

    /// Canonical name, also used for report file names.
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmId::NearestRequest => "simple",
            AlgorithmId::MostRequestedDestination => "most-requested"
        }
    }
}

impl Display for AlgorithmId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AlgorithmId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" | "nearest" | "nearest-request" => Ok(AlgorithmId::NearestRequest),
            "most-requested" | "most_requested" | "most-requested-destination" => Ok(AlgorithmId::MostRequestedDestination),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_owned()))
        }
    }
}

/// Where log output is written to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    File(PathBuf)
}

/// Logging configuration handed to the process at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub target: LogTarget,
    /// Filter directive in `EnvFilter` syntax, e.g. `info` or `elevator_sim=debug`.
    pub filter: String
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::Stdout,
            filter: "info".to_owned()
        }
    }
}

/// Immutable parameters of one simulation. Build it with [SimulationConfig::new] and the `with_*`
/// methods, then hand it to a [Controller](crate::controller::Controller), which validates it.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub floor_count: usize,
    pub elevator_count: usize,
    pub elevator_capacity: usize,
    pub person_count: usize,
    pub algorithm: AlgorithmId,
    pub tick_interval: Duration,
    pub max_arrival_delay: Duration,
    pub seed: Option<u64>,
    pub log: LogConfig
}

impl SimulationConfig {
    pub fn new(floor_count: usize, elevator_count: usize, elevator_capacity: usize, person_count: usize) -> Self {
        Self {
            floor_count,
            elevator_count,
            elevator_capacity,
            person_count,
            algorithm: AlgorithmId::NearestRequest,
            tick_interval: DEFAULT_TICK_INTERVAL,
            max_arrival_delay: DEFAULT_MAX_ARRIVAL_DELAY,
            seed: None,
            log: LogConfig::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Makes person generation reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn with_max_arrival_delay(mut self, max_arrival_delay: Duration) -> Self {
        self.max_arrival_delay = max_arrival_delay;
        self
    }

    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Checks all parameters. A valid configuration never produces an invalid building.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floor_count < 2 {
            return Err(ConfigError::TooFewFloors(self.floor_count));
        }
        if self.elevator_count < 1 {
            return Err(ConfigError::NoElevators);
        }
        if self.elevator_capacity < 1 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

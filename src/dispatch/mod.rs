//! This module contains the [Dispatcher] control loop and the dispatch algorithms it can run.
//! Every algorithm implements [DispatchStrategy]:
//! ```
//! use elevator_sim::config::AlgorithmId;
//! use elevator_sim::dispatch::strategies::MostRequestedDestination;
//! use elevator_sim::dispatch::DispatchStrategy;
//!
//! let strategy = MostRequestedDestination::new(10);
//! assert_eq!(strategy.name(), "most-requested");
//! assert_eq!(AlgorithmId::MostRequestedDestination.strategy(10).name(), "most-requested");
//! ```

mod dispatcher;
mod most_requested;
mod nearest_request;
mod strategy;

pub use dispatcher::{DispatchError, Dispatcher};
pub use strategy::{closest_with_capacity, toward, DispatchStrategy};
pub mod strategies {
    pub use super::most_requested::MostRequestedDestination;
    pub use super::nearest_request::NearestRequest;
}

use crate::config::AlgorithmId;

impl AlgorithmId {
    /// Creates a fresh instance of the algorithm for a building with `floor_count` floors.
    pub fn strategy(&self, floor_count: usize) -> Box<dyn DispatchStrategy> {
        match self {
            AlgorithmId::NearestRequest => strategies::NearestRequest::new(floor_count),
            AlgorithmId::MostRequestedDestination => strategies::MostRequestedDestination::new(floor_count)
        }
    }
}

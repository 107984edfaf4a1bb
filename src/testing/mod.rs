//! The functions and structs contained within this module can be used to test dispatch behavior
//! tick by tick.
//!
//! A [Scenario] queues up a fixed list of persons before the first tick and lets the caller step
//! the dispatcher by hand, so the sequence of commands is reproducible.
//!
//! Example:
//! ```
//! use elevator_sim::config::AlgorithmId;
//! use elevator_sim::message::Command;
//! use elevator_sim::testing::ScenarioBuilder;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut scenario = ScenarioBuilder::new(3, 1, 1)
//!         .algorithm(AlgorithmId::NearestRequest)
//!         .person(0, 1)
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let trace = scenario.run_until_arrived(10).await.unwrap();
//!     assert_eq!(trace, vec![
//!         vec![Command::OpenDoors],
//!         vec![Command::Ascend],
//!         vec![Command::OpenDoors],
//!     ]);
//!
//!     let report = scenario.finish().await.unwrap();
//!     assert_eq!(report.persons[0].travel_time, 2);
//! }
//! ```

mod scenario;
pub use scenario::{Scenario, ScenarioBuilder, ScenarioError};

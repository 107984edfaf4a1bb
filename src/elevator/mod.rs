//! This module contains the elevator actor and the types the dispatcher uses to command and
//! observe it.
//! ```
//! use elevator_sim::building::Building;
//! use elevator_sim::elevator::ElevatorActor;
//! use elevator_sim::message::Command;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let building = Building::new(5, 4);
//! let (elevator, addr) = ElevatorActor::new(0, 4, building);
//! let (_trigger, shutdown) = elevator_sim::shutdown::channel();
//! tokio::spawn(elevator.run(shutdown));
//!
//! let status = addr.ask(Command::Ascend).await.unwrap();
//! assert_eq!(status.floor, 1);
//! # }
//! ```

mod address;
mod elevator;
mod status;

pub use address::ElevatorAddr;
pub use elevator::{ElevatorActor, ElevatorError};
pub use status::{ElevatorId, ElevatorStats, ElevatorStatus};

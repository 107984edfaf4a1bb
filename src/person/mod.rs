//! This module contains everything related to passengers: the [Person] record with its journey
//! state machine, the [PersonActor] task, the handles moving through floors and elevators and the
//! [PersonGenerator] creating persons during a run.
//!
//! A journey always runs `Created -> Waiting -> Traveling -> Arrived`:
//! ```
//! use std::sync::Arc;
//! use elevator_sim::barrier::CompletionBarrier;
//! use elevator_sim::person::{Person, PersonActor, PersonState};
//!
//! let person = Arc::new(Person::new(0, 0, 3));
//! let (_actor, _passenger) = PersonActor::new(person.clone(), Arc::new(CompletionBarrier::new(1)));
//! assert_eq!(person.state(), PersonState::Created);
//! ```

mod actor;
mod generator;
mod passenger;
mod person;

pub use actor::PersonActor;
pub use generator::PersonGenerator;
pub use passenger::{Passenger, Rider};
pub use person::{Journey, Person, PersonId, PersonState};

use std::sync::Arc;
use futures::future::join_all;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle, JoinSet};

use crate::barrier::CompletionBarrier;
use crate::building::Building;
use crate::config::{AlgorithmId, ConfigError, SimulationConfig};
use crate::dispatch::{DispatchError, Dispatcher};
use crate::elevator::{ElevatorActor, ElevatorId, ElevatorStats, ElevatorStatus};
use crate::floor::FloorError;
use crate::message::Command;
use crate::person::{Person, PersonActor, PersonId, PersonState};
use crate::report::{PersonRecord, SimulationReport};
use crate::shutdown::{self, ShutdownTrigger};

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Floor(#[from] FloorError)
}

/// Builds a [Scenario] with a fixed list of persons, all of them queued up before the first tick.
pub struct ScenarioBuilder {
    config: SimulationConfig,
    persons: Vec<(usize, usize)>
}

impl ScenarioBuilder {
    pub fn new(floor_count: usize, elevator_count: usize, elevator_capacity: usize) -> Self {
        Self {
            config: SimulationConfig::new(floor_count, elevator_count, elevator_capacity, 0),
            persons: Vec::new()
        }
    }

    pub fn algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    /// Adds a person travelling from `start` to `destination`. Person ids follow the order of
    /// the calls, starting at 0.
    pub fn person(mut self, start: usize, destination: usize) -> Self {
        self.persons.push((start, destination));
        self
    }

    /// Checks the parameters, queues up every person and starts the elevators. The dispatcher is
    /// not started, ticks are run by hand through [Scenario::step].
    pub async fn build(mut self) -> Result<Scenario, ScenarioError> {
        self.config.person_count = self.persons.len();
        self.validate()?;

        let config = self.config;
        let building = Building::new(config.floor_count, config.elevator_capacity);
        let barrier = Arc::new(CompletionBarrier::new(config.person_count));
        let (trigger, shutdown) = shutdown::channel();

        let mut journeys = JoinSet::new();
        for (id, (start, destination)) in self.persons.into_iter().enumerate() {
            let person = Arc::new(Person::new(id, start, destination));
            building.register(person.clone());
            let (actor, passenger) = PersonActor::new(person, barrier.clone());
            if let Some(floor) = building.floor(start) {
                floor.enqueue(passenger).await?;
            }
            journeys.spawn(actor.ride(shutdown.clone()));
        }

        let mut dispatcher = Dispatcher::new(building.clone(), config.algorithm.strategy(config.floor_count));
        let mut elevators = Vec::with_capacity(config.elevator_count);
        for id in 0..config.elevator_count {
            let (elevator, addr) = ElevatorActor::new(id, config.elevator_capacity, building.clone());
            dispatcher.attach(addr, elevator.status());
            elevators.push(tokio::spawn(elevator.run(shutdown.clone())));
        }

        Ok(Scenario {
            building,
            barrier,
            dispatcher,
            elevators,
            journeys,
            trigger
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        let floor_count = self.config.floor_count;
        let mut queued = vec![0; floor_count];
        for &(start, destination) in &self.persons {
            for floor in [start, destination] {
                if floor >= floor_count {
                    return Err(ConfigError::FloorOutOfRange { floor, floor_count });
                }
            }
            if start == destination {
                return Err(ConfigError::SameFloorJourney(start));
            }
            // queuing up one more would block the builder
            queued[start] += 1;
            if queued[start] > self.config.elevator_capacity {
                return Err(ConfigError::FloorOverCapacity {
                    floor: start,
                    capacity: self.config.elevator_capacity
                });
            }
        }
        Ok(())
    }
}

/// A running building whose dispatcher is stepped by hand.
pub struct Scenario {
    building: Arc<Building>,
    barrier: Arc<CompletionBarrier>,
    dispatcher: Dispatcher,
    elevators: Vec<JoinHandle<ElevatorStats>>,
    journeys: JoinSet<PersonState>,
    trigger: ShutdownTrigger
}

impl Scenario {
    /// Runs a single tick and returns the commands issued, ordered by elevator id.
    pub async fn step(&mut self) -> Result<Vec<Command>, DispatchError> {
        self.dispatcher.step().await
    }

    /// Ticks until every person has arrived or `max_ticks` ticks ran. Returns the commands of
    /// every tick.
    pub async fn run_until_arrived(&mut self, max_ticks: u64) -> Result<Vec<Vec<Command>>, DispatchError> {
        let mut trace = Vec::new();
        while !self.all_arrived() && self.dispatcher.ticks() < max_ticks {
            trace.push(self.step().await?);
        }
        Ok(trace)
    }

    pub fn all_arrived(&self) -> bool {
        self.building
            .persons()
            .iter()
            .all(|person| person.state() == PersonState::Arrived)
    }

    /// Waits until every person task has seen its drop-off.
    pub async fn journeys_completed(&self) {
        self.barrier.wait().await;
    }

    pub fn ticks(&self) -> u64 {
        self.dispatcher.ticks()
    }

    /// Status of an elevator as of its last acknowledged command.
    pub fn status(&self, id: ElevatorId) -> Option<&ElevatorStatus> {
        self.dispatcher.status(id)
    }

    pub fn person(&self, id: PersonId) -> Option<Arc<Person>> {
        self.building.person(id)
    }

    pub fn building(&self) -> &Arc<Building> {
        &self.building
    }

    /// Stops every task and builds the report of the scenario.
    pub async fn finish(self) -> Result<SimulationReport, JoinError> {
        let Scenario {
            building,
            dispatcher,
            elevators,
            mut journeys,
            trigger,
            ..
        } = self;
        trigger.trigger();
        drop(dispatcher);

        let mut stats = Vec::with_capacity(elevators.len());
        for result in join_all(elevators).await {
            stats.push(result?);
        }
        while let Some(journey) = journeys.join_next().await {
            journey?;
        }

        let persons = building
            .persons()
            .iter()
            .map(|person| PersonRecord::from(person.as_ref()))
            .collect();
        Ok(SimulationReport::new(stats, persons))
    }
}

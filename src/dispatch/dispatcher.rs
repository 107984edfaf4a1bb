use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, instrument};

use crate::building::Building;
use crate::dispatch::DispatchStrategy;
use crate::elevator::{ElevatorAddr, ElevatorError, ElevatorId, ElevatorStatus};
use crate::message::Command;
use crate::shutdown::Shutdown;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Tick {tick}: {source}")]
    Elevator {
        tick: u64,
        #[source]
        source: ElevatorError
    }
}

/// The control loop of a simulation. Every tick it ages all persons, lets its [DispatchStrategy]
/// assign the waiting floors and then commands the elevators one after another, waiting for each
/// acknowledgment before moving on to the next elevator.
pub struct Dispatcher {
    building: Arc<Building>,
    strategy: Box<dyn DispatchStrategy>,
    elevators: Vec<ElevatorAddr>,
    statuses: Vec<ElevatorStatus>,
    ticks: u64
}

impl Dispatcher {
    pub fn new(building: Arc<Building>, strategy: Box<dyn DispatchStrategy>) -> Self {
        Self {
            building,
            strategy,
            elevators: Vec::new(),
            statuses: Vec::new(),
            ticks: 0
        }
    }

    /// Adds an elevator. Elevators are commanded in the order they were attached, which has to
    /// match their ids.
    pub fn attach(&mut self, addr: ElevatorAddr, status: ElevatorStatus) {
        assert_eq!(addr.id(), self.elevators.len(), "elevators must be attached in id order");
        debug_assert_eq!(addr.id(), status.id);
        self.elevators.push(addr);
        self.statuses.push(status);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Last acknowledged status of every elevator, ordered by id.
    pub fn statuses(&self) -> &[ElevatorStatus] {
        &self.statuses
    }

    pub fn status(&self, id: ElevatorId) -> Option<&ElevatorStatus> {
        self.statuses.get(id)
    }

    /// Runs one tick and returns the commands issued, ordered by elevator id.
    pub async fn step(&mut self) -> Result<Vec<Command>, DispatchError> {
        self.ticks += 1;
        let tick = self.ticks;

        self.building.age_persons();
        let waiting = self.building.waiting_floors();
        self.strategy.assign_requests(&waiting, &self.statuses);

        let mut issued = Vec::with_capacity(self.elevators.len());
        for (addr, status) in self.elevators.iter().zip(self.statuses.iter_mut()) {
            let command = self.strategy.next_command(status);
            *status = addr
                .ask(command)
                .await
                .map_err(|source| DispatchError::Elevator { tick, source })?;
            if command == Command::OpenDoors {
                self.strategy.doors_opened(status);
            }
            issued.push(command);
        }
        Ok(issued)
    }

    /// Ticks every `tick_interval` until shutdown is triggered. Returns the number of ticks run.
    #[instrument(skip_all, fields(algorithm = self.strategy.name()))]
    pub async fn run(mut self, tick_interval: Duration, mut shutdown: Shutdown) -> Result<u64, DispatchError> {
        info!("Dispatcher started with {} elevators", self.elevators.len());
        let mut ticker = interval(tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => {
                    break;
                }
                _ = ticker.tick() => {
                    match self.step().await {
                        Ok(commands) => {
                            debug!(tick = self.ticks, "Issued {:?}", commands);
                        }
                        Err(err) if shutdown.is_triggered() => {
                            // elevators may stop before the last acknowledgment
                            debug!("Tick interrupted by shutdown: {}", err);
                            break;
                        }
                        Err(err) => {
                            error!("Dispatcher failed: {}", err);
                            return Err(err);
                        }
                    }
                }
            }
        }

        info!(ticks = self.ticks, "Dispatcher stopped");
        Ok(self.ticks)
    }
}

#[cfg(test)]
mod tests {
    use crate::dispatch::strategies::NearestRequest;
    use crate::elevator::ElevatorActor;
    use super::*;

    #[tokio::test]
    async fn idle_building_idles_every_elevator() {
        let building = Building::new(4, 1);
        let mut dispatcher = Dispatcher::new(building.clone(), NearestRequest::new(4));
        let (_trigger, shutdown) = crate::shutdown::channel();
        for id in 0..3 {
            let (elevator, addr) = ElevatorActor::new(id, 1, building.clone());
            dispatcher.attach(addr, elevator.status());
            tokio::spawn(elevator.run(shutdown.clone()));
        }

        assert_eq!(dispatcher.step().await.unwrap(), vec![Command::Idle; 3]);
        assert_eq!(dispatcher.step().await.unwrap(), vec![Command::Idle; 3]);
        assert_eq!(dispatcher.ticks(), 2);
        assert!(dispatcher.statuses().iter().all(|s| s.stats.idle_count == 2));
    }

    #[tokio::test]
    async fn stopped_elevator_fails_the_tick() {
        let building = Building::new(4, 1);
        let mut dispatcher = Dispatcher::new(building.clone(), NearestRequest::new(4));
        let (elevator, addr) = ElevatorActor::new(0, 1, building);
        dispatcher.attach(addr, elevator.status());
        drop(elevator);

        let err = dispatcher.step().await.unwrap_err();
        assert_eq!(err, DispatchError::Elevator { tick: 1, source: ElevatorError::Unreachable(0) });
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let building = Building::new(4, 1);
        let mut dispatcher = Dispatcher::new(building.clone(), NearestRequest::new(4));
        let (trigger, shutdown) = crate::shutdown::channel();
        let (elevator, addr) = ElevatorActor::new(0, 1, building);
        dispatcher.attach(addr, elevator.status());
        let elevator = tokio::spawn(elevator.run(shutdown.clone()));
        let dispatcher = tokio::spawn(dispatcher.run(Duration::from_micros(200), shutdown));

        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.trigger();

        let ticks = dispatcher.await.unwrap().unwrap();
        let stats = elevator.await.unwrap();
        assert!(ticks > 0);
        // the tick running when shutdown hit may not have reached the elevator
        assert!(stats.idle_count == ticks || stats.idle_count + 1 == ticks);
    }
}

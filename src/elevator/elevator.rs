use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error, info, instrument, trace};

use crate::building::Building;
use crate::elevator::address::ElevatorAddr;
use crate::elevator::status::{ElevatorId, ElevatorStats, ElevatorStatus};
use crate::message::{Command, Envelope};
use crate::person::Rider;
use crate::shutdown::Shutdown;

#[derive(Error, Debug, PartialEq, Eq)]
/// This enum represents the ways an elevator can fail to carry out a command.
pub enum ElevatorError {
    #[error("Elevator {id} cannot ascend above the top floor {floor}")]
    AboveTopFloor { id: ElevatorId, floor: usize },
    #[error("Elevator {id} cannot descend below the ground floor")]
    BelowGroundFloor { id: ElevatorId },
    #[error("Elevator {0} stopped responding")]
    Unreachable(ElevatorId)
}

/// One elevator of the building, run as its own task.
///
/// The elevator owns its position and the persons on board. It only acts on commands received
/// through its [ElevatorAddr] and acknowledges each of them with its new [ElevatorStatus], so the
/// dispatcher never has more than one command in flight per elevator.
pub struct ElevatorActor {
    id: ElevatorId,
    capacity: usize,
    floor: usize,
    riders: Vec<Rider>,
    stats: ElevatorStats,
    building: Arc<Building>,
    mailbox: Receiver<Envelope>
}

impl ElevatorActor {
    /// Creates an empty elevator on the ground floor together with its address.
    pub fn new(id: ElevatorId, capacity: usize, building: Arc<Building>) -> (Self, ElevatorAddr) {
        // a single slot: commands are acknowledged before the next one is sent anyways
        let (tx, rx) = mpsc::channel(1);
        let actor = Self {
            id,
            capacity,
            floor: 0,
            riders: Vec::with_capacity(capacity),
            stats: ElevatorStats { id, ..ElevatorStats::default() },
            building,
            mailbox: rx
        };
        (actor, ElevatorAddr::new(id, tx))
    }

    pub fn id(&self) -> ElevatorId {
        self.id
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            id: self.id,
            floor: self.floor,
            capacity: self.capacity,
            onboard: self.riders.iter().map(Rider::destination_floor).collect(),
            stats: self.stats
        }
    }

    /// Processes commands until every address is dropped or shutdown is triggered. A command which
    /// would break the elevator's invariants is refused and ends the task. Returns the final counters.
    #[instrument(skip_all, fields(elevator = self.id))]
    pub async fn run(mut self, mut shutdown: Shutdown) -> ElevatorStats {
        info!("Elevator started on floor {}", self.floor);
        loop {
            let envelope = tokio::select! {
                biased;
                envelope = self.mailbox.recv() => envelope,
                _ = shutdown.wait() => None
            };

            match envelope {
                Some(Envelope { command, reply_to }) => {
                    match self.handle(command) {
                        Ok(()) => {
                            // the dispatcher may have given up waiting during shutdown
                            let _ = reply_to.send(Ok(self.status()));
                        }
                        Err(err) => {
                            error!("Elevator refused command {}: {}", command, err);
                            let _ = reply_to.send(Err(err));
                            break;
                        }
                    }
                }
                None => {
                    break;
                }
            }
        }
        info!(steps = self.stats.steps_taken, picked_up = self.stats.picked_up, "Elevator stopped");
        self.stats
    }

    /// Applies a single command to the elevator.
    pub(crate) fn handle(&mut self, command: Command) -> Result<(), ElevatorError> {
        match command {
            Command::OpenDoors => {
                self.stats.doors_opened += 1;
                let dropped_off = self.drop_off();
                let picked_up = self.pick_up();
                debug!("Dropped off {} and picked up {} persons on floor {}", dropped_off, picked_up, self.floor);
                self.stats.steps_taken += 1;
            }
            Command::Ascend => {
                if self.floor + 1 >= self.building.floor_count() {
                    return Err(ElevatorError::AboveTopFloor { id: self.id, floor: self.floor });
                }
                self.floor += 1;
                self.stats.floors_traveled += 1;
                self.stats.steps_taken += 1;
            }
            Command::Descend => {
                if self.floor == 0 {
                    return Err(ElevatorError::BelowGroundFloor { id: self.id });
                }
                self.floor -= 1;
                self.stats.floors_traveled += 1;
                self.stats.steps_taken += 1;
            }
            Command::Idle => {
                self.stats.idle_count += 1;
            }
        }
        debug_assert!(self.riders.len() <= self.capacity);
        Ok(())
    }

    /// Lets out every rider whose destination is the current floor.
    fn drop_off(&mut self) -> usize {
        let floor = self.floor;
        let (leaving, staying): (Vec<Rider>, Vec<Rider>) = std::mem::take(&mut self.riders)
            .into_iter()
            .partition(|rider| rider.destination_floor() == floor);
        self.riders = staying;

        let count = leaving.len();
        for rider in leaving {
            let person = rider.alight();
            trace!("Person {} arrived on floor {}", person.id(), floor);
        }
        self.stats.dropped_off += count as u64;
        count
    }

    /// Boards waiting persons from the current floor while there is room. Never waits for arrivals.
    fn pick_up(&mut self) -> usize {
        let queue = match self.building.floor(self.floor) {
            Some(queue) => queue,
            None => return 0
        };

        let mut count = 0;
        while self.riders.len() < self.capacity {
            match queue.try_dequeue() {
                Some(passenger) => {
                    trace!("Person {} boarded on floor {}", passenger.person().id(), self.floor);
                    self.riders.push(passenger.board());
                    count += 1;
                }
                None => {
                    break;
                }
            }
        }
        self.stats.picked_up += count as u64;
        count
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;
    use crate::person::{Passenger, Person, PersonState};
    use super::*;

    struct Signals {
        picked_up: oneshot::Receiver<()>,
        dropped_off: oneshot::Receiver<()>
    }

    async fn arrive(building: &Building, id: usize, start: usize, destination: usize) -> (Arc<Person>, Signals) {
        let person = Arc::new(Person::new(id, start, destination));
        let (picked_up_tx, picked_up) = oneshot::channel();
        let (dropped_off_tx, dropped_off) = oneshot::channel();
        let passenger = Passenger::new(person.clone(), picked_up_tx, dropped_off_tx);
        building.floor(start).unwrap().enqueue(passenger).await.unwrap();
        (person, Signals { picked_up, dropped_off })
    }

    #[tokio::test]
    async fn open_doors_boards_up_to_capacity() {
        let building = Building::new(4, 3);
        let mut waiting = Vec::new();
        for id in 0..3 {
            waiting.push(arrive(&building, id, 0, 2).await);
        }
        let (mut elevator, _addr) = ElevatorActor::new(0, 2, building.clone());

        elevator.handle(Command::OpenDoors).unwrap();

        let status = elevator.status();
        assert_eq!(status.onboard, vec![2, 2]);
        assert_eq!(status.stats.picked_up, 2);
        assert_eq!(status.stats.doors_opened, 1);
        assert_eq!(status.stats.steps_taken, 1);
        assert_eq!(building.floor(0).unwrap().len(), 1);

        let (first, mut signals) = waiting.remove(0);
        assert_eq!(first.state(), PersonState::Traveling);
        assert_eq!(signals.picked_up.try_recv(), Ok(()));
        let (third, mut signals_third) = waiting.remove(1);
        assert_eq!(third.state(), PersonState::Waiting);
        assert!(signals_third.picked_up.try_recv().is_err());
        assert!(signals.dropped_off.try_recv().is_err());
    }

    #[tokio::test]
    async fn drop_off_frees_room_before_pick_up() {
        let building = Building::new(3, 1);
        let (rider, mut rider_signals) = arrive(&building, 0, 0, 1).await;
        let (mut elevator, _addr) = ElevatorActor::new(0, 1, building.clone());
        elevator.handle(Command::OpenDoors).unwrap();
        elevator.handle(Command::Ascend).unwrap();

        let (next, mut next_signals) = arrive(&building, 1, 1, 2).await;
        elevator.handle(Command::OpenDoors).unwrap();

        assert_eq!(rider.state(), PersonState::Arrived);
        assert_eq!(rider_signals.dropped_off.try_recv(), Ok(()));
        assert_eq!(next.state(), PersonState::Traveling);
        assert_eq!(next_signals.picked_up.try_recv(), Ok(()));

        let status = elevator.status();
        assert_eq!(status.floor, 1);
        assert_eq!(status.onboard, vec![2]);
        assert_eq!(status.stats.picked_up, 2);
        assert_eq!(status.stats.dropped_off, 1);
        assert_eq!(status.stats.doors_opened, 2);
        assert_eq!(status.stats.floors_traveled, 1);
        assert_eq!(status.stats.steps_taken, 3);
    }

    #[tokio::test]
    async fn refuses_to_leave_the_shaft() {
        let building = Building::new(2, 1);
        let (mut elevator, _addr) = ElevatorActor::new(3, 1, building);

        assert_eq!(elevator.handle(Command::Descend), Err(ElevatorError::BelowGroundFloor { id: 3 }));
        elevator.handle(Command::Ascend).unwrap();
        assert_eq!(elevator.handle(Command::Ascend), Err(ElevatorError::AboveTopFloor { id: 3, floor: 1 }));

        let status = elevator.status();
        assert_eq!(status.floor, 1);
        assert_eq!(status.stats.floors_traveled, 1);
        assert_eq!(status.stats.steps_taken, 1);
    }

    #[tokio::test]
    async fn idling_is_not_a_step() {
        let building = Building::new(2, 1);
        let (mut elevator, _addr) = ElevatorActor::new(0, 1, building);
        elevator.handle(Command::Idle).unwrap();
        elevator.handle(Command::Idle).unwrap();
        let stats = elevator.status().stats;
        assert_eq!(stats.idle_count, 2);
        assert_eq!(stats.steps_taken, 0);
    }

    #[tokio::test]
    async fn ask_waits_for_acknowledgment() {
        let building = Building::new(3, 1);
        let (elevator, addr) = ElevatorActor::new(0, 1, building);
        let (trigger, shutdown) = crate::shutdown::channel();
        let task = tokio::spawn(elevator.run(shutdown));

        let status = addr.ask(Command::Ascend).await.unwrap();
        assert_eq!(status.floor, 1);
        assert_eq!(addr.ask(Command::Descend).await.unwrap().floor, 0);
        assert_eq!(addr.ask(Command::Descend).await, Err(ElevatorError::BelowGroundFloor { id: 0 }));
        // the refused command ended the actor
        assert_eq!(addr.ask(Command::Idle).await, Err(ElevatorError::Unreachable(0)));

        let stats = task.await.unwrap();
        assert_eq!(stats.floors_traveled, 2);
        drop(trigger);
    }

    #[tokio::test]
    async fn stops_when_addresses_are_dropped() {
        let building = Building::new(3, 1);
        let (elevator, addr) = ElevatorActor::new(0, 1, building);
        let (_trigger, shutdown) = crate::shutdown::channel();
        let task = tokio::spawn(elevator.run(shutdown));
        addr.ask(Command::Idle).await.unwrap();
        drop(addr);
        let stats = task.await.unwrap();
        assert_eq!(stats.idle_count, 1);
    }
}

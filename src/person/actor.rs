use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{instrument, trace, warn};

use crate::barrier::CompletionBarrier;
use crate::building::Building;
use crate::person::{Passenger, Person, PersonState};
use crate::shutdown::Shutdown;

/// The task of a single person: queue up on the starting floor, wait to be picked up, wait to be
/// dropped off and finally release one unit of the [CompletionBarrier].
///
/// Both signals are one-shot. The elevator records the state change on the [Person] when it fires
/// a signal, the actor only follows along.
pub struct PersonActor {
    person: Arc<Person>,
    picked_up: oneshot::Receiver<()>,
    dropped_off: oneshot::Receiver<()>,
    barrier: Arc<CompletionBarrier>
}

impl PersonActor {
    /// Creates the actor and the [Passenger] it will put into its starting floor's queue.
    pub fn new(person: Arc<Person>, barrier: Arc<CompletionBarrier>) -> (Self, Passenger) {
        let (picked_up_tx, picked_up) = oneshot::channel();
        let (dropped_off_tx, dropped_off) = oneshot::channel();
        let passenger = Passenger::new(person.clone(), picked_up_tx, dropped_off_tx);
        let actor = Self {
            person,
            picked_up,
            dropped_off,
            barrier
        };
        (actor, passenger)
    }

    pub fn person(&self) -> &Arc<Person> {
        &self.person
    }

    /// Runs the whole journey. Returns the state the person ended in, which is
    /// [PersonState::Arrived] unless the run was shut down first.
    #[instrument(skip_all, fields(person = self.person.id()))]
    pub async fn run(self, passenger: Passenger, building: Arc<Building>, mut shutdown: Shutdown) -> PersonState {
        let floor = match building.floor(self.person.starting_floor()) {
            Some(floor) => floor,
            None => {
                warn!("Starting floor {} does not exist", self.person.starting_floor());
                return self.person.state();
            }
        };

        tokio::select! {
            biased;
            enqueued = floor.enqueue(passenger) => {
                if let Err(err) = enqueued {
                    warn!("Could not queue up: {}", err);
                    return self.person.state();
                }
            }
            _ = shutdown.wait() => {
                return self.person.state();
            }
        }
        trace!("Waiting on floor {}", self.person.starting_floor());

        self.ride(shutdown).await
    }

    /// Second half of [PersonActor::run], for persons which already are in their floor's queue.
    pub async fn ride(mut self, mut shutdown: Shutdown) -> PersonState {
        tokio::select! {
            biased;
            signal = &mut self.picked_up => {
                if signal.is_err() {
                    // the passenger was dropped without boarding
                    return self.person.state();
                }
            }
            _ = shutdown.wait() => {
                return self.person.state();
            }
        }
        trace!(
            "Traveling from floor {} to floor {}",
            self.person.starting_floor(),
            self.person.destination_floor()
        );

        tokio::select! {
            biased;
            signal = &mut self.dropped_off => {
                if signal.is_err() {
                    return self.person.state();
                }
            }
            _ = shutdown.wait() => {
                return self.person.state();
            }
        }
        trace!("Arrived on floor {}", self.person.destination_floor());

        self.barrier.arrive();
        PersonState::Arrived
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use super::*;

    #[tokio::test]
    async fn releases_barrier_after_drop_off() {
        let building = Building::new(3, 1);
        let barrier = Arc::new(CompletionBarrier::new(1));
        let person = Arc::new(Person::new(0, 0, 2));
        let (actor, passenger) = PersonActor::new(person.clone(), barrier.clone());
        let (_trigger, shutdown) = crate::shutdown::channel();
        let journey = tokio::spawn(actor.run(passenger, building.clone(), shutdown));

        // play the elevator by hand
        let passenger = loop {
            if let Some(passenger) = building.floor(0).unwrap().try_dequeue() {
                break passenger;
            }
            tokio::task::yield_now().await;
        };
        let rider = passenger.board();
        assert_eq!(barrier.remaining(), 1);
        rider.alight();

        let state = tokio::time::timeout(Duration::from_secs(1), journey).await.unwrap().unwrap();
        assert_eq!(state, PersonState::Arrived);
        assert_eq!(person.state(), PersonState::Arrived);
        assert_eq!(barrier.remaining(), 0);
    }

    #[tokio::test]
    async fn shutdown_ends_a_waiting_person() {
        let building = Building::new(3, 1);
        let barrier = Arc::new(CompletionBarrier::new(1));
        let person = Arc::new(Person::new(0, 1, 0));
        let (actor, passenger) = PersonActor::new(person.clone(), barrier.clone());
        let (trigger, shutdown) = crate::shutdown::channel();
        let journey = tokio::spawn(actor.run(passenger, building, shutdown));

        while person.state() != PersonState::Waiting {
            tokio::task::yield_now().await;
        }
        trigger.trigger();

        let state = tokio::time::timeout(Duration::from_secs(1), journey).await.unwrap().unwrap();
        assert_eq!(state, PersonState::Waiting);
        assert_eq!(barrier.remaining(), 1);
    }
}

use std::sync::{Mutex, MutexGuard, PoisonError};
use rand::Rng;

/// Unique identifier of a [Person] within one simulation run.
pub type PersonId = usize;

/// Lifecycle of a person. A person only ever moves forward through these states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonState {
    Created,
    Waiting,
    Traveling,
    Arrived
}

/// Mutable part of a [Person]: the current state and the ticks spent in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Journey {
    pub state: PersonState,
    pub waiting_time: u64,
    pub travel_time: u64
}

/// A passenger travelling from its starting floor to its destination floor.
///
/// The floors are fixed at creation. The [Journey] is shared between the person's own task, the
/// elevator carrying it and the dispatcher aging it every tick, so it lives behind a lock.
#[derive(Debug)]
pub struct Person {
    id: PersonId,
    starting_floor: usize,
    destination_floor: usize,
    journey: Mutex<Journey>
}

impl Person {
    /// Creates a person in state [PersonState::Created].
    ///
    /// Panics if both floors are equal, nobody rides an elevator to stay where they are.
    pub fn new(id: PersonId, starting_floor: usize, destination_floor: usize) -> Self {
        assert_ne!(starting_floor, destination_floor, "person {} starts on its destination floor", id);
        Self {
            id,
            starting_floor,
            destination_floor,
            journey: Mutex::new(Journey {
                state: PersonState::Created,
                waiting_time: 0,
                travel_time: 0
            })
        }
    }

    /// Creates a person with uniformly random floors. A destination equal to the start is moved
    /// one floor up, wrapping around at the top.
    pub fn random<R: Rng + ?Sized>(id: PersonId, floor_count: usize, rng: &mut R) -> Self {
        let starting_floor = rng.gen_range(0..floor_count);
        let mut destination_floor = rng.gen_range(0..floor_count);
        if destination_floor == starting_floor {
            destination_floor = (destination_floor + 1) % floor_count;
        }
        Self::new(id, starting_floor, destination_floor)
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn starting_floor(&self) -> usize {
        self.starting_floor
    }

    pub fn destination_floor(&self) -> usize {
        self.destination_floor
    }

    /// Returns a copy of the current journey.
    pub fn journey(&self) -> Journey {
        *self.lock()
    }

    pub fn state(&self) -> PersonState {
        self.lock().state
    }

    pub fn waiting_time(&self) -> u64 {
        self.lock().waiting_time
    }

    pub fn travel_time(&self) -> u64 {
        self.lock().travel_time
    }

    /// Advances the person's clock by one tick. Only waiting and traveling persons age, so the
    /// times are frozen once the person has arrived.
    pub(crate) fn age(&self) {
        let mut journey = self.lock();
        match journey.state {
            PersonState::Waiting => journey.waiting_time += 1,
            PersonState::Traveling => journey.travel_time += 1,
            PersonState::Created | PersonState::Arrived => {}
        }
    }

    pub(crate) fn mark_waiting(&self) {
        self.transition(PersonState::Created, PersonState::Waiting);
    }

    pub(crate) fn mark_traveling(&self) {
        self.transition(PersonState::Waiting, PersonState::Traveling);
    }

    pub(crate) fn mark_arrived(&self) {
        self.transition(PersonState::Traveling, PersonState::Arrived);
    }

    fn transition(&self, from: PersonState, to: PersonState) {
        let mut journey = self.lock();
        debug_assert_eq!(journey.state, from, "person {} cannot become {:?}", self.id, to);
        journey.state = to;
    }

    fn lock(&self) -> MutexGuard<'_, Journey> {
        // a journey is plain data, a panic while holding the lock cannot leave it half-updated
        self.journey.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

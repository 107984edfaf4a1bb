//! This module contains the [Building], the state shared by all tasks of a simulation run.

use std::sync::Arc;
use dashmap::DashMap;

use crate::floor::FloorQueue;
use crate::person::{Person, PersonId};

/// All floor queues of the building plus the registry of every person created during the run.
///
/// The registry is written by the person generator while the dispatcher ages its entries and the
/// controller reads it for reporting, hence a concurrent map.
pub struct Building {
    floors: Vec<FloorQueue>,
    persons: DashMap<PersonId, Arc<Person>>
}

impl Building {
    /// Creates `floor_count` empty floors, each holding at most `floor_capacity` waiting persons.
    pub fn new(floor_count: usize, floor_capacity: usize) -> Arc<Self> {
        let floors = (0..floor_count)
            .map(|index| FloorQueue::new(index, floor_capacity))
            .collect();
        Arc::new(Self {
            floors,
            persons: DashMap::new()
        })
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn floor(&self, index: usize) -> Option<&FloorQueue> {
        self.floors.get(index)
    }

    /// One flag per floor, true where somebody is waiting.
    pub fn waiting_floors(&self) -> Vec<bool> {
        self.floors.iter().map(FloorQueue::has_waiting).collect()
    }

    /// Adds a person to the registry.
    pub fn register(&self, person: Arc<Person>) {
        let previous = self.persons.insert(person.id(), person);
        debug_assert!(previous.is_none(), "person ids must be unique");
    }

    pub fn person(&self, id: PersonId) -> Option<Arc<Person>> {
        self.persons.get(&id).map(|entry| entry.value().clone())
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// Advances every waiting or traveling person by one tick.
    pub fn age_persons(&self) {
        for entry in self.persons.iter() {
            entry.value().age();
        }
    }

    /// Snapshot of the registry, ordered by person id.
    pub fn persons(&self) -> Vec<Arc<Person>> {
        let mut persons: Vec<Arc<Person>> = self.persons.iter().map(|entry| entry.value().clone()).collect();
        persons.sort_by_key(|person| person.id());
        persons
    }
}

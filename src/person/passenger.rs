use std::sync::Arc;
use tokio::sync::oneshot;

use crate::person::Person;

/// A person waiting in a [FloorQueue](crate::floor::FloorQueue). It carries the sending halves of
/// both one-shot signals of its [PersonActor](crate::person::PersonActor).
#[derive(Debug)]
pub struct Passenger {
    person: Arc<Person>,
    picked_up: oneshot::Sender<()>,
    dropped_off: oneshot::Sender<()>
}

impl Passenger {
    pub(crate) fn new(person: Arc<Person>, picked_up: oneshot::Sender<()>, dropped_off: oneshot::Sender<()>) -> Self {
        Self {
            person,
            picked_up,
            dropped_off
        }
    }

    pub fn person(&self) -> &Arc<Person> {
        &self.person
    }

    /// Boards the passenger: the person becomes traveling and its pick-up signal fires.
    pub(crate) fn board(self) -> Rider {
        self.person.mark_traveling();
        // the receiving task may already be gone after a shutdown, nobody is left to tell
        let _ = self.picked_up.send(());
        Rider {
            person: self.person,
            dropped_off: self.dropped_off
        }
    }
}

/// A person inside an elevator.
#[derive(Debug)]
pub struct Rider {
    person: Arc<Person>,
    dropped_off: oneshot::Sender<()>
}

impl Rider {
    pub fn person(&self) -> &Arc<Person> {
        &self.person
    }

    pub fn destination_floor(&self) -> usize {
        self.person.destination_floor()
    }

    /// Lets the rider out: the person arrives and its drop-off signal fires.
    pub(crate) fn alight(self) -> Arc<Person> {
        self.person.mark_arrived();
        let _ = self.dropped_off.send(());
        self.person
    }
}

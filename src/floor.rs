use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{Receiver, Sender};

use crate::person::Passenger;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FloorError {
    #[error("Floor {0} does not accept passengers anymore")]
    Closed(usize)
}

/// Bounded FIFO queue of passengers waiting on one floor.
///
/// Many persons enqueue concurrently; only the elevator which currently has its doors open on this
/// floor dequeues. The capacity equals the elevator capacity: a person arriving at a full floor is
/// suspended until an elevator takes someone away.
pub struct FloorQueue {
    index: usize,
    tx: Sender<Passenger>,
    rx: Mutex<Receiver<Passenger>>
}

impl FloorQueue {
    pub fn new(index: usize, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            index,
            tx,
            rx: Mutex::new(rx)
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Puts the passenger at the end of the queue, waiting for a free slot if the floor is full.
    ///
    /// The person is marked waiting while its slot is reserved but before it becomes visible to
    /// elevators, so an elevator never boards a person which is not waiting yet.
    pub async fn enqueue(&self, passenger: Passenger) -> Result<(), FloorError> {
        let permit = self.tx.reserve().await.map_err(|_| FloorError::Closed(self.index))?;
        passenger.person().mark_waiting();
        permit.send(passenger);
        Ok(())
    }

    /// Non-blocking check whether anybody is waiting.
    pub fn has_waiting(&self) -> bool {
        !self.receiver().is_empty()
    }

    /// Number of waiting passengers.
    pub fn len(&self) -> usize {
        self.receiver().len()
    }

    /// Takes the first waiting passenger, if any. Never waits for new arrivals.
    pub fn try_dequeue(&self) -> Option<Passenger> {
        self.receiver().try_recv().ok()
    }

    fn receiver(&self) -> MutexGuard<'_, Receiver<Passenger>> {
        self.rx.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

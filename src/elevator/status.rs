/// Unique, stable identifier of an elevator. Elevators are numbered `0..elevator_count`.
pub type ElevatorId = usize;

/// Bookkeeping counters of one elevator, reported at the end of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElevatorStats {
    pub id: ElevatorId,
    /// Door openings and moves. Idling is not counted.
    pub steps_taken: u64,
    pub floors_traveled: u64,
    pub doors_opened: u64,
    pub idle_count: u64,
    pub picked_up: u64,
    pub dropped_off: u64
}

/// Snapshot of an elevator as seen by the dispatcher. Every acknowledged command returns a fresh one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElevatorStatus {
    pub id: ElevatorId,
    pub floor: usize,
    pub capacity: usize,
    /// Destination floor of every person on board, in boarding order.
    pub onboard: Vec<usize>,
    pub stats: ElevatorStats
}

impl ElevatorStatus {
    /// Status of an empty elevator waiting on the ground floor.
    pub fn new(id: ElevatorId, capacity: usize) -> Self {
        Self {
            id,
            floor: 0,
            capacity,
            onboard: Vec::with_capacity(capacity),
            stats: ElevatorStats { id, ..ElevatorStats::default() }
        }
    }

    pub fn onboard_count(&self) -> usize {
        self.onboard.len()
    }

    pub fn has_capacity(&self) -> bool {
        self.onboard.len() < self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.onboard.is_empty()
    }
}

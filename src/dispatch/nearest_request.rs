use crate::dispatch::strategy::{closest_with_capacity, DispatchStrategy};
use crate::elevator::{ElevatorId, ElevatorStatus};
use crate::message::Command;

/// Every waiting floor goes to the closest elevator with room. Each elevator keeps a set of pending
/// destinations and always heads for the nearest one; on equal distance up wins over down.
/// Opening the doors resets the set to the destinations of the persons on board.
pub struct NearestRequest {
    floor_count: usize,
    destinations: Vec<Vec<bool>>
}

impl NearestRequest {
    pub fn new(floor_count: usize) -> Box<Self> {
        Box::new(Self {
            floor_count,
            destinations: Vec::new()
        })
    }

    /// Pending destinations of an elevator as one flag per floor.
    pub fn destinations(&self, id: ElevatorId) -> Option<&[bool]> {
        self.destinations.get(id).map(Vec::as_slice)
    }

    fn destinations_mut(&mut self, id: ElevatorId) -> &mut Vec<bool> {
        if self.destinations.len() <= id {
            self.destinations.resize(id + 1, vec![false; self.floor_count]);
        }
        &mut self.destinations[id]
    }
}

impl DispatchStrategy for NearestRequest {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn assign_requests(&mut self, waiting: &[bool], elevators: &[ElevatorStatus]) {
        for (floor, _) in waiting.iter().enumerate().filter(|(_, waiting)| **waiting) {
            // nobody has room: the floor is looked at again next tick
            if let Some(id) = closest_with_capacity(floor, elevators) {
                self.destinations_mut(id)[floor] = true;
            }
        }
    }

    fn next_command(&mut self, elevator: &ElevatorStatus) -> Command {
        let floor_count = self.floor_count;
        let current = elevator.floor;
        let destinations = self.destinations_mut(elevator.id);

        if destinations[current] {
            return Command::OpenDoors;
        }
        for distance in 1..floor_count {
            if current + distance < floor_count && destinations[current + distance] {
                return Command::Ascend;
            }
            if distance <= current && destinations[current - distance] {
                return Command::Descend;
            }
        }
        Command::Idle
    }

    fn doors_opened(&mut self, elevator: &ElevatorStatus) {
        let destinations = self.destinations_mut(elevator.id);
        destinations.fill(false);
        for &floor in &elevator.onboard {
            if let Some(flag) = destinations.get_mut(floor) {
                *flag = true;
            }
        }
    }
}

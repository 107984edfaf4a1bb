use crate::dispatch::strategy::{closest_with_capacity, toward, DispatchStrategy};
use crate::elevator::{ElevatorId, ElevatorStatus};
use crate::message::Command;

/// Working memory of one elevator.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Plan {
    /// Floors with a pick-up request assigned to this elevator.
    requests: Vec<bool>,
    /// Number of persons on board per destination floor.
    histogram: Vec<usize>
}

/// Pick-up requests are assigned like in [NearestRequest](crate::dispatch::strategies::NearestRequest).
/// A loaded elevator heads for the floor most of its passengers want to go to, an empty one for the
/// closest floor with a request assigned to it. Doors open wherever a passenger wants out or a
/// request is pending.
pub struct MostRequestedDestination {
    floor_count: usize,
    plans: Vec<Plan>
}

impl MostRequestedDestination {
    pub fn new(floor_count: usize) -> Box<Self> {
        Box::new(Self {
            floor_count,
            plans: Vec::new()
        })
    }

    /// Destination histogram of an elevator's passengers as of its last door opening.
    pub fn histogram(&self, id: ElevatorId) -> Option<&[usize]> {
        self.plans.get(id).map(|plan| plan.histogram.as_slice())
    }

    fn plan_mut(&mut self, id: ElevatorId) -> &mut Plan {
        if self.plans.len() <= id {
            let empty = Plan {
                requests: vec![false; self.floor_count],
                histogram: vec![0; self.floor_count]
            };
            self.plans.resize(id + 1, empty);
        }
        &mut self.plans[id]
    }
}

/// Index of the largest count, the lowest index on ties.
fn arg_max(counts: &[usize]) -> usize {
    let mut result = 0;
    for (index, count) in counts.iter().enumerate() {
        if *count > counts[result] {
            result = index;
        }
    }
    result
}

/// Closest floor with a request, the lowest floor on ties.
fn nearest_request(requests: &[bool], current: usize) -> Option<usize> {
    let mut nearest: Option<usize> = None;
    for (floor, _) in requests.iter().enumerate().filter(|(_, requested)| **requested) {
        match nearest {
            None => nearest = Some(floor),
            Some(best) => {
                if floor.abs_diff(current) < best.abs_diff(current) {
                    nearest = Some(floor);
                }
            }
        }
    }
    nearest
}

impl DispatchStrategy for MostRequestedDestination {
    fn name(&self) -> &'static str {
        "most-requested"
    }

    fn assign_requests(&mut self, waiting: &[bool], elevators: &[ElevatorStatus]) {
        for (floor, _) in waiting.iter().enumerate().filter(|(_, waiting)| **waiting) {
            if let Some(id) = closest_with_capacity(floor, elevators) {
                self.plan_mut(id).requests[floor] = true;
            }
        }
    }

    fn next_command(&mut self, elevator: &ElevatorStatus) -> Command {
        let current = elevator.floor;
        let plan = self.plan_mut(elevator.id);

        if plan.histogram[current] > 0 || plan.requests[current] {
            return Command::OpenDoors;
        }

        let target = if !elevator.is_empty() {
            Some(arg_max(&plan.histogram))
        } else {
            nearest_request(&plan.requests, current)
        };
        match target {
            Some(target) => toward(current, target),
            None => Command::Idle
        }
    }

    fn doors_opened(&mut self, elevator: &ElevatorStatus) {
        let plan = self.plan_mut(elevator.id);
        plan.requests[elevator.floor] = false;
        plan.histogram.fill(0);
        for &floor in &elevator.onboard {
            if let Some(count) = plan.histogram.get_mut(floor) {
                *count += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elevator(id: ElevatorId, floor: usize, onboard: Vec<usize>) -> ElevatorStatus {
        let mut status = ElevatorStatus::new(id, 4);
        status.floor = floor;
        status.onboard = onboard;
        status
    }

    #[test]
    fn arg_max_takes_lowest_index_on_ties() {
        assert_eq!(arg_max(&[0, 2, 1, 2]), 1);
        assert_eq!(arg_max(&[0, 0, 0]), 0);
        assert_eq!(arg_max(&[1, 0, 3]), 2);
    }

    #[test]
    fn nearest_request_takes_lowest_floor_on_ties() {
        assert_eq!(nearest_request(&[false, true, false, true, false], 2), Some(1));
        assert_eq!(nearest_request(&[true, false, false, true, false], 2), Some(3));
        assert_eq!(nearest_request(&[false; 4], 2), None);
    }

    #[test]
    fn equally_requested_destinations_pick_lower_floor() {
        let mut strategy = MostRequestedDestination::new(5);
        let loaded = elevator(0, 2, vec![3, 1]);
        strategy.doors_opened(&loaded);
        assert_eq!(strategy.histogram(0).unwrap(), &[0, 1, 0, 1, 0]);
        for _ in 0..3 {
            assert_eq!(strategy.next_command(&loaded), Command::Descend);
        }
    }

    #[test]
    fn loaded_elevator_follows_majority() {
        let mut strategy = MostRequestedDestination::new(6);
        let loaded = elevator(0, 2, vec![0, 5, 5]);
        strategy.doors_opened(&loaded);
        assert_eq!(strategy.next_command(&loaded), Command::Ascend);
    }

    #[test]
    fn empty_elevator_fetches_closest_request() {
        let mut strategy = MostRequestedDestination::new(8);
        let status = elevator(0, 4, vec![]);
        let mut waiting = [false; 8];
        waiting[0] = true;
        waiting[6] = true;
        strategy.assign_requests(&waiting, &[status.clone()]);
        assert_eq!(strategy.next_command(&status), Command::Ascend);
    }

    #[test]
    fn opens_for_request_or_passenger_and_clears_request() {
        let mut strategy = MostRequestedDestination::new(4);
        let status = elevator(0, 1, vec![]);
        strategy.assign_requests(&[false, true, false, false], &[status.clone()]);
        assert_eq!(strategy.next_command(&status), Command::OpenDoors);

        let boarded = elevator(0, 1, vec![3]);
        strategy.doors_opened(&boarded);
        assert_eq!(strategy.next_command(&boarded), Command::Ascend);

        let arrived = elevator(0, 3, vec![3]);
        assert_eq!(strategy.next_command(&arrived), Command::OpenDoors);
    }

    #[test]
    fn idles_without_work() {
        let mut strategy = MostRequestedDestination::new(4);
        let status = elevator(2, 3, vec![]);
        strategy.assign_requests(&[false; 4], &[status.clone()]);
        assert_eq!(strategy.next_command(&status), Command::Idle);
    }
}

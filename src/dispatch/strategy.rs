use crate::elevator::{ElevatorId, ElevatorStatus};
use crate::message::Command;

/// All dispatch algorithms have to implement this trait in order to drive a
/// [Dispatcher](crate::dispatch::Dispatcher).
///
/// Per tick the dispatcher calls [DispatchStrategy::assign_requests] once, then for every elevator
/// in id order [DispatchStrategy::next_command], and [DispatchStrategy::doors_opened] right after
/// an `OpenDoors` command was acknowledged. The strategy owns its working memory for the whole run.
pub trait DispatchStrategy: Send {
    /// Name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Hands the floors with waiting persons to elevators. `waiting` has one flag per floor,
    /// `elevators` holds the status of every elevator at the start of the tick.
    fn assign_requests(&mut self, waiting: &[bool], elevators: &[ElevatorStatus]);

    /// Decides the single command the given elevator gets this tick.
    fn next_command(&mut self, elevator: &ElevatorStatus) -> Command;

    /// Called with the elevator's status after it opened its doors.
    fn doors_opened(&mut self, elevator: &ElevatorStatus);
}

/// Returns the elevator with spare capacity closest to `floor`. On equal distance the first one in
/// iteration order wins.
pub fn closest_with_capacity(floor: usize, elevators: &[ElevatorStatus]) -> Option<ElevatorId> {
    let mut closest: Option<&ElevatorStatus> = None;
    for elevator in elevators.iter().filter(|e| e.has_capacity()) {
        match closest {
            None => closest = Some(elevator),
            Some(current) => {
                if elevator.floor.abs_diff(floor) < current.floor.abs_diff(floor) {
                    closest = Some(elevator);
                }
            }
        }
    }
    closest.map(|elevator| elevator.id)
}

/// One step from `current` towards `target`.
pub fn toward(current: usize, target: usize) -> Command {
    if target > current {
        Command::Ascend
    } else if target < current {
        Command::Descend
    } else {
        Command::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elevator(id: ElevatorId, floor: usize, onboard: Vec<usize>) -> ElevatorStatus {
        let mut status = ElevatorStatus::new(id, 2);
        status.floor = floor;
        status.onboard = onboard;
        status
    }

    #[test]
    fn closest_skips_full_elevators() {
        let elevators = vec![elevator(0, 5, vec![1, 2]), elevator(1, 9, vec![]), elevator(2, 0, vec![3])];
        assert_eq!(closest_with_capacity(5, &elevators), Some(1));
        assert_eq!(closest_with_capacity(3, &elevators), Some(2));
    }

    #[test]
    fn closest_prefers_first_on_ties() {
        let elevators = vec![elevator(0, 2, vec![]), elevator(1, 6, vec![])];
        assert_eq!(closest_with_capacity(4, &elevators), Some(0));
    }

    #[test]
    fn no_candidate_when_all_are_full() {
        let elevators = vec![elevator(0, 2, vec![0, 1])];
        assert_eq!(closest_with_capacity(4, &elevators), None);
    }

    #[test]
    fn toward_moves_one_floor() {
        assert_eq!(toward(3, 7), Command::Ascend);
        assert_eq!(toward(3, 0), Command::Descend);
        assert_eq!(toward(3, 3), Command::Idle);
    }
}

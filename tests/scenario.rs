use elevator_sim::config::{AlgorithmId, ConfigError};
use elevator_sim::message::Command;
use elevator_sim::person::PersonState;
use elevator_sim::testing::{ScenarioBuilder, ScenarioError};

use Command::*;

async fn two_persons_sharing_a_ride(algorithm: AlgorithmId) {
    let mut scenario = ScenarioBuilder::new(3, 1, 2)
        .algorithm(algorithm)
        .person(0, 2)
        .person(0, 1)
        .build()
        .await
        .unwrap();

    assert_eq!(scenario.step().await.unwrap(), vec![OpenDoors]);
    assert_eq!(scenario.status(0).unwrap().onboard, vec![2, 1]);
    assert_eq!(scenario.step().await.unwrap(), vec![Ascend]);
    assert_eq!(scenario.step().await.unwrap(), vec![OpenDoors]);

    let status = scenario.status(0).unwrap();
    assert_eq!(status.floor, 1);
    assert_eq!(status.onboard, vec![2]);
    assert_eq!(status.stats.doors_opened, 2);
    assert_eq!(status.stats.picked_up, 2);
    assert_eq!(scenario.person(1).unwrap().state(), PersonState::Arrived);
    assert_eq!(scenario.person(0).unwrap().state(), PersonState::Traveling);

    let rest = scenario.run_until_arrived(20).await.unwrap();
    assert_eq!(rest, vec![vec![Ascend], vec![OpenDoors]]);
    assert!(scenario.all_arrived());
    assert_eq!(scenario.step().await.unwrap(), vec![Idle]);
    scenario.journeys_completed().await;

    let report = scenario.finish().await.unwrap();
    let elevator = report.elevators[0];
    assert_eq!(elevator.doors_opened, 3);
    assert_eq!(elevator.floors_traveled, 2);
    assert_eq!(elevator.steps_taken, 5);
    assert_eq!(elevator.picked_up, 2);
    assert_eq!(elevator.dropped_off, 2);
    assert_eq!(elevator.idle_count, 1);

    assert_eq!((report.persons[0].waiting_time, report.persons[0].travel_time), (1, 4));
    assert_eq!((report.persons[1].waiting_time, report.persons[1].travel_time), (1, 2));
    assert_eq!(report.mean_waiting_time, 1.0);
    assert_eq!(report.mean_travel_time, 3.0);
}

#[tokio::test]
async fn shared_ride_with_nearest_request() {
    two_persons_sharing_a_ride(AlgorithmId::NearestRequest).await;
}

#[tokio::test]
async fn shared_ride_with_most_requested_destination() {
    two_persons_sharing_a_ride(AlgorithmId::MostRequestedDestination).await;
}

#[tokio::test]
async fn full_elevator_leaves_the_rest_waiting() {
    let mut scenario = ScenarioBuilder::new(4, 1, 1)
        .person(0, 3)
        .person(2, 0)
        .build()
        .await
        .unwrap();

    assert_eq!(scenario.step().await.unwrap(), vec![OpenDoors]);
    // floor 2 cannot be assigned while the only elevator is full
    assert_eq!(scenario.step().await.unwrap(), vec![Ascend]);
    assert_eq!(scenario.step().await.unwrap(), vec![Ascend]);
    assert_eq!(scenario.step().await.unwrap(), vec![Ascend]);
    assert_eq!(scenario.person(1).unwrap().state(), PersonState::Waiting);

    scenario.run_until_arrived(50).await.unwrap();
    assert!(scenario.all_arrived());
    let report = scenario.finish().await.unwrap();
    // dropped off the first person on tick 5, back on floor 2 and boarding on tick 7
    assert_eq!(report.persons[1].waiting_time, 7);
    assert_eq!(report.persons[1].travel_time, 3);
}

#[tokio::test]
async fn requests_go_to_the_closest_elevator() {
    let mut scenario = ScenarioBuilder::new(6, 2, 2)
        .person(0, 5)
        .build()
        .await
        .unwrap();

    // both elevators start on floor 0, the first one wins the tie
    assert_eq!(scenario.step().await.unwrap(), vec![OpenDoors, Idle]);
    let trace = scenario.run_until_arrived(20).await.unwrap();
    assert_eq!(trace.len(), 6);
    assert!(trace.iter().all(|tick| tick[1] == Idle));
    assert_eq!(scenario.status(0).unwrap().floor, 5);
    assert_eq!(scenario.status(1).unwrap().floor, 0);
    scenario.finish().await.unwrap();
}

#[tokio::test]
async fn identical_scenarios_issue_identical_commands() {
    for algorithm in AlgorithmId::ALL {
        let mut traces = Vec::new();
        for _ in 0..2 {
            let mut scenario = ScenarioBuilder::new(8, 3, 2)
                .algorithm(algorithm)
                .person(0, 7)
                .person(0, 3)
                .person(4, 1)
                .person(7, 2)
                .person(7, 6)
                .person(5, 0)
                .build()
                .await
                .unwrap();
            let trace = scenario.run_until_arrived(200).await.unwrap();
            assert!(scenario.all_arrived(), "{} left persons behind", algorithm);
            let report = scenario.finish().await.unwrap();
            traces.push((trace, report));
        }
        assert_eq!(traces[0], traces[1]);
    }
}

#[tokio::test]
async fn rejects_floors_outside_the_building() {
    let result = ScenarioBuilder::new(3, 1, 2).person(5, 0).build().await;
    assert!(matches!(
        result,
        Err(ScenarioError::Config(ConfigError::FloorOutOfRange { floor: 5, floor_count: 3 }))
    ));
}

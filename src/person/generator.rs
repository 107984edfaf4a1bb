use std::sync::Arc;
use std::time::Duration;
use rand::{Rng, SeedableRng};
use rand_isaac::Isaac64Rng;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{error, info, instrument};

use crate::barrier::CompletionBarrier;
use crate::building::Building;
use crate::config::SimulationConfig;
use crate::person::{Person, PersonActor, PersonState};
use crate::shutdown::Shutdown;

/// Creates the persons of a run at short random intervals and spawns one [PersonActor] each.
pub struct PersonGenerator {
    building: Arc<Building>,
    barrier: Arc<CompletionBarrier>,
    person_count: usize,
    max_arrival_delay: Duration,
    rng: Isaac64Rng
}

impl PersonGenerator {
    /// Uses the configured seed if there is one, otherwise a fresh seed from the OS.
    pub fn new(config: &SimulationConfig, building: Arc<Building>, barrier: Arc<CompletionBarrier>) -> Self {
        let rng = match config.seed {
            Some(seed) => Isaac64Rng::seed_from_u64(seed),
            None => Isaac64Rng::from_entropy()
        };
        Self {
            building,
            barrier,
            person_count: config.person_count,
            max_arrival_delay: config.max_arrival_delay,
            rng
        }
    }

    /// Generates all persons, then waits for every journey to end. Returns the number of persons
    /// which arrived.
    #[instrument(skip_all, fields(persons = self.person_count))]
    pub async fn run(mut self, mut shutdown: Shutdown) -> usize {
        let floor_count = self.building.floor_count();
        let mut journeys = JoinSet::new();

        for id in 0..self.person_count {
            let delay = self.arrival_delay();
            tokio::select! {
                _ = sleep(delay) => {}
                _ = shutdown.wait() => {
                    break;
                }
            }

            let person = Arc::new(Person::random(id, floor_count, &mut self.rng));
            self.building.register(person.clone());
            let (actor, passenger) = PersonActor::new(person, self.barrier.clone());
            journeys.spawn(actor.run(passenger, self.building.clone(), shutdown.clone()));
        }
        info!("Generated {} persons", journeys.len());

        let mut arrived = 0;
        while let Some(journey) = journeys.join_next().await {
            match journey {
                Ok(PersonState::Arrived) => arrived += 1,
                Ok(_) => {}
                Err(err) => error!("Person task failed: {}", err)
            }
        }
        arrived
    }

    fn arrival_delay(&mut self) -> Duration {
        let max = self.max_arrival_delay.as_micros() as u64;
        if max == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.rng.gen_range(0..max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_generators_create_the_same_persons() {
        let config = SimulationConfig::new(6, 1, 2, 25)
            .with_seed(42)
            .with_max_arrival_delay(Duration::ZERO);

        let mut journeys = Vec::new();
        for _ in 0..2 {
            let building = Building::new(config.floor_count, config.elevator_capacity);
            let barrier = Arc::new(CompletionBarrier::new(config.person_count));
            let (trigger, shutdown) = crate::shutdown::channel();
            let generator = PersonGenerator::new(&config, building.clone(), barrier);
            let task = tokio::spawn(generator.run(shutdown));

            while building.person_count() < config.person_count {
                tokio::task::yield_now().await;
            }
            trigger.trigger();
            assert_eq!(task.await.unwrap(), 0);

            let floors: Vec<(usize, usize)> = building
                .persons()
                .iter()
                .map(|p| (p.starting_floor(), p.destination_floor()))
                .collect();
            journeys.push(floors);
        }
        assert_eq!(journeys[0], journeys[1]);
        assert_eq!(journeys[0].len(), 25);
    }
}

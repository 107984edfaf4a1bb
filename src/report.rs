//! This module contains the summary of a finished run and the sinks it can be written to.
//!
//! The textual form produced by `Display` looks like this:
//! ```text
//! Elevators
//!   Elevator 00:
//!     5 steps
//!     2 picked up
//!     2 floors traveled
//!     3 doors opened
//!     0 times idled
//! Persons: mean waiting time 1.00, mean traveling time 3.00
//!   Person 0000:
//!     waited 1 steps
//!     traveled 4 steps
//! ```

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::elevator::ElevatorStats;
use crate::person::{Person, PersonId};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Could not write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },
    #[error("No report available, the simulation has not finished")]
    NotFinished
}

/// Times of one person, in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonRecord {
    pub id: PersonId,
    pub waiting_time: u64,
    pub travel_time: u64
}

impl From<&Person> for PersonRecord {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id(),
            waiting_time: person.waiting_time(),
            travel_time: person.travel_time()
        }
    }
}

/// Structured summary of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationReport {
    pub elevators: Vec<ElevatorStats>,
    pub persons: Vec<PersonRecord>,
    pub mean_waiting_time: f64,
    pub mean_travel_time: f64
}

impl SimulationReport {
    /// Computes the means from `persons`. Both are 0 for a run without persons.
    pub fn new(elevators: Vec<ElevatorStats>, persons: Vec<PersonRecord>) -> Self {
        let mean_waiting_time = mean(persons.iter().map(|p| p.waiting_time));
        let mean_travel_time = mean(persons.iter().map(|p| p.travel_time));
        Self {
            elevators,
            persons,
            mean_waiting_time,
            mean_travel_time
        }
    }
}

fn mean(values: impl ExactSizeIterator<Item = u64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.sum::<u64>() as f64 / count as f64
}

impl Display for SimulationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Elevators")?;
        for elevator in &self.elevators {
            writeln!(f, "  Elevator {:02}:", elevator.id)?;
            writeln!(f, "    {} steps", elevator.steps_taken)?;
            writeln!(f, "    {} picked up", elevator.picked_up)?;
            writeln!(f, "    {} floors traveled", elevator.floors_traveled)?;
            writeln!(f, "    {} doors opened", elevator.doors_opened)?;
            writeln!(f, "    {} times idled", elevator.idle_count)?;
        }
        writeln!(
            f,
            "Persons: mean waiting time {:.2}, mean traveling time {:.2}",
            self.mean_waiting_time, self.mean_travel_time
        )?;
        for person in &self.persons {
            writeln!(f, "  Person {:04}:", person.id)?;
            writeln!(f, "    waited {} steps", person.waiting_time)?;
            writeln!(f, "    traveled {} steps", person.travel_time)?;
        }
        Ok(())
    }
}

/// Durable destination of a [SimulationReport]. Failures are handed back to the caller, which may
/// retry or pick another sink.
pub trait ReportSink {
    fn write_report(&mut self, report: &SimulationReport) -> Result<(), ReportError>;
}

/// Writes the textual report into any [Write], e.g. stdout or a buffer.
pub struct WriterSink<W: Write> {
    name: PathBuf,
    writer: W
}

impl<W: Write> WriterSink<W> {
    /// `name` only shows up in error messages.
    pub fn new(name: impl Into<PathBuf>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn write_report(&mut self, report: &SimulationReport) -> Result<(), ReportError> {
        write!(self.writer, "{}", report)
            .and_then(|_| self.writer.flush())
            .map_err(|source| ReportError::Io { path: self.name.clone(), source })
    }
}

/// Writes the textual report into a file. The file is created or truncated on every write.
pub struct FileSink {
    path: PathBuf
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileSink {
    fn write_report(&mut self, report: &SimulationReport) -> Result<(), ReportError> {
        let file = File::create(&self.path).map_err(|source| ReportError::Io {
            path: self.path.clone(),
            source
        })?;
        WriterSink::new(&self.path, BufWriter::new(file)).write_report(report)
    }
}

//! This module runs the same building once per dispatch algorithm and stores one report per run.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::config::{AlgorithmId, SimulationConfig};
use crate::controller::{Controller, RunSummary, SimulationError};
use crate::report::{FileSink, SimulationReport};

/// Result of one algorithm's run.
#[derive(Clone, Debug)]
pub struct AlgorithmRun {
    pub algorithm: AlgorithmId,
    pub summary: RunSummary,
    pub report: SimulationReport,
    pub report_path: PathBuf
}

/// Compares dispatch algorithms on the same parameters. Every algorithm gets a fresh
/// [Controller]; its report ends up in `<report_dir>/<algorithm>_report.txt`.
pub struct Simulation {
    config: SimulationConfig,
    algorithms: Vec<AlgorithmId>,
    report_dir: PathBuf
}

impl Simulation {
    /// Runs every algorithm if `algorithms` is empty.
    pub fn new(config: SimulationConfig, algorithms: Vec<AlgorithmId>, report_dir: impl Into<PathBuf>) -> Self {
        let algorithms = if algorithms.is_empty() {
            AlgorithmId::ALL.to_vec()
        } else {
            algorithms
        };
        Self {
            config,
            algorithms,
            report_dir: report_dir.into()
        }
    }

    pub fn algorithms(&self) -> &[AlgorithmId] {
        &self.algorithms
    }

    /// Path of the report file written for `algorithm`.
    pub fn report_path(&self, algorithm: AlgorithmId) -> PathBuf {
        report_path(&self.report_dir, algorithm)
    }

    /// Runs the algorithms one after another. Stops at the first failure.
    #[instrument(skip_all, fields(runs = self.algorithms.len()))]
    pub async fn run(&self) -> Result<Vec<AlgorithmRun>, SimulationError> {
        let mut runs = Vec::with_capacity(self.algorithms.len());
        for &algorithm in &self.algorithms {
            let config = self.config.clone().with_algorithm(algorithm);
            let mut controller = Controller::new(config)?;
            let summary = controller.run_configured().await?;

            let report_path = self.report_path(algorithm);
            controller.evaluate(&mut FileSink::new(&report_path))?;
            info!(%algorithm, ticks = summary.ticks, path = %report_path.display(), "Report written");

            if let Some(report) = controller.report() {
                runs.push(AlgorithmRun {
                    algorithm,
                    summary,
                    report: report.clone(),
                    report_path
                });
            }
        }
        Ok(runs)
    }
}

fn report_path(dir: &Path, algorithm: AlgorithmId) -> PathBuf {
    dir.join(format!("{}_report.txt", algorithm.name()))
}

use crate::config::{Config, Input};
use crate::error::{DiagnormError, RunnerError};
use crate::issue::{Report, Severity};
use crate::output::write_input_report;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{info, warn};

use super::parse_input;

#[derive(Debug)]
pub struct RunReport {
    pub input_results: Vec<InputResult>,
    pub total_duration: Duration,
}

impl RunReport {
    /// Issue counts per severity over all inputs
    pub fn totals(&self) -> BTreeMap<Severity, usize> {
        let mut totals: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|severity| (*severity, 0)).collect();
        for result in &self.input_results {
            for (severity, count) in result.report.severity_counts() {
                *totals.entry(severity).or_default() += count;
            }
        }
        totals
    }

    /// Number of issues at `threshold` or worse
    pub fn count_at_least(&self, threshold: Severity) -> usize {
        self.totals()
            .into_iter()
            .filter(|(severity, _)| *severity >= threshold)
            .map(|(_, count)| count)
            .sum()
    }
}

#[derive(Debug)]
pub struct InputResult {
    pub name: String,
    pub tool: String,
    pub status: InputStatus,
    pub report: Report,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputStatus {
    Completed,
    Failed { error: String },
}

pub struct Orchestrator {
    config: Config,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Parse all configured inputs, at most `concurrency` at a time. Each
    /// input gets its own parser, builder and report.
    pub async fn run(&self, report_dir: &Path) -> Result<RunReport, RunnerError> {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let options = self.config.parse_options();
        let fingerprint = self.config.fingerprint;

        let mut tasks = FuturesUnordered::new();
        for (index, input) in self.config.inputs.iter().cloned().enumerate() {
            let semaphore = semaphore.clone();
            tasks.push(async move {
                let _permit = semaphore.acquire_owned().await?;
                let started = Instant::now();
                let name = input.report_name();
                info!("Parsing {} ({:?}) as {}", name, input.path, input.tool);

                let task_input = input.clone();
                let outcome = join_outcome(
                    tokio::task::spawn_blocking(move || parse_input(&task_input, options, fingerprint))
                        .await,
                );

                Ok::<_, RunnerError>((index, to_result(name, &input, outcome, started.elapsed())))
            });
        }

        let mut input_results = Vec::with_capacity(self.config.inputs.len());
        while let Some(next) = tasks.next().await {
            let (index, result) = next?;
            if let Err(e) = write_input_report(report_dir, &result) {
                warn!("Failed to write report for {}: {}", result.name, e);
            }
            input_results.push((index, result));
        }

        // Report in configuration order, not completion order
        input_results.sort_by_key(|(index, _)| *index);

        Ok(RunReport {
            input_results: input_results.into_iter().map(|(_, result)| result).collect(),
            total_duration: start.elapsed(),
        })
    }
}

/// Flattens a parse task's result. A task that panicked or was cancelled
/// fails its input like any other parse error.
fn join_outcome(
    joined: Result<Result<Report, DiagnormError>, JoinError>,
) -> Result<Report, String> {
    match joined {
        Ok(outcome) => outcome.map_err(|e| e.to_string()),
        Err(e) => Err(RunnerError::Join(e).to_string()),
    }
}

fn to_result(
    name: String,
    input: &Input,
    outcome: Result<Report, String>,
    duration: Duration,
) -> InputResult {
    match outcome {
        Ok(report) => {
            info!(
                "{}: {} issues, {} errors in {:.2}s",
                name,
                report.len(),
                report.errors().len(),
                duration.as_secs_f64()
            );
            InputResult {
                name,
                tool: input.tool.clone(),
                status: InputStatus::Completed,
                report,
                duration,
            }
        }
        Err(e) => {
            warn!("{}: {}", name, e);
            InputResult {
                name,
                tool: input.tool.clone(),
                status: InputStatus::Failed { error: e },
                report: Report::new(),
                duration,
            }
        }
    }
}

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info};
use std::fs;
use std::thread;

use crate::atomic_write::replace_file;
use crate::document::Document;
use crate::error::TickerError;
use crate::record_update::{exceeds_total, increment_field};
use crate::run_config::RunConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Done,
}

/// What a single read-mutate-persist pass did.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub touched: usize,
    pub bytes_written: usize,
    pub next_state: LoopState,
    pub completed_at: DateTime<Utc>,
}

/// Totals for a run that reached `Done`.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub passes: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }
}

pub struct PollLoop {
    config: RunConfig,
}

impl PollLoop {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Reads the file fresh, bumps the field, and atomically rewrites it.
    /// The returned state is `Done` once any record is strictly over `total`.
    pub fn run_pass(&self) -> Result<PassOutcome> {
        let cfg = &self.config;

        let raw = fs::read(&cfg.path)
            .map_err(|e| TickerError::io(&cfg.path, e))
            .with_context(|| "Failed to read document")?;

        let mut doc = Document::from_bytes(&raw)
            .with_context(|| format!("Failed to parse {}", cfg.path.display()))?;

        let touched = increment_field(doc.records_mut(), &cfg.field, cfg.increment)?;
        let next_state = if exceeds_total(doc.records(), &cfg.field, cfg.total) {
            LoopState::Done
        } else {
            LoopState::Running
        };

        let bytes = doc.to_bytes()?;
        replace_file(&cfg.path, &bytes)
            .with_context(|| format!("Failed to replace {}", cfg.path.display()))?;

        Ok(PassOutcome {
            touched,
            bytes_written: bytes.len(),
            next_state,
            completed_at: Utc::now(),
        })
    }

    /// Runs passes until one reports `Done`, sleeping between passes.
    pub fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        let mut finished_at = started_at;
        let mut state = LoopState::Running;
        let mut passes = 0;

        while state == LoopState::Running {
            let outcome = self.run_pass()?;
            passes += 1;
            finished_at = outcome.completed_at;
            debug!(
                "pass {passes}: {} record(s) updated, {} bytes written at {}",
                outcome.touched,
                outcome.bytes_written,
                outcome.completed_at.to_rfc3339()
            );

            state = outcome.next_state;
            if state == LoopState::Running {
                thread::sleep(self.config.sleep);
            }
        }

        let summary = RunSummary {
            passes,
            started_at,
            finished_at,
        };
        info!(
            "`{}` exceeded {} in {} after {passes} pass(es), {} ms, last write at {}",
            self.config.field,
            self.config.total,
            self.config.path.display(),
            summary.elapsed().num_milliseconds(),
            summary.finished_at.to_rfc3339()
        );
        Ok(summary)
    }
}

//! Per-session alert bookkeeping

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::NO_INCORRECT_POSTURES;
use crate::types::PostureAlert;

/// Running totals of a monitoring session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub ticks: u64,
    pub total_alerts: u64,
    /// Alert descriptions in order of occurrence
    pub incorrect_postures: Vec<String>,
}

/// Session totals as reported outside the process (CLI `--json`, API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_secs: i64,
    pub ticks: u64,
    pub total_alerts: u64,
    pub incorrect_postures: Vec<String>,
}

impl Default for SessionSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSummary {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            ticks: 0,
            total_alerts: 0,
            incorrect_postures: Vec::new(),
        }
    }

    /// Count an alert
    pub fn record(&mut self, alert: &PostureAlert) {
        self.total_alerts += 1;
        self.incorrect_postures.push(alert.description.clone());
    }

    /// Posture list as reported at session end
    ///
    /// An alert-free session reports a single placeholder entry.
    pub fn reported_postures(&self) -> Vec<String> {
        if self.incorrect_postures.is_empty() {
            vec![NO_INCORRECT_POSTURES.to_string()]
        } else {
            self.incorrect_postures.clone()
        }
    }

    /// Snapshot for reporting, with the placeholder applied
    pub fn report(&self) -> SessionReport {
        SessionReport {
            started_at: self.started_at,
            elapsed_secs: self.elapsed_secs(),
            ticks: self.ticks,
            total_alerts: self.total_alerts,
            incorrect_postures: self.reported_postures(),
        }
    }

    /// Session length so far, in seconds
    pub fn elapsed_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

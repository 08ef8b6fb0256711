//! Output structures for terminal display and JSON

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{PostureLabel, ReasonCode, Region, Verdict};

/// Verdict of one region after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionOutput {
    pub region: Region,
    /// Sample ingested this tick, if any
    pub sample: Option<PostureLabel>,
    pub verdict: Verdict,
    pub reason: ReasonCode,
    /// Valid samples left in the window after evaluation
    pub len: usize,
    pub capacity: usize,
    /// Set only on FLAGGED
    pub flagged_label: Option<PostureLabel>,
}

impl RegionOutput {
    pub fn new(
        region: Region,
        sample: Option<PostureLabel>,
        verdict: Verdict,
        len: usize,
        capacity: usize,
        flagged_label: Option<PostureLabel>,
    ) -> Self {
        let flagged_label = flagged_label.filter(|_| verdict == Verdict::Flagged);
        Self {
            region,
            sample,
            verdict,
            reason: ReasonCode::for_verdict(verdict, flagged_label),
            len,
            capacity,
            flagged_label,
        }
    }

    /// Window fill, e.g. "12/95"
    pub fn fill(&self) -> String {
        format!("{}/{}", self.len, self.capacity)
    }

    fn sample_code(&self) -> char {
        self.sample.map(|l| l.code()).unwrap_or('-')
    }
}

/// Raised when a region is FLAGGED
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureAlert {
    pub timestamp: DateTime<Utc>,
    pub region: Region,
    pub label: PostureLabel,
    /// e.g. "reclined back"
    pub description: String,
}

impl PostureAlert {
    pub fn new(region: Region, label: PostureLabel) -> Self {
        Self {
            timestamp: Utc::now(),
            region,
            label,
            description: region.describe(label),
        }
    }
}

/// Output of one monitor tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// 1-based tick number within the session
    pub tick: u64,
    pub back: RegionOutput,
    pub neck: RegionOutput,
    /// Alerts raised this tick (back first)
    pub alerts: Vec<PostureAlert>,
}

impl TickOutput {
    pub fn new(tick: u64, back: RegionOutput, neck: RegionOutput) -> Self {
        let alerts = [&back, &neck]
            .into_iter()
            .filter_map(|r| r.flagged_label.map(|label| PostureAlert::new(r.region, label)))
            .collect();
        Self {
            timestamp: Utc::now(),
            tick,
            back,
            neck,
            alerts,
        }
    }

    /// Did any region raise an alert?
    pub fn has_alert(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let reset = Verdict::color_reset();
        let region = |r: &RegionOutput| {
            format!(
                "{}{} {}={} {} ({}){}",
                r.verdict.color_code(),
                r.verdict.emoji(),
                r.region.name(),
                r.sample_code(),
                r.verdict,
                r.fill(),
                reset
            )
        };
        format!("#{} | {} | {}", self.tick, region(&self.back), region(&self.neck))
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let region = |r: &RegionOutput| {
            format!(
                "{}={} verdict={} fill={} reason={}",
                r.region.name(),
                r.sample_code(),
                r.verdict,
                r.fill(),
                r.reason.code()
            )
        };
        format!("tick={} | {} | {}", self.tick, region(&self.back), region(&self.neck))
    }
}

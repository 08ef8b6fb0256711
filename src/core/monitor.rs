//! Posture monitor: one back and one neck window driven tick by tick
//!
//! Each tick ingests whatever labels the pose layer produced, then evaluates
//! the back window followed by the neck window. A region without a sample is
//! still evaluated.

use tracing::{debug, info};
use crate::core::{MonitorConfig, StabilityWindow};
use crate::error::Result;
use crate::types::{PostureLabel, Region, RegionOutput, SessionSummary, TickOutput};

/// Back + neck stability monitor for one user session
#[derive(Debug)]
pub struct PostureMonitor {
    back: StabilityWindow,
    neck: StabilityWindow,
    summary: SessionSummary,
}

impl PostureMonitor {
    pub fn new(config: &MonitorConfig) -> Result<Self> {
        let back = StabilityWindow::with_policy(
            Region::Back,
            config.capacity(Region::Back),
            config.policy,
        )?;
        let neck = StabilityWindow::with_policy(
            Region::Neck,
            config.capacity(Region::Neck),
            config.policy,
        )?;
        debug!(
            back_capacity = back.capacity(),
            neck_capacity = neck.capacity(),
            policy = ?config.policy,
            "posture monitor created"
        );
        Ok(Self {
            back,
            neck,
            summary: SessionSummary::new(),
        })
    }

    /// Feed one tick of labels and evaluate both regions
    pub fn tick(&mut self, back: Option<PostureLabel>, neck: Option<PostureLabel>) -> TickOutput {
        self.summary.ticks += 1;

        let back_out = Self::step(&mut self.back, back);
        let neck_out = Self::step(&mut self.neck, neck);

        let output = TickOutput::new(self.summary.ticks, back_out, neck_out);
        for alert in &output.alerts {
            info!(
                region = %alert.region,
                posture = %alert.description,
                tick = output.tick,
                "posture alert"
            );
            self.summary.record(alert);
        }
        output
    }

    fn step(window: &mut StabilityWindow, sample: Option<PostureLabel>) -> RegionOutput {
        if let Some(label) = sample {
            window.ingest(label);
        }
        let verdict = window.evaluate();
        RegionOutput::new(
            window.region(),
            sample,
            verdict,
            window.len(),
            window.capacity(),
            window.last_flagged_label(),
        )
    }

    pub fn back(&self) -> &StabilityWindow {
        &self.back
    }

    pub fn neck(&self) -> &StabilityWindow {
        &self.neck
    }

    pub fn window(&self, region: Region) -> &StabilityWindow {
        match region {
            Region::Back => &self.back,
            Region::Neck => &self.neck,
        }
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Clear both windows and start a fresh session
    pub fn reset(&mut self) {
        self.back.reset();
        self.neck.reset();
        self.summary = SessionSummary::new();
    }
}

// =============================================================================
// TESTS
// =============================================================================

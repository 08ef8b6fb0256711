//! Stability window: fixed-capacity ring of posture labels for one region
//!
//! Decision order on `evaluate()`:
//! - every slot holds the same incorrect label → FLAGGED (window reset)
//! - correct and incorrect labels mixed → MOVING (window reset)
//! - otherwise → STABLE (window kept)
//!
//! Predicates scan every physical slot. Empty slots hold `None`, which never
//! matches a label, so a window can only be FLAGGED once every slot was written.

use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::error::{PostureError, Result};
use crate::types::{PostureLabel, Region, Verdict};
use crate::MAX_CAPACITY;

/// When `evaluate()` is allowed to reach a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationPolicy {
    /// Report ACCUMULATING until the window has been filled once
    #[default]
    GatedUntilFull,
    /// Evaluate every tick, empty slots included
    Literal,
}

/// Rolling window of the most recent posture labels of one region
#[derive(Debug, Clone)]
pub struct StabilityWindow {
    /// Predicate set
    region: Region,
    /// Label slots, `None` = empty
    slots: Box<[Option<PostureLabel>]>,
    /// Next write position
    head: usize,
    /// Oldest valid sample once full
    tail: usize,
    /// Holds `capacity` valid samples since the last reset
    is_full: bool,
    /// Label recorded when the window was last FLAGGED (survives reset)
    last_flagged: Option<PostureLabel>,
    policy: EvaluationPolicy,
}

impl StabilityWindow {
    /// Create a window with the default (gated) policy
    pub fn new(region: Region, capacity: usize) -> Result<Self> {
        Self::with_policy(region, capacity, EvaluationPolicy::default())
    }

    /// Create a window with an explicit evaluation policy
    pub fn with_policy(region: Region, capacity: usize, policy: EvaluationPolicy) -> Result<Self> {
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(PostureError::InvalidCapacity(capacity));
        }
        Ok(Self {
            region,
            slots: vec![None; capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            is_full: false,
            last_flagged: None,
            policy,
        })
    }

    /// Append a sample, evicting the oldest one once full
    pub fn ingest(&mut self, label: PostureLabel) {
        let capacity = self.capacity();
        self.slots[self.head] = Some(label);
        self.head = (self.head + 1) % capacity;
        if self.head == self.tail {
            self.is_full = true;
            self.tail = (self.tail + 1) % capacity;
        }
    }

    /// Append a sample given as its wire code
    pub fn ingest_code(&mut self, code: char) -> Result<()> {
        let label = PostureLabel::from_code(code)?;
        self.ingest(label);
        Ok(())
    }

    /// Clear every slot and both cursors. `last_flagged_label` is kept.
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.tail = 0;
        self.is_full = false;
    }

    /// No samples since the last reset
    pub fn is_empty(&self) -> bool {
        !self.is_full && self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        self.is_full
    }

    /// Every slot holds the same incorrect label for this region
    pub fn is_incorrect(&self) -> bool {
        self.region
            .incorrect_labels()
            .iter()
            .any(|bad| self.slots.iter().all(|slot| *slot == Some(*bad)))
    }

    /// Window holds at least one upright and one incorrect sample
    pub fn is_moving(&self) -> bool {
        let mut upright = false;
        let mut incorrect = false;
        for label in self.slots.iter().flatten() {
            if *label == PostureLabel::Upright {
                upright = true;
            } else if self.region.is_incorrect_label(*label) {
                incorrect = true;
            }
        }
        upright && incorrect
    }

    /// Decide on the current window contents
    ///
    /// FLAGGED records `slots[0]` as the flagged label: the first physical
    /// slot, not necessarily the newest sample.
    pub fn evaluate(&mut self) -> Verdict {
        if self.policy == EvaluationPolicy::GatedUntilFull && !self.is_full {
            return Verdict::Accumulating;
        }

        if self.is_incorrect() {
            self.last_flagged = self.slots[0];
            debug!(
                region = %self.region,
                label = ?self.last_flagged,
                capacity = self.capacity(),
                "incorrect posture held for the whole window, resetting"
            );
            self.reset();
            Verdict::Flagged
        } else if self.is_moving() {
            debug!(region = %self.region, "user is moving, resetting window");
            self.reset();
            Verdict::Moving
        } else {
            Verdict::Stable
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of valid samples since the last reset
    pub fn len(&self) -> usize {
        if self.is_full {
            self.capacity()
        } else {
            self.head
        }
    }

    /// Raw slots in physical order
    pub fn slots(&self) -> &[Option<PostureLabel>] {
        &self.slots
    }

    /// Valid samples, oldest first
    pub fn samples(&self) -> impl Iterator<Item = PostureLabel> + '_ {
        let start = if self.is_full { self.tail } else { 0 };
        let capacity = self.capacity();
        (0..self.len()).filter_map(move |i| self.slots[(start + i) % capacity])
    }

    /// Label recorded at the last FLAGGED verdict
    pub fn last_flagged_label(&self) -> Option<PostureLabel> {
        self.last_flagged
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use PostureLabel::{ForwardLeaning as F, Reclined as R, Upright as U};

    fn filled(region: Region, labels: &[PostureLabel]) -> StabilityWindow {
        let mut window = StabilityWindow::new(region, labels.len()).unwrap();
        labels.iter().for_each(|l| window.ingest(*l));
        window
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = StabilityWindow::new(Region::Back, 0).unwrap_err();
        assert!(matches!(err, PostureError::InvalidCapacity(0)));
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        assert!(StabilityWindow::new(Region::Neck, MAX_CAPACITY).is_ok());
        for capacity in [MAX_CAPACITY + 1, 1 << 40, usize::MAX] {
            let err = StabilityWindow::new(Region::Back, capacity).unwrap_err();
            assert!(matches!(err, PostureError::InvalidCapacity(c) if c == capacity));
        }
    }

    #[test]
    fn test_new_window_is_empty() {
        let window = StabilityWindow::new(Region::Back, 5).unwrap();
        assert!(window.is_empty());
        assert!(!window.is_full());
        assert_eq!(window.len(), 0);
        assert!(window.slots().iter().all(Option::is_none));
    }

    #[test]
    fn test_partial_fill_not_empty_not_full() {
        let mut window = StabilityWindow::new(Region::Back, 5).unwrap();
        for n in 1..5 {
            window.ingest(U);
            assert!(!window.is_empty());
            assert!(!window.is_full());
            assert_eq!(window.len(), n);
        }
    }

    #[test]
    fn test_full_after_capacity_ingests() {
        let mut window = StabilityWindow::new(Region::Back, 3).unwrap();
        window.ingest(U);
        window.ingest(U);
        assert!(!window.is_full());
        window.ingest(U);
        assert!(window.is_full());
        // head == tail here, but the window is full, not empty
        assert!(!window.is_empty());
        window.ingest(R);
        assert!(window.is_full());
    }

    #[test]
    fn test_eviction_keeps_most_recent() {
        let mut window = StabilityWindow::new(Region::Back, 3).unwrap();
        for label in [U, R, F, U] {
            window.ingest(label);
        }
        let samples: Vec<_> = window.samples().collect();
        assert_eq!(samples, vec![R, F, U]);
        // oldest slot overwritten in place
        assert_eq!(window.slots()[0], Some(U));
    }

    #[test]
    fn test_reset_idempotent_and_keeps_flagged_label() {
        let mut window = filled(Region::Back, &[R, R, R]);
        assert_eq!(window.evaluate(), Verdict::Flagged);
        window.ingest(U);
        window.reset();
        let once = format!("{:?}", window);
        window.reset();
        assert_eq!(format!("{:?}", window), once);
        assert!(window.is_empty());
        assert_eq!(window.last_flagged_label(), Some(R));
    }

    #[test]
    fn test_back_incorrect_all_reclined_or_all_forward() {
        assert!(filled(Region::Back, &[R, R, R, R]).is_incorrect());
        assert!(filled(Region::Back, &[F, F, F, F]).is_incorrect());
        assert!(!filled(Region::Back, &[R, F, R, F]).is_incorrect());
        assert!(!filled(Region::Back, &[U, U, U, U]).is_incorrect());
    }

    #[test]
    fn test_neck_incorrect_only_forward() {
        assert!(filled(Region::Neck, &[F, F, F]).is_incorrect());
        assert!(!filled(Region::Neck, &[R, R, R]).is_incorrect());
    }

    #[test]
    fn test_back_moving_needs_both_sides() {
        assert!(filled(Region::Back, &[U, R, U]).is_moving());
        assert!(filled(Region::Back, &[U, F, U]).is_moving());
        assert!(!filled(Region::Back, &[R, F, R]).is_moving());
        assert!(!filled(Region::Back, &[U, U, U]).is_moving());
    }

    #[test]
    fn test_neck_moving_ignores_reclined() {
        assert!(!filled(Region::Neck, &[U, R, U]).is_moving());
        assert!(filled(Region::Neck, &[U, F, R]).is_moving());
    }

    #[test]
    fn test_flagged_records_first_physical_slot() {
        let mut window = StabilityWindow::new(Region::Back, 3).unwrap();
        for label in [U, F, F, F] {
            window.ingest(label);
        }
        // slots: [F, F, F] after wrapping over the initial U
        assert_eq!(window.evaluate(), Verdict::Flagged);
        assert_eq!(window.last_flagged_label(), Some(F));
        assert!(window.is_empty());
    }

    #[test]
    fn test_stable_leaves_window_untouched() {
        let mut window = filled(Region::Back, &[U, U, U]);
        assert_eq!(window.evaluate(), Verdict::Stable);
        assert!(window.is_full());
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_gated_waits_for_full_window() {
        let mut window = StabilityWindow::new(Region::Back, 4).unwrap();
        window.ingest(U);
        window.ingest(R);
        assert_eq!(window.evaluate(), Verdict::Accumulating);
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn test_literal_moving_before_full() {
        let mut window =
            StabilityWindow::with_policy(Region::Back, 4, EvaluationPolicy::Literal).unwrap();
        window.ingest(U);
        assert_eq!(window.evaluate(), Verdict::Stable);
        window.ingest(R);
        assert_eq!(window.evaluate(), Verdict::Moving);
        assert!(window.is_empty());
    }

    #[test]
    fn test_literal_never_flags_partial_window() {
        let mut window =
            StabilityWindow::with_policy(Region::Neck, 3, EvaluationPolicy::Literal).unwrap();
        window.ingest(F);
        assert_eq!(window.evaluate(), Verdict::Stable);
        window.ingest(F);
        assert_eq!(window.evaluate(), Verdict::Stable);
        window.ingest(F);
        assert_eq!(window.evaluate(), Verdict::Flagged);
    }

    #[test]
    fn test_ingest_code_rejects_unknown() {
        let mut window = StabilityWindow::new(Region::Neck, 2).unwrap();
        assert!(window.ingest_code('f').is_ok());
        assert!(matches!(
            window.ingest_code('z'),
            Err(PostureError::ContractViolation { code: 'z' })
        ));
        assert_eq!(window.len(), 1);
    }
}

//! Integration tests for the stability window
//!
//! Scenario coverage of the window lifecycle:
//! - fill, wrap and evict
//! - FLAGGED / MOVING / STABLE decisions for back and neck
//! - window empty after every resetting verdict

use pretty_assertions::assert_eq;
use postureguard::core::{EvaluationPolicy, StabilityWindow};
use postureguard::types::{PostureLabel, Region, Verdict};
use PostureLabel::{ForwardLeaning as F, Reclined as R, Upright as U};

fn window_with(region: Region, capacity: usize, labels: &[PostureLabel]) -> StabilityWindow {
    let mut window = StabilityWindow::new(region, capacity).unwrap();
    for label in labels {
        window.ingest(*label);
    }
    window
}

#[test]
fn test_back_sustained_reclined_is_flagged() {
    let mut window = window_with(Region::Back, 5, &[R, R, R, R, R]);

    assert_eq!(window.evaluate(), Verdict::Flagged);
    assert_eq!(window.last_flagged_label(), Some(R));
    assert!(window.is_empty());
}

#[test]
fn test_back_transition_is_moving() {
    let mut window = window_with(Region::Back, 5, &[U, R, U, F, U]);

    assert!(!window.is_incorrect());
    assert!(window.is_moving());
    assert_eq!(window.evaluate(), Verdict::Moving);
    assert!(window.is_empty());
    assert_eq!(window.last_flagged_label(), None);
}

#[test]
fn test_back_all_upright_is_stable_then_rolls() {
    let mut window = window_with(Region::Back, 5, &[U, U, U, U, U]);

    assert!(!window.is_incorrect());
    assert!(!window.is_moving());
    assert_eq!(window.evaluate(), Verdict::Stable);
    assert!(window.is_full());
    assert_eq!(window.len(), 5);

    // Next ingest evicts the oldest upright
    window.ingest(R);
    assert!(window.is_full());
    assert_eq!(window.samples().collect::<Vec<_>>(), vec![U, U, U, U, R]);
    assert_eq!(window.slots()[0], Some(R));
}

#[test]
fn test_neck_reclined_breaks_forward_run() {
    let labels = [F, F, R, F];
    let mut neck = window_with(Region::Neck, 4, &labels);
    let back = window_with(Region::Back, 4, &labels);

    assert!(!neck.is_incorrect());
    assert!(!back.is_incorrect());
    // No upright sample: not moving either, for both regions
    assert!(!neck.is_moving());
    assert!(!back.is_moving());
    assert_eq!(neck.evaluate(), Verdict::Stable);
}

#[test]
fn test_neck_sustained_forward_is_flagged() {
    let mut window = window_with(Region::Neck, 4, &[F, F, F, F]);
    assert_eq!(window.evaluate(), Verdict::Flagged);
    assert_eq!(window.last_flagged_label(), Some(F));
}

#[test]
fn test_neck_ignores_reclined_back_flags() {
    let mut neck = window_with(Region::Neck, 3, &[R, R, R]);
    let mut back = window_with(Region::Back, 3, &[R, R, R]);
    assert_eq!(neck.evaluate(), Verdict::Stable);
    assert_eq!(back.evaluate(), Verdict::Flagged);
}

#[test]
fn test_empty_after_every_resetting_verdict() {
    let sequences: [&[PostureLabel]; 4] = [
        &[R, R, R],
        &[F, F, F],
        &[U, F, U],
        &[R, U, R],
    ];
    for seq in sequences {
        let mut window = window_with(Region::Back, 3, seq);
        let verdict = window.evaluate();
        assert!(verdict.resets_window(), "{:?} gave {}", seq, verdict);
        assert!(window.is_empty(), "{:?} left samples behind", seq);
        assert_eq!(window.len(), 0);
        assert!(window.slots().iter().all(Option::is_none));
    }
}

#[test]
fn test_full_stays_full_until_reset() {
    let mut window = window_with(Region::Back, 3, &[U, U, U]);
    for _ in 0..10 {
        window.ingest(U);
        assert!(window.is_full());
        assert_eq!(window.evaluate(), Verdict::Stable);
    }
    window.reset();
    assert!(!window.is_full());
    assert!(window.is_empty());
}

#[test]
fn test_flag_after_long_stream_reports_first_slot() {
    // Capacity 4: the wrap overwrites R and U, physical slots become [F, F, F, F]
    let mut window = window_with(Region::Back, 4, &[R, U]);
    for _ in 0..4 {
        window.ingest(F);
    }
    assert_eq!(window.slots(), &[Some(F), Some(F), Some(F), Some(F)]);
    assert_eq!(window.evaluate(), Verdict::Flagged);
    assert_eq!(window.last_flagged_label(), Some(F));
}

#[test]
fn test_literal_policy_matches_gated_once_full() {
    let labels = [U, U, R, U];
    let mut gated = window_with(Region::Back, 4, &labels);
    let mut literal =
        StabilityWindow::with_policy(Region::Back, 4, EvaluationPolicy::Literal).unwrap();
    labels.iter().for_each(|l| literal.ingest(*l));

    assert_eq!(gated.evaluate(), literal.evaluate());
}

#[test]
fn test_gated_policy_defers_partial_window() {
    let mut window = StabilityWindow::new(Region::Back, 5).unwrap();
    for label in [U, R, U, F] {
        window.ingest(label);
        assert_eq!(window.evaluate(), Verdict::Accumulating);
    }
    assert_eq!(window.len(), 4);
    window.ingest(U);
    assert_eq!(window.evaluate(), Verdict::Moving);
}

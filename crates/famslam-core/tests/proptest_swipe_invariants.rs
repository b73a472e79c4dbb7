//! Property-based invariant tests for swipe recognition.
//!
//! 1. The decision is exclusive at the threshold: `delta > threshold` deletes.
//! 2. Progress is monotonically non-decreasing in `delta` on `[0, threshold]`.
//! 3. Progress is clamped to `[0, 1]` for any delta.
//! 4. `end` on the tracked row always returns the tracker to idle.
//! 5. Events for other rows never alter the tracked row's delta.
//! 6. For one row, the decision depends only on the samples since its last
//!    press, however many presses arrive without a release.
//! 7. A row left tracking blocks every other row until it resolves.

use famslam_core::gesture::{
    GestureTracker, SwipeConfig, SwipeDecision, SwipePhase, swipe_decision, swipe_progress,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Sample {
    Down(f32),
    Move(f32),
}

fn sample_strategy() -> impl Strategy<Value = Sample> {
    prop_oneof![
        (-1000.0f32..1000.0).prop_map(Sample::Down),
        (-1000.0f32..1000.0).prop_map(Sample::Move),
    ]
}

fn extent_strategy() -> impl Strategy<Value = f32> {
    1.0f32..2000.0
}

fn ratio_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![Just(0.5f32), Just(0.75f32), 0.05f32..=1.0]
}

proptest! {
    #[test]
    fn decision_matches_exclusive_threshold(
        delta in -3000.0f32..3000.0,
        extent in extent_strategy(),
        ratio in ratio_strategy(),
    ) {
        let threshold = extent * ratio;
        let expected = if delta > threshold {
            SwipeDecision::Delete
        } else {
            SwipeDecision::Cancel
        };
        prop_assert_eq!(swipe_decision(delta, extent, ratio), expected);
    }
}

proptest! {
    #[test]
    fn decision_at_exact_threshold_cancels(extent in extent_strategy(), ratio in ratio_strategy()) {
        let threshold = extent * ratio;
        prop_assert_eq!(swipe_decision(threshold, extent, ratio), SwipeDecision::Cancel);
    }
}

proptest! {
    #[test]
    fn progress_monotone_on_unit_interval(
        threshold in 1.0f32..1500.0,
        a in 0.0f32..=1.0,
        b in 0.0f32..=1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = swipe_progress(lo * threshold, threshold);
        let p_hi = swipe_progress(hi * threshold, threshold);
        prop_assert!(p_lo <= p_hi, "progress decreased: {} -> {}", p_lo, p_hi);
    }
}

proptest! {
    #[test]
    fn progress_is_clamped(delta in -1.0e6f32..1.0e6, threshold in 0.0f32..1500.0) {
        let p = swipe_progress(delta, threshold);
        prop_assert!((0.0..=1.0).contains(&p), "progress {} out of range", p);
    }
}

proptest! {
    #[test]
    fn end_always_resets(
        origin in -1000.0f32..1000.0,
        moves in proptest::collection::vec(-1000.0f32..1000.0, 0..20),
        extent in extent_strategy(),
    ) {
        let mut tracker = GestureTracker::new(SwipeConfig::default());
        tracker.begin(7u32, origin);
        for pos in &moves {
            tracker.update(&7, *pos);
        }
        let last = moves.last().copied().unwrap_or(origin);
        let expected = swipe_decision(origin - last, extent, 0.75);
        prop_assert_eq!(tracker.end(&7, extent), expected);
        prop_assert_eq!(tracker.phase(), SwipePhase::Idle);
        prop_assert_eq!(tracker.progress(&7, extent), 0.0);
    }
}

proptest! {
    #[test]
    fn foreign_events_do_not_leak(
        origin in -1000.0f32..1000.0,
        own in -1000.0f32..1000.0,
        foreign in proptest::collection::vec(-1000.0f32..1000.0, 1..20),
        extent in extent_strategy(),
    ) {
        let mut tracker = GestureTracker::new(SwipeConfig::default());
        tracker.begin(1u32, origin);
        tracker.update(&1, own);

        for pos in &foreign {
            tracker.begin(2, *pos);
            tracker.update(&2, *pos);
            prop_assert_eq!(tracker.end(&2, extent), SwipeDecision::Cancel);
        }

        prop_assert_eq!(tracker.delta(&1), Some(origin - own));
        prop_assert!(tracker.is_tracking(&1));
    }
}

proptest! {
    #[test]
    fn decision_uses_samples_since_last_press(
        first in -1000.0f32..1000.0,
        samples in proptest::collection::vec(sample_strategy(), 0..30),
        release in -1000.0f32..1000.0,
        extent in extent_strategy(),
    ) {
        let mut tracker = GestureTracker::new(SwipeConfig::default());
        prop_assert!(tracker.begin(3u32, first));
        let mut origin = first;
        for sample in &samples {
            match *sample {
                Sample::Down(pos) => {
                    prop_assert!(tracker.begin(3, pos));
                    origin = pos;
                }
                Sample::Move(pos) => {
                    prop_assert!(tracker.update(&3, pos));
                }
            }
        }
        tracker.update(&3, release);
        let expected = swipe_decision(origin - release, extent, 0.75);
        prop_assert_eq!(tracker.end(&3, extent), expected);
        prop_assert_eq!(tracker.phase(), SwipePhase::Idle);
    }
}

proptest! {
    #[test]
    fn stuck_row_blocks_others_until_resolved(
        origin in -1000.0f32..1000.0,
        others in proptest::collection::vec((2u32..10, -1000.0f32..1000.0), 1..10),
        extent in extent_strategy(),
        cancel in any::<bool>(),
    ) {
        let mut tracker = GestureTracker::new(SwipeConfig::default());
        tracker.begin(1u32, origin);

        for (id, pos) in &others {
            prop_assert!(!tracker.begin(*id, *pos));
            prop_assert!(!tracker.is_tracking(id));
        }
        prop_assert_eq!(tracker.active_id(), Some(&1));

        if cancel {
            prop_assert!(tracker.cancel(&1));
        } else {
            tracker.end(&1, extent);
        }
        let (id, pos) = others[0];
        prop_assert!(tracker.begin(id, pos));
        prop_assert!(tracker.is_tracking(&id));
    }
}

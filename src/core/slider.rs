/// Slider granularity for a given total; larger totals get coarser steps.
pub fn slider_step(total: u64) -> u64 {
    match total {
        0..=1_000 => 1,
        1_001..=10_000 => 10,
        10_001..=100_000 => 100,
        100_001..=1_000_000 => 500,
        _ => 1_000,
    }
}

/// `total / 2` rounded half up.
pub fn half_total(total: u64) -> u64 {
    total.div_ceil(2)
}

/// Maps a raw slider position to the fixed amount, snapping to 50%, 100% or 0%
/// of `total` when close enough. Rules are checked in that order.
///
/// The 100% window is a full `step` wide while the other two use `step / 2`.
pub fn snap_slider_value(value: u64, total: u64, step: u64) -> u64 {
    let value = value.min(total);
    let half = half_total(total);

    // Comparisons against `step / 2` are done doubled to stay in integers.
    if value.abs_diff(half).saturating_mul(2) <= step {
        half
    } else if value.abs_diff(total) <= step {
        total
    } else if value.saturating_mul(2) <= step {
        0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn step_grows_with_total() {
        assert_eq!(slider_step(0), 1);
        assert_eq!(slider_step(1_000), 1);
        assert_eq!(slider_step(1_001), 10);
        assert_eq!(slider_step(10_000), 10);
        assert_eq!(slider_step(100_000), 100);
        assert_eq!(slider_step(100_001), 500);
        assert_eq!(slider_step(1_000_000), 500);
        assert_eq!(slider_step(1_000_001), 1_000);
        assert_eq!(slider_step(u64::MAX), 1_000);
    }

    #[test]
    fn half_total_rounds_half_up() {
        assert_eq!(half_total(1_000_000), 500_000);
        assert_eq!(half_total(7), 4);
        assert_eq!(half_total(0), 0);
    }

    #[test]
    fn snaps_to_half_total() {
        assert_eq!(snap_slider_value(499_800, 1_000_000, 1_000), 500_000);
        assert_eq!(snap_slider_value(500_500, 1_000_000, 1_000), 500_000);
        assert_eq!(snap_slider_value(500_501, 1_000_000, 1_000), 500_501);
    }

    #[test]
    fn snaps_to_total_with_full_step_window() {
        assert_eq!(snap_slider_value(999_500, 1_000_000, 1_000), 1_000_000);
        assert_eq!(snap_slider_value(999_000, 1_000_000, 1_000), 1_000_000);
        assert_eq!(snap_slider_value(998_999, 1_000_000, 1_000), 998_999);
    }

    #[test]
    fn snaps_to_zero_with_half_step_window() {
        assert_eq!(snap_slider_value(300, 1_000_000, 1_000), 0);
        assert_eq!(snap_slider_value(500, 1_000_000, 1_000), 0);
        assert_eq!(snap_slider_value(501, 1_000_000, 1_000), 501);
    }

    #[test]
    fn half_rule_wins_over_the_others_on_tiny_totals() {
        // total 2, step 1: half = 1, and 1 is also within a step of total.
        assert_eq!(snap_slider_value(1, 2, 1), 1);
        // total 1, step 1: 0 is a full step from the total, so it never reaches the zero rule.
        assert_eq!(snap_slider_value(0, 1, 1), 1);
    }

    #[test]
    fn values_past_total_are_clamped() {
        assert_eq!(snap_slider_value(2_000_000, 1_000_000, 1_000), 1_000_000);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        #[test]
        fn prop_snapped_value_stays_within_total(
            total in 0u64..50_000_000,
            value in 0u64..60_000_000
        ) {
            let snapped = snap_slider_value(value, total, slider_step(total));
            prop_assert!(snapped <= total);
        }

        #[test]
        fn prop_snapped_value_is_raw_or_a_snap_point(
            total in 0u64..50_000_000,
            value in 0u64..50_000_000
        ) {
            let value = value.min(total);
            let snapped = snap_slider_value(value, total, slider_step(total));
            prop_assert!(
                snapped == value || snapped == 0 || snapped == total || snapped == half_total(total)
            );
        }

        #[test]
        fn prop_far_from_snap_points_is_unchanged(
            total in 100_000u64..50_000_000,
            pct in 5u64..45
        ) {
            let value = total * pct / 100;
            prop_assert_eq!(snap_slider_value(value, total, slider_step(total)), value);
        }
    }
}

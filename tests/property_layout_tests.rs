use fieldwork_board::api::ease_in_out_quad;
use fieldwork_board::core::fit_to_grid;
use proptest::prelude::*;

proptest! {
    #[test]
    fn window_fits_the_axis_and_stays_inside_the_range(
        axis_length in 0.0f64..5_000.0,
        offset in 0.0f64..600.0,
        total in 0usize..400,
        unit in 1.0f64..120.0,
        index in -50i64..500
    ) {
        let window = fit_to_grid(axis_length, offset, total, unit, index);
        let room = (axis_length - offset).max(0.0);

        prop_assert!(window.start <= window.end);
        prop_assert!(window.end <= total);
        prop_assert!(window.len() as f64 * unit <= room + 1e-9);
    }

    #[test]
    fn ranges_that_fit_are_shown_whole(
        offset in 0.0f64..300.0,
        total in 1usize..60,
        unit in 4.0f64..80.0,
        slack in 0.5f64..500.0,
        index in -20i64..200
    ) {
        let axis_length = offset + total as f64 * unit + slack;
        prop_assert_eq!(fit_to_grid(axis_length, offset, total, unit, index), 0..total);
    }

    #[test]
    fn stepping_the_index_shifts_the_window_by_one(
        axis_length in 300.0f64..3_000.0,
        offset in 0.0f64..250.0,
        total in 1usize..300,
        unit in 8.0f64..80.0,
        index in 0i64..300
    ) {
        let current = fit_to_grid(axis_length, offset, total, unit, index);
        let next = fit_to_grid(axis_length, offset, total, unit, index + 1);
        if !current.is_empty() && current.end < total {
            prop_assert_eq!(next.start, current.start + 1);
            prop_assert_eq!(next.len(), current.len());
        } else {
            // Anchored at the trailing edge: further steps change nothing.
            prop_assert_eq!(next, current);
        }
    }

    #[test]
    fn easing_is_strictly_increasing(a in 0.0f64..1.0, step in 1e-4f64..1.0) {
        let b = a + step;
        prop_assume!(b <= 1.0);
        prop_assert!(ease_in_out_quad(a) < ease_in_out_quad(b));
        prop_assert!((0.0..=1.0).contains(&ease_in_out_quad(a)));
    }
}

#[test]
fn easing_anchor_points() {
    assert_eq!(ease_in_out_quad(0.0), 0.0);
    assert_eq!(ease_in_out_quad(0.5), 0.5);
    assert_eq!(ease_in_out_quad(1.0), 1.0);
}

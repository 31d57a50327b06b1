use fod_core::{CalibrationTable, DimCalculator, REFERENCE_TABLE, interpolate};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        .. ProptestConfig::default()
    })]

    // Alpha never leaves the span of the reference table.
    #[test]
    fn dim_alpha_stays_within_table_range(brightness in -10_000i32..10_000) {
        let calc = DimCalculator::default();
        let alpha = calc.compute_dim_alpha(brightness);
        prop_assert!((0..=255).contains(&alpha), "alpha {alpha} for {brightness}");
    }

    #[test]
    fn breakpoints_are_exact(idx in 0usize..REFERENCE_TABLE.len()) {
        let calc = DimCalculator::default();
        let (b, a) = REFERENCE_TABLE[idx];
        prop_assert_eq!(calc.compute_dim_alpha(b), a);
    }

    #[test]
    fn out_of_range_clamps_to_endpoints(delta in 1i32..1_000_000) {
        let calc = DimCalculator::default();
        let (first_b, first_a) = REFERENCE_TABLE[0];
        let (last_b, last_a) = REFERENCE_TABLE[REFERENCE_TABLE.len() - 1];
        prop_assert_eq!(calc.compute_dim_alpha(first_b - delta), first_a);
        prop_assert_eq!(calc.compute_dim_alpha(last_b + delta), last_a);
    }

    #[test]
    fn interpolate_hits_both_endpoints(
        xa in -1_000i32..1_000,
        width in 1i32..1_000,
        ya in 0i32..=255,
        yb in 0i32..=255,
    ) {
        let xb = xa + width;
        prop_assert_eq!(interpolate(xa, xa, xb, ya, yb), ya);
        prop_assert_eq!(interpolate(xb, xa, xb, ya, yb), yb);
    }

    #[test]
    fn flat_segment_is_constant(x in 0i32..100, y in 0i32..=255) {
        prop_assert_eq!(interpolate(x, 0, 100, y, y), y);
    }

    #[test]
    fn dim_amount_is_bounded(raw in -100i32..1_000, pct in 0.0f32..=100.0) {
        let calc = DimCalculator::default();
        let amount = calc.compute_dim_amount(raw, pct);
        prop_assert!((0..=255).contains(&amount));
        let full = calc.compute_dim_amount(raw, 100.0);
        prop_assert!(amount <= full);
    }

    // Any strictly increasing table with valid alphas is accepted.
    #[test]
    fn increasing_tables_validate(
        steps in prop::collection::vec((1i32..500, 0i32..=255), 1..32)
    ) {
        let mut b = 0;
        let points: Vec<(i32, i32)> = steps
            .into_iter()
            .map(|(step, a)| {
                b += step;
                (b, a)
            })
            .collect();
        let table = CalibrationTable::try_new(points.clone());
        prop_assert!(table.is_ok());
        let calc = DimCalculator::new(table.unwrap(), 1.0);
        for (b, a) in points {
            prop_assert_eq!(calc.compute_dim_alpha(b), a);
        }
    }
}

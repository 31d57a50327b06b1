#![no_main]
use fod_core::{CalibrationTable, DimCalculator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(rows) = fod_config::parse_calibration_csv(data) else {
        return;
    };
    let Ok(table) = CalibrationTable::try_from(rows.as_slice()) else {
        return;
    };
    // Any accepted table must be usable across the whole i32 range.
    let calc = DimCalculator::new(table, 1.0);
    for b in [i32::MIN, -1, 0, 1, 255, 1023, 2000, i32::MAX] {
        let _ = calc.compute_dim_alpha(b);
        let _ = calc.compute_dim_amount(b, 90.0);
    }
});

/*
MIT License
Copyright (c)  Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! End-to-end sizing behaviour on a synthetic-but-realistic g-function
//! table: a logarithmic growth in time with a mild depth dependence,
//! tabulated on the aggregation grid like the shipped datasets.

use std::sync::Arc;

use borehole::ResistanceModel;
use communication::{Error, GroundLoad};
use gfunction::{claesson_javed_times, GFunctionTable, MAX_HORIZON};
use loads::{HourlyGroundLoadsMultiYear, MonthlyGroundLoads};
use model::{FieldGeometry, Ground, TemperatureLimits};
use sizing::{Borefield, SizingMethod, DEPTH_TOLERANCE};

type Float = f64;

fn synthetic_table() -> Arc<GFunctionTable> {
    let time = claesson_javed_times(3600.0, MAX_HORIZON);
    let depths: Vec<Float> = (1..=7).map(|i| i as Float * 50.0).collect();
    let mut values = Vec::with_capacity(depths.len() * time.len());
    for h in &depths {
        for t in &time {
            values.push(0.3 * (t / 3600.0).ln() + h / 1000.0);
        }
    }
    Arc::new(GFunctionTable::from_custom_parts("synthetic", time, depths, values).unwrap())
}

fn borefield(n_1: usize, n_2: usize) -> Borefield {
    Borefield::new(
        Ground::constant_temperature(2.0, 2.4e6, 10.0).unwrap(),
        &FieldGeometry::rectangular(n_1, n_2, 6.0).unwrap(),
        ResistanceModel::constant(0.2).unwrap(),
        TemperatureLimits::new(0.0, 16.0).unwrap(),
        synthetic_table(),
        350.0,
    )
    .unwrap()
}

/// Heating peaking in January, cooling mirrored half a year later.
fn balanced_load() -> MonthlyGroundLoads {
    let extraction = [
        46500.0, 44400.0, 37500.0, 29700.0, 19200.0, 0.0, 0.0, 0.0, 18300.0, 26100.0, 35100.0,
        43200.0,
    ];
    let mut injection = [0.0; 12];
    for m in 0..12 {
        injection[m] = extraction[(m + 6) % 12];
    }
    let mut peak_extraction = [0.0; 12];
    peak_extraction[0] = 160.0;
    let mut peak_injection = [0.0; 12];
    peak_injection[7] = 240.0;
    MonthlyGroundLoads::new(extraction, injection, peak_extraction, peak_injection).unwrap()
}

#[test]
fn balanced_field_is_limited_by_the_tighter_cooling_band() {
    // heating has 10 K of headroom, cooling only 6 K, and the cooling
    // peak is larger; with a perfectly balanced baseload the injection
    // side must win
    let field = borefield(10, 10);
    let load = balanced_load();
    assert!(load.imbalance().abs() < 1e-9);

    let result = field.size(&load, 100.0, SizingMethod::L2, None).unwrap();
    assert!(
        result.quadrant == 2 || result.quadrant == 3,
        "expected an injection quadrant, got {}",
        result.quadrant
    );
    assert!(result.depth > 50.0 && result.depth < 350.0, "H = {}", result.depth);

    // and the extraction quadrants, computed alone, ask for less field
    let q1 = field.size(&load, 100.0, SizingMethod::L2, Some(1)).unwrap();
    let q4 = field.size(&load, 100.0, SizingMethod::L2, Some(4)).unwrap();
    assert!(q1.depth < result.depth);
    assert!(q4.depth < result.depth);
}

#[test]
fn sizing_is_a_fixed_point() {
    let field = borefield(10, 10);
    let load = balanced_load();
    let result = field.size(&load, 100.0, SizingMethod::L2, None).unwrap();

    // restarting the iteration at the answer stays at the answer
    let again = field
        .size(&load, result.depth, SizingMethod::L2, Some(result.quadrant))
        .unwrap();
    assert!((again.depth - result.depth).abs() < DEPTH_TOLERANCE);
    assert!(again.iterations <= 2);
}

#[test]
fn sizing_result_matches_the_max_over_quadrants() {
    let field = borefield(10, 10);
    let mut load = balanced_load();
    // tilt the field towards extraction
    let mut extraction = [50000.0; 12];
    extraction[0] = 80000.0;
    load.set_baseload_extraction(extraction).unwrap();
    assert!(load.imbalance() < 0.0);

    let free = field.size(&load, 100.0, SizingMethod::L2, None).unwrap();
    assert!(free.quadrant == 1 || free.quadrant == 4);

    let q1 = field.size(&load, 100.0, SizingMethod::L2, Some(1)).unwrap();
    let q4 = field.size(&load, 100.0, SizingMethod::L2, Some(4)).unwrap();
    let expected = q1.depth.max(q4.depth);
    assert!((free.depth - expected).abs() < 1e-9);
}

#[test]
fn doubling_the_extraction_needs_a_deeper_field() {
    let field = borefield(10, 10);
    let load = balanced_load();
    let base = field.size(&load, 100.0, SizingMethod::L2, Some(4)).unwrap();

    let mut doubled = balanced_load();
    let mut extraction = [0.0; 12];
    let mut peaks = [0.0; 12];
    for m in 0..12 {
        extraction[m] = 2.0 * load.monthly_baseload_extraction_simulation_period()[m];
        peaks[m] = 2.0 * load.monthly_peak_extraction_simulation_period()[m];
    }
    doubled.set_baseload_extraction(extraction).unwrap();
    doubled.set_peak_extraction(peaks).unwrap();
    assert!(doubled.imbalance() < 0.0);

    let result = field.size(&doubled, 100.0, SizingMethod::L2, None).unwrap();
    assert!(result.quadrant == 1 || result.quadrant == 4);
    assert!(result.depth > base.depth);
}

#[test]
fn monthly_profile_sizing_agrees_with_the_pulse_method_roughly() {
    let field = borefield(10, 10);
    let load = balanced_load();
    let pulses = field.size(&load, 100.0, SizingMethod::L2, None).unwrap();
    let profile = field.size(&load, 100.0, SizingMethod::L3, None).unwrap();

    // the two approximations describe the same physics; they must land
    // in the same range, not on the same metre
    assert!(profile.depth > 0.5 * pulses.depth && profile.depth < 2.0 * pulses.depth,
        "pulses {} vs profile {}", pulses.depth, profile.depth);
}

#[test]
fn hourly_sizing_converges_on_spiky_loads() {
    let field = borefield(4, 4);
    // quiet field with a hundred hard extraction hours in winter
    let mut extraction = vec![0.0; 8760];
    for h in 0..100 {
        extraction[h * 24] = 120.0;
    }
    let load = HourlyGroundLoadsMultiYear::new(extraction, vec![0.0; 8760]).unwrap();

    let result = field.size(&load, 100.0, SizingMethod::L4, None).unwrap();
    assert!(result.quadrant == 1 || result.quadrant == 4);
    assert!(result.depth > 1.0 && result.depth < 350.0, "H = {}", result.depth);

    // at the returned depth the fluid touches but does not cross T_min
    let temps = field.evaluate_hourly(&load, result.depth).unwrap();
    let coldest = temps.fluid.iter().fold(Float::INFINITY, |a, b| a.min(*b));
    assert!(coldest > -0.2, "coldest = {}", coldest);
    assert!(coldest < 1.0, "coldest = {}", coldest);
}

#[test]
fn zeroing_the_future_leaves_the_past_untouched() {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);

    let field = borefield(3, 3);
    // a sparse random load so the convolution stays cheap
    let mut extraction = vec![0.0; 8760];
    let mut injection = vec![0.0; 8760];
    for _ in 0..200 {
        extraction[rng.gen_range(0..8760)] = rng.gen_range(0.0..80.0);
        injection[rng.gen_range(0..8760)] = rng.gen_range(0.0..80.0);
    }
    let full = HourlyGroundLoadsMultiYear::new(extraction.clone(), injection.clone()).unwrap();
    let wall_full = field.evaluate_hourly(&full, 110.0).unwrap().wall;

    let cut = 4000;
    for series in [&mut extraction, &mut injection] {
        for v in series.iter_mut().skip(cut + 1) {
            *v = 0.0;
        }
    }
    let truncated = HourlyGroundLoadsMultiYear::new(extraction, injection).unwrap();
    let wall_truncated = field.evaluate_hourly(&truncated, 110.0).unwrap().wall;

    for k in 0..=cut {
        assert!(
            (wall_full[k] - wall_truncated[k]).abs() < 1e-12,
            "hour {}",
            k
        );
    }
}

#[test]
fn depth_requests_beyond_the_table_carry_both_bounds() {
    let field = borefield(10, 10);
    let err = field.g(&[3600.0], 400.0).unwrap_err();
    match err {
        Error::OutOfBounds {
            value, bound, ..
        } => {
            assert!((value - 400.0).abs() < 1e-9);
            assert!((bound - 350.0).abs() < 1e-9);
        }
        other => panic!("expected out_of_bounds, got {:?}", other),
    }
}

#[test]
fn infeasible_limits_are_reported() {
    let field = Borefield::new(
        Ground::constant_temperature(2.0, 2.4e6, 10.0).unwrap(),
        &FieldGeometry::rectangular(10, 10, 6.0).unwrap(),
        ResistanceModel::constant(0.2).unwrap(),
        // T_max within a tenth of a kelvin of the ground temperature
        TemperatureLimits::new(0.0, 10.05).unwrap(),
        synthetic_table(),
        350.0,
    )
    .unwrap();
    let err = field
        .size(&balanced_load(), 100.0, SizingMethod::L2, Some(2))
        .unwrap_err();
    assert_eq!(err.tag(), "infeasible");
}

#[test]
fn cancellation_aborts_a_sizing() {
    let mut field = borefield(10, 10);
    let cancel = communication::CancelFlag::new();
    cancel.cancel();
    field.set_cancel_flag(cancel);
    let err = field
        .size(&balanced_load(), 100.0, SizingMethod::L2, None)
        .unwrap_err();
    assert_eq!(err.tag(), "cancelled");
}

#[test]
fn reshaping_clips_an_overloaded_injection_season() {
    let field = Borefield::new(
        Ground::constant_temperature(2.0, 2.4e6, 10.0).unwrap(),
        &FieldGeometry::rectangular(2, 2, 6.0).unwrap(),
        ResistanceModel::constant(0.1).unwrap(),
        TemperatureLimits::new(0.0, 16.0).unwrap(),
        synthetic_table(),
        350.0,
    )
    .unwrap();

    // a hundred scattered 40 kW injection hours on an otherwise idle
    // field: hot enough to break the 16 °C limit at H = 150 m
    let mut injection = vec![0.0; 8760];
    for h in 0..100 {
        injection[h * 80 + 40] = 40.0;
    }
    let load = HourlyGroundLoadsMultiYear::new(vec![0.0; 8760], injection.clone()).unwrap();

    let h = 150.0;
    let unconstrained = field.evaluate_hourly(&load, h).unwrap();
    let hottest = unconstrained
        .fluid
        .iter()
        .fold(Float::NEG_INFINITY, |a, b| a.max(*b));
    assert!(hottest > 16.0, "the test load must violate the limit, got {}", hottest);

    let reshaped = field.reshape_hourly(&load, h).unwrap();

    // the clipped load keeps the band (within the reshaper tolerance)
    let clipped = field
        .hourly_temperatures_from_series(&reshaped.extraction, &reshaped.injection, h)
        .unwrap();
    let clipped_hottest = clipped
        .fluid
        .iter()
        .fold(Float::NEG_INFINITY, |a, b| a.max(*b));
    assert!(clipped_hottest <= 16.0 + sizing::reshaper::TEMPERATURE_TOLERANCE + 1e-9);

    // the cap was genuinely lowered, and the residual accounts for
    // exactly what was cut
    assert!(reshaped.cap_injection < 40.0);
    let original: Float = injection.iter().sum();
    let kept: Float = reshaped.injection.iter().sum();
    let residual: Float = reshaped.residual_injection.iter().sum();
    assert!((kept + residual - original).abs() < 1e-6);

    // most of the energy still goes into the ground
    assert!(kept / original > 0.7, "kept only {:.1} %", 100.0 * kept / original);

    // the untouched extraction side is passed through
    assert!(reshaped.residual_extraction.iter().all(|r| r.abs() < 1e-12));
}

#[test]
fn hourly_profile_stays_near_the_monthly_one_for_smooth_loads() {
    // a smooth seasonal injection profile: the monthly path (resampled
    // baseload + peak pulse) and the hourly convolution must agree to
    // within the design tolerance
    let field = borefield(5, 5);
    let injection: Vec<Float> = (0..8760)
        .map(|h| {
            let season = (h as Float / 8760.0 * std::f64::consts::TAU).cos();
            30.0 * (1.0 - season) / 2.0
        })
        .collect();
    let load = HourlyGroundLoadsMultiYear::new(vec![0.0; 8760], injection).unwrap();
    let h = 120.0;

    let hourly = field.evaluate_hourly(&load, h).unwrap();
    let monthly = field.evaluate_monthly(&load, h).unwrap();

    let hottest_hourly = hourly
        .fluid
        .iter()
        .fold(Float::NEG_INFINITY, |a, b| a.max(*b));
    let hottest_monthly = monthly
        .fluid_peak_injection
        .iter()
        .fold(Float::NEG_INFINITY, |a, b| a.max(*b));
    assert!(
        (hottest_hourly - hottest_monthly).abs() < 0.5,
        "hourly {} vs monthly {}",
        hottest_hourly,
        hottest_monthly
    );
}

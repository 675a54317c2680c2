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

#![deny(missing_docs)]

//! The load models: everything the ground is asked to deliver or absorb.
//!
//! Loads come in monthly or hourly resolution, describe either the
//! ground side directly (extraction/injection) or the building side
//! (heating/cooling, converted through COP/EER), and cover either one
//! repeating year or an explicit multi-year horizon. All of them expose
//! the same downstream contract, [`communication::GroundLoad`], which
//! is all the temperature evaluator and the sizers ever see.

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// The default notional duration of a peak pulse: six hours, in seconds.
pub const DEFAULT_PEAK_DURATION: Float = 6.0 * 3600.;

/// Monthly ground-side loads, single- and multi-year.
pub mod monthly;
pub use monthly::{MonthlyGroundLoads, MonthlyGroundLoadsMultiYear};

/// Hourly ground-side loads, single- and multi-year.
pub mod hourly;
pub use hourly::{HourlyGroundLoads, HourlyGroundLoadsMultiYear};

/// Building-side loads converted through COP/EER, with optional DHW.
pub mod building;
pub use building::{HourlyBuildingLoads, MonthlyBuildingLoads};

/// Heat-pump efficiency models: scalar, temperature curve, 2-D map.
pub mod efficiency;
pub use efficiency::Efficiency;

/// Domestic hot water demand shapes.
pub mod dhw;
pub use dhw::Dhw;

/// Summation of several load models behind one contract.
pub mod cluster;
pub use cluster::Cluster;

/// Worst-month selection and the pulse parameters the sizers consume.
pub mod analysis;
pub use analysis::{first_year_params, last_year_params, worst_month_index};
pub use analysis::{FirstYearParams, LastYearParams};

use communication::Error;

/// Checks that every entry of a series is finite and non-negative.
pub(crate) fn check_non_negative(name: &str, values: &[Float]) -> Result<(), Error> {
    for (i, v) in values.iter().enumerate() {
        if !v.is_finite() || *v < 0.0 {
            return Err(Error::invalid(format!(
                "{} may not contain negative entries ({} at index {})",
                name, v, i
            )));
        }
    }
    Ok(())
}

/// Checks that a peak-pulse duration is usable.
pub(crate) fn check_peak_duration(seconds: Float) -> Result<(), Error> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(Error::invalid(format!(
            "a peak duration must be a positive number of seconds, not {}",
            seconds
        )));
    }
    Ok(())
}

/// Checks that a start month lies in 1..=12.
pub(crate) fn check_start_month(month: usize) -> Result<(), Error> {
    if !(1..=12).contains(&month) {
        return Err(Error::invalid(format!(
            "the start month must be between 1 (January) and 12 (December), not {}",
            month
        )));
    }
    Ok(())
}

/// Sums hourly values into monthly baseloads (kWh) and takes monthly
/// maxima as peaks (kW). Month boundaries follow the convention, with
/// the year rotated to `start_month`. The series length must be a
/// multiple of 8760.
pub(crate) fn aggregate_hourly(
    series: &[Float],
    convention: calendar::MonthsConvention,
    start_month: usize,
) -> (Vec<Float>, Vec<Float>) {
    let hours = calendar::rotate_monthly(&convention.hours_per_month(), start_month);
    debug_assert_eq!(series.len() % calendar::HOURS_PER_YEAR, 0);

    let months = series.len() / calendar::HOURS_PER_YEAR * calendar::MONTHS_PER_YEAR;
    let mut baseload = Vec::with_capacity(months);
    let mut peak = Vec::with_capacity(months);

    let mut i = 0;
    while i < series.len() {
        for n in hours {
            let chunk = &series[i..i + n];
            baseload.push(chunk.iter().sum());
            peak.push(chunk.iter().fold(0.0, |a: Float, b| a.max(*b)));
            i += n;
        }
    }
    (baseload, peak)
}

/// Raises each monthly peak (kW) to at least the monthly average power
/// implied by the baseload (kWh over the month's hours), in place.
pub(crate) fn raise_peaks_to_average(peaks: &mut [Float], baseloads: &[Float], hours: &[Float]) {
    for (m, p) in peaks.iter_mut().enumerate() {
        let average = baseloads[m] / hours[m % hours.len()];
        if *p < average {
            *p = average;
        }
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

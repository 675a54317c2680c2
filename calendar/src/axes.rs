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

use crate::months::{rotate_monthly, MonthsConvention};
use crate::{Float, HOURS_PER_YEAR, MONTHS_PER_YEAR, SECONDS_PER_HOUR};

/// The hours of every month of the simulation period: the yearly table
/// of the convention, rotated to `start_month` and repeated `years`
/// times. Length `12 * years`.
pub fn hours_per_month_simulation_period(
    convention: MonthsConvention,
    start_month: usize,
    years: usize,
) -> Vec<Float> {
    let year = rotate_monthly(&convention.hours_per_month_float(), start_month);
    let mut out = Vec::with_capacity(MONTHS_PER_YEAR * years);
    for _ in 0..years {
        out.extend_from_slice(&year);
    }
    out
}

/// The monthly superposition axis: cumulative seconds at the end of each
/// month of the simulation period. Length `12 * years`.
pub fn monthly_time_axis(
    convention: MonthsConvention,
    start_month: usize,
    years: usize,
) -> Vec<Float> {
    let seconds = rotate_monthly(&convention.seconds_per_month(), start_month);
    let mut out = Vec::with_capacity(MONTHS_PER_YEAR * years);
    let mut t = 0.0;
    for _ in 0..years {
        for s in seconds {
            t += s;
            out.push(t);
        }
    }
    out
}

/// The hourly superposition axis: `3600 * [1, 2, ..., 8760 * years]`.
pub fn hourly_time_axis(years: usize) -> Vec<Float> {
    (1..=HOURS_PER_YEAR * years)
        .map(|h| h as Float * SECONDS_PER_HOUR)
        .collect()
}

/// The three-point axis of the last-year two-pulse sizing method:
/// the peak pulse, the peak after a month of steady load, and the end
/// of the horizon. All inputs and outputs in seconds.
pub fn two_pulse_time_axis(peak_duration: Float, month_duration: Float, years: usize) -> [Float; 3] {
    let horizon = years as Float * HOURS_PER_YEAR as Float * SECONDS_PER_HOUR;
    [
        peak_duration,
        peak_duration + month_duration,
        horizon + month_duration + peak_duration,
    ]
}

/* *********** */
/*    TESTS    */
/* *********** */

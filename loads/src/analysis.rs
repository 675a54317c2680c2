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

use crate::Float;
use calendar::{hours_per_month_simulation_period, monthly_time_axis, MONTHS_PER_YEAR};
use communication::GroundLoad;

/// The index (0..=11) of the "worst" month of a year.
///
/// Highest peak wins; on equal peaks the higher monthly average wins;
/// on equal averages the later month wins.
pub fn worst_month_index(peaks: &[Float], averages: &[Float]) -> usize {
    debug_assert_eq!(peaks.len(), averages.len());
    let mut best = 0;
    for m in 1..peaks.len() {
        if peaks[m] > peaks[best] {
            best = m;
        } else if peaks[m] == peaks[best] && averages[m] >= averages[best] {
            // later months win ties
            best = m;
        }
    }
    best
}

/// The pulse parameters of the last-year two-pulse sizing method, for
/// one side of the load.
///
/// Powers are in W and signed: extraction is negative, injection
/// positive, so the length formulas work unchanged for both quadrants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastYearParams {
    /// Duration of the peak pulse, seconds.
    pub peak_duration: Float,

    /// Peak power of the worst month, W (signed).
    pub peak: Float,

    /// Average power of the worst month, W (signed).
    pub month_average: Float,

    /// Average yearly net power, `imbalance * 1000 / 8760`, W (signed).
    pub yearly_average: Float,

    /// Hours of the worst month under the active convention.
    pub month_hours: Float,

    /// Which month of the year (0..=11, counted from the start month)
    /// was worst.
    pub month_index: usize,
}

/// The pulse parameters of the first-year three-pulse sizing method,
/// for one side of the load. Powers in W, signed like
/// [`LastYearParams`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstYearParams {
    /// Duration of the peak pulse, seconds.
    pub peak_duration: Float,

    /// Seconds from the simulation start to the start of the worst
    /// month.
    pub prior_months_end: Float,

    /// Seconds from the simulation start to the end of the worst month.
    pub current_month_end: Float,

    /// Peak power of the worst month, W (signed).
    pub peak: Float,

    /// Mean average power of the months before the worst one, W
    /// (signed). Zero when the worst month is the first one.
    pub prior_average: Float,

    /// Average power of the worst month, W (signed).
    pub month_average: Float,

    /// Hours of the worst month under the active convention.
    pub month_hours: Float,

    /// Which month of the first simulated year (0..=11) was worst.
    pub month_index: usize,
}

fn side_series(load: &dyn GroundLoad, extraction: bool) -> (Vec<Float>, Vec<Float>) {
    if extraction {
        (
            load.monthly_baseload_extraction_simulation_period(),
            load.monthly_peak_extraction_simulation_period(),
        )
    } else {
        (
            load.monthly_baseload_injection_simulation_period(),
            load.monthly_peak_injection_simulation_period(),
        )
    }
}

/// The two-pulse parameters of the last simulated year, for the
/// extraction (`extraction_limited`) or the injection side.
pub fn last_year_params(load: &dyn GroundLoad, extraction_limited: bool) -> LastYearParams {
    let (baseloads, peaks) = side_series(load, extraction_limited);
    let hours = hours_per_month_simulation_period(
        load.months_convention(),
        load.start_month(),
        load.simulation_years(),
    );

    let first = baseloads.len() - MONTHS_PER_YEAR;
    let averages: Vec<Float> = (first..baseloads.len())
        .map(|i| baseloads[i] / hours[i])
        .collect();
    let worst = worst_month_index(&peaks[first..], &averages);

    let sign = if extraction_limited { -1.0 } else { 1.0 };
    LastYearParams {
        peak_duration: if extraction_limited {
            load.peak_duration_extraction()
        } else {
            load.peak_duration_injection()
        },
        peak: sign * peaks[first + worst] * 1000.0,
        month_average: sign * averages[worst] * 1000.0,
        yearly_average: load.imbalance() * 1000.0 / 8760.0,
        month_hours: hours[first + worst],
        month_index: worst,
    }
}

/// The three-pulse parameters of the first simulated year, for the
/// extraction (`extraction_limited`) or the injection side.
pub fn first_year_params(load: &dyn GroundLoad, extraction_limited: bool) -> FirstYearParams {
    let (baseloads, peaks) = side_series(load, extraction_limited);
    let convention = load.months_convention();
    let start_month = load.start_month();
    let hours = hours_per_month_simulation_period(convention, start_month, 1);

    let averages: Vec<Float> = (0..MONTHS_PER_YEAR)
        .map(|m| baseloads[m] / hours[m])
        .collect();
    let worst = worst_month_index(&peaks[..MONTHS_PER_YEAR], &averages);

    let axis = monthly_time_axis(convention, start_month, 1);
    let current_month_end = axis[worst];
    let prior_months_end = if worst == 0 { 0.0 } else { axis[worst - 1] };
    let prior_average = if worst == 0 {
        0.0
    } else {
        averages[..worst].iter().sum::<Float>() / worst as Float
    };

    let sign = if extraction_limited { -1.0 } else { 1.0 };
    FirstYearParams {
        peak_duration: if extraction_limited {
            load.peak_duration_extraction()
        } else {
            load.peak_duration_injection()
        },
        prior_months_end,
        current_month_end,
        peak: sign * peaks[worst] * 1000.0,
        prior_average: sign * prior_average * 1000.0,
        month_average: sign * averages[worst] * 1000.0,
        month_hours: hours[worst],
        month_index: worst,
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonthlyGroundLoads;

    #[test]
    fn worst_month_tie_breaks() {
        // clear peak winner
        let peaks = [1.0, 5.0, 2.0];
        let avgs = [0.0, 0.0, 0.0];
        assert_eq!(worst_month_index(&peaks, &avgs), 1);

        // equal peaks: the higher average wins
        let peaks = [5.0, 5.0, 2.0];
        let avgs = [1.0, 3.0, 0.0];
        assert_eq!(worst_month_index(&peaks, &avgs), 1);

        // equal peaks and averages: the later month wins
        let peaks = [5.0, 5.0, 5.0];
        let avgs = [2.0, 2.0, 2.0];
        assert_eq!(worst_month_index(&peaks, &avgs), 2);
    }

    fn sample() -> MonthlyGroundLoads {
        let mut ext = [0.0; 12];
        ext[0] = 7300.0; // 10 kW average in January
        ext[1] = 3650.0; // 5 kW in February
        ext[2] = 1460.0; // 2 kW in March
        let mut peak_ext = [0.0; 12];
        peak_ext[2] = 60.0; // the peak sits in March
        let mut loads = MonthlyGroundLoads::new(ext, [0.0; 12], peak_ext, [0.0; 12]).unwrap();
        loads.set_simulation_years(10).unwrap();
        loads
    }

    #[test]
    fn last_year_params_are_signed() {
        let p = last_year_params(&sample(), true);
        assert_eq!(p.month_index, 2);
        assert!((p.peak - -60_000.0).abs() < 1e-6);
        assert!((p.month_average - -2_000.0).abs() < 1e-6);
        // extraction dominated, so the yearly average is negative
        let expected_qa = -(7300.0 + 3650.0 + 1460.0) * 1000.0 / 8760.0;
        assert!((p.yearly_average - expected_qa).abs() < 1e-6);
        assert!((p.month_hours - 730.0).abs() < 1e-9);
    }

    #[test]
    fn first_year_params_cover_prior_months() {
        let p = first_year_params(&sample(), true);
        assert_eq!(p.month_index, 2);
        // two months of 730 h each precede March
        assert!((p.prior_months_end - 2.0 * 730.0 * 3600.0).abs() < 1.0);
        assert!((p.current_month_end - 3.0 * 730.0 * 3600.0).abs() < 1.0);
        // mean of 10 kW and 5 kW, signed
        assert!((p.prior_average - -7_500.0).abs() < 1e-6);
        assert!((p.peak - -60_000.0).abs() < 1e-6);
    }

    #[test]
    fn january_worst_month_has_no_prior_pulse() {
        let mut ext = [0.0; 12];
        ext[0] = 7300.0;
        let mut peak = [0.0; 12];
        peak[0] = 50.0;
        let loads = MonthlyGroundLoads::new(ext, [0.0; 12], peak, [0.0; 12]).unwrap();
        let p = first_year_params(&loads, true);
        assert_eq!(p.month_index, 0);
        assert!(p.prior_months_end.abs() < 1e-9);
        assert!(p.prior_average.abs() < 1e-9);
    }
}

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

use crate::{
    check_non_negative, check_peak_duration, check_start_month, raise_peaks_to_average, Float,
    DEFAULT_PEAK_DURATION,
};
use calendar::{rotate_monthly, MonthsConvention, MONTHS_PER_YEAR};
use communication::{Error, GroundLoad};
use serde::{Deserialize, Serialize};

/// Ground-side loads given as twelve monthly values per series, repeated
/// for every year of the simulation.
///
/// Baseloads are energies (kWh per month), peaks are powers (kW). A peak
/// below the average power implied by the month's baseload is silently
/// raised to that average when the series are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyGroundLoads {
    baseload_extraction: [Float; 12],
    baseload_injection: [Float; 12],
    peak_extraction: [Float; 12],
    peak_injection: [Float; 12],
    simulation_years: usize,
    start_month: usize,
    convention: MonthsConvention,
    peak_duration_extraction: Float,
    peak_duration_injection: Float,
}

impl MonthlyGroundLoads {
    /// Builds a monthly load from its four series, January first.
    ///
    /// Defaults: 20 simulated years, start in January, equal months,
    /// 6-hour peaks.
    pub fn new(
        baseload_extraction: [Float; 12],
        baseload_injection: [Float; 12],
        peak_extraction: [Float; 12],
        peak_injection: [Float; 12],
    ) -> Result<Self, Error> {
        check_non_negative("the extraction baseload", &baseload_extraction)?;
        check_non_negative("the injection baseload", &baseload_injection)?;
        check_non_negative("the extraction peak", &peak_extraction)?;
        check_non_negative("the injection peak", &peak_injection)?;
        Ok(Self {
            baseload_extraction,
            baseload_injection,
            peak_extraction,
            peak_injection,
            simulation_years: 20,
            start_month: 1,
            convention: MonthsConvention::default(),
            peak_duration_extraction: DEFAULT_PEAK_DURATION,
            peak_duration_injection: DEFAULT_PEAK_DURATION,
        })
    }

    /// Replaces the extraction baseload (kWh/month, January first).
    pub fn set_baseload_extraction(&mut self, values: [Float; 12]) -> Result<(), Error> {
        check_non_negative("the extraction baseload", &values)?;
        self.baseload_extraction = values;
        Ok(())
    }

    /// Replaces the injection baseload (kWh/month, January first).
    pub fn set_baseload_injection(&mut self, values: [Float; 12]) -> Result<(), Error> {
        check_non_negative("the injection baseload", &values)?;
        self.baseload_injection = values;
        Ok(())
    }

    /// Replaces the extraction peaks (kW, January first).
    pub fn set_peak_extraction(&mut self, values: [Float; 12]) -> Result<(), Error> {
        check_non_negative("the extraction peak", &values)?;
        self.peak_extraction = values;
        Ok(())
    }

    /// Replaces the injection peaks (kW, January first).
    pub fn set_peak_injection(&mut self, values: [Float; 12]) -> Result<(), Error> {
        check_non_negative("the injection peak", &values)?;
        self.peak_injection = values;
        Ok(())
    }

    /// Sets the simulation horizon in years.
    pub fn set_simulation_years(&mut self, years: usize) -> Result<(), Error> {
        if years == 0 {
            return Err(Error::invalid("the simulation must span at least one year"));
        }
        self.simulation_years = years;
        Ok(())
    }

    /// Sets the first simulated month (1 = January ... 12 = December).
    pub fn set_start_month(&mut self, month: usize) -> Result<(), Error> {
        check_start_month(month)?;
        self.start_month = month;
        Ok(())
    }

    /// Sets the months-per-year convention.
    pub fn set_months_convention(&mut self, convention: MonthsConvention) {
        self.convention = convention;
    }

    /// Sets the extraction peak-pulse duration, in seconds.
    pub fn set_peak_duration_extraction(&mut self, seconds: Float) -> Result<(), Error> {
        check_peak_duration(seconds)?;
        self.peak_duration_extraction = seconds;
        Ok(())
    }

    /// Sets the injection peak-pulse duration, in seconds.
    pub fn set_peak_duration_injection(&mut self, seconds: Float) -> Result<(), Error> {
        check_peak_duration(seconds)?;
        self.peak_duration_injection = seconds;
        Ok(())
    }

    fn tile(&self, year: [Float; 12]) -> Vec<Float> {
        let rotated = rotate_monthly(&year, self.start_month);
        let mut out = Vec::with_capacity(MONTHS_PER_YEAR * self.simulation_years);
        for _ in 0..self.simulation_years {
            out.extend_from_slice(&rotated);
        }
        out
    }

    fn tiled_peaks(&self, peaks: [Float; 12], baseloads: [Float; 12]) -> Vec<Float> {
        let mut peaks = self.tile(peaks);
        let baseloads = self.tile(baseloads);
        let hours = rotate_monthly(&self.convention.hours_per_month_float(), self.start_month);
        raise_peaks_to_average(&mut peaks, &baseloads, &hours);
        peaks
    }
}

impl GroundLoad for MonthlyGroundLoads {
    fn simulation_years(&self) -> usize {
        self.simulation_years
    }

    fn start_month(&self) -> usize {
        self.start_month
    }

    fn months_convention(&self) -> MonthsConvention {
        self.convention
    }

    fn monthly_baseload_extraction_simulation_period(&self) -> Vec<Float> {
        self.tile(self.baseload_extraction)
    }

    fn monthly_baseload_injection_simulation_period(&self) -> Vec<Float> {
        self.tile(self.baseload_injection)
    }

    fn monthly_peak_extraction_simulation_period(&self) -> Vec<Float> {
        self.tiled_peaks(self.peak_extraction, self.baseload_extraction)
    }

    fn monthly_peak_injection_simulation_period(&self) -> Vec<Float> {
        self.tiled_peaks(self.peak_injection, self.baseload_injection)
    }

    fn peak_duration_extraction(&self) -> Float {
        self.peak_duration_extraction
    }

    fn peak_duration_injection(&self) -> Float {
        self.peak_duration_injection
    }
}

/// Ground-side loads given month by month over the whole horizon, for
/// simulations whose years differ from one another.
///
/// The horizon is embedded in the data: `12 * years` entries per series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyGroundLoadsMultiYear {
    baseload_extraction: Vec<Float>,
    baseload_injection: Vec<Float>,
    peak_extraction: Vec<Float>,
    peak_injection: Vec<Float>,
    convention: MonthsConvention,
    peak_duration_extraction: Float,
    peak_duration_injection: Float,
}

impl MonthlyGroundLoadsMultiYear {
    /// Builds a multi-year monthly load. All four series must have the
    /// same length, a positive multiple of 12, starting in January of
    /// the first simulated year.
    pub fn new(
        baseload_extraction: Vec<Float>,
        baseload_injection: Vec<Float>,
        peak_extraction: Vec<Float>,
        peak_injection: Vec<Float>,
    ) -> Result<Self, Error> {
        let len = baseload_extraction.len();
        if len == 0 || len % MONTHS_PER_YEAR != 0 {
            return Err(Error::invalid(format!(
                "a multi-year monthly series must hold a positive multiple of 12 values, not {}",
                len
            )));
        }
        if baseload_injection.len() != len
            || peak_extraction.len() != len
            || peak_injection.len() != len
        {
            return Err(Error::invalid(
                "all four multi-year monthly series must have the same length",
            ));
        }
        check_non_negative("the extraction baseload", &baseload_extraction)?;
        check_non_negative("the injection baseload", &baseload_injection)?;
        check_non_negative("the extraction peak", &peak_extraction)?;
        check_non_negative("the injection peak", &peak_injection)?;
        Ok(Self {
            baseload_extraction,
            baseload_injection,
            peak_extraction,
            peak_injection,
            convention: MonthsConvention::default(),
            peak_duration_extraction: DEFAULT_PEAK_DURATION,
            peak_duration_injection: DEFAULT_PEAK_DURATION,
        })
    }

    /// Sets the months-per-year convention.
    pub fn set_months_convention(&mut self, convention: MonthsConvention) {
        self.convention = convention;
    }

    /// Sets the extraction peak-pulse duration, in seconds.
    pub fn set_peak_duration_extraction(&mut self, seconds: Float) -> Result<(), Error> {
        check_peak_duration(seconds)?;
        self.peak_duration_extraction = seconds;
        Ok(())
    }

    /// Sets the injection peak-pulse duration, in seconds.
    pub fn set_peak_duration_injection(&mut self, seconds: Float) -> Result<(), Error> {
        check_peak_duration(seconds)?;
        self.peak_duration_injection = seconds;
        Ok(())
    }

    fn raised_peaks(&self, peaks: &[Float], baseloads: &[Float]) -> Vec<Float> {
        let mut peaks = peaks.to_vec();
        let hours = self.convention.hours_per_month_float();
        raise_peaks_to_average(&mut peaks, baseloads, &hours);
        peaks
    }
}

impl GroundLoad for MonthlyGroundLoadsMultiYear {
    fn simulation_years(&self) -> usize {
        self.baseload_extraction.len() / MONTHS_PER_YEAR
    }

    fn start_month(&self) -> usize {
        1
    }

    fn months_convention(&self) -> MonthsConvention {
        self.convention
    }

    fn monthly_baseload_extraction_simulation_period(&self) -> Vec<Float> {
        self.baseload_extraction.clone()
    }

    fn monthly_baseload_injection_simulation_period(&self) -> Vec<Float> {
        self.baseload_injection.clone()
    }

    fn monthly_peak_extraction_simulation_period(&self) -> Vec<Float> {
        self.raised_peaks(&self.peak_extraction, &self.baseload_extraction)
    }

    fn monthly_peak_injection_simulation_period(&self) -> Vec<Float> {
        self.raised_peaks(&self.peak_injection, &self.baseload_injection)
    }

    fn peak_duration_extraction(&self) -> Float {
        self.peak_duration_extraction
    }

    fn peak_duration_injection(&self) -> Float {
        self.peak_duration_injection
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MonthlyGroundLoads {
        let mut ext = [0.0; 12];
        ext[0] = 46500.0;
        ext[1] = 44400.0;
        let mut inj = [0.0; 12];
        inj[6] = 30000.0;
        inj[7] = 32000.0;
        let mut peak_ext = [0.0; 12];
        peak_ext[0] = 160.0;
        let mut peak_inj = [0.0; 12];
        peak_inj[7] = 240.0;
        MonthlyGroundLoads::new(ext, inj, peak_ext, peak_inj).unwrap()
    }

    #[test]
    fn rejects_negative_loads() {
        let mut bad = [0.0; 12];
        bad[3] = -1.0;
        assert!(MonthlyGroundLoads::new(bad, [0.0; 12], [0.0; 12], [0.0; 12]).is_err());
    }

    #[test]
    fn setters_are_atomic() {
        let mut loads = sample();
        let before = loads.clone();
        let mut bad = [0.0; 12];
        bad[0] = -5.0;
        assert!(loads.set_baseload_extraction(bad).is_err());
        assert_eq!(loads, before);
    }

    #[test]
    fn series_span_the_simulation_period() {
        let mut loads = sample();
        loads.set_simulation_years(5).unwrap();
        let base = loads.monthly_baseload_extraction_simulation_period();
        assert_eq!(base.len(), 60);
        // the pattern repeats
        assert!((base[0] - base[12]).abs() < 1e-9);
        assert!((base[0] - 46500.0).abs() < 1e-9);
    }

    #[test]
    fn start_month_rotates_the_year() {
        let mut loads = sample();
        loads.set_start_month(8).unwrap();
        let inj = loads.monthly_baseload_injection_simulation_period();
        // August (32000 kWh) now comes first
        assert!((inj[0] - 32000.0).abs() < 1e-9);
        // July lands at the end of the rotated year
        assert!((inj[11] - 30000.0).abs() < 1e-9);
    }

    #[test]
    fn peaks_never_fall_below_the_monthly_average() {
        let loads = sample();
        // January extraction: 46500 kWh over 730 h is ~63.7 kW average,
        // below the 160 kW peak, so the peak is untouched...
        let peaks = loads.monthly_peak_extraction_simulation_period();
        assert!((peaks[0] - 160.0).abs() < 1e-9);
        // ...but February has no declared peak, so it is raised.
        let expected = 44400.0 / 730.0;
        assert!((peaks[1] - expected).abs() < 1e-9);
    }

    #[test]
    fn imbalance_is_per_year() {
        let loads = sample();
        let ext: Float = 46500.0 + 44400.0;
        let inj: Float = 30000.0 + 32000.0;
        assert!((loads.imbalance() - (inj - ext)).abs() < 1e-9);
        let mut multi_year = loads.clone();
        multi_year.set_simulation_years(7).unwrap();
        assert!((multi_year.imbalance() - (inj - ext)).abs() < 1e-6);
    }

    #[test]
    fn serde_round_trip() -> Result<(), String> {
        let mut loads = sample();
        loads.set_simulation_years(25).unwrap();
        loads.set_start_month(9).unwrap();
        let text = serde_json::to_string(&loads).map_err(|e| e.to_string())?;
        let back: MonthlyGroundLoads = serde_json::from_str(&text).map_err(|e| e.to_string())?;
        assert_eq!(back, loads);
        Ok(())
    }

    #[test]
    fn multi_year_length_checks() {
        assert!(MonthlyGroundLoadsMultiYear::new(
            vec![0.0; 13],
            vec![0.0; 13],
            vec![0.0; 13],
            vec![0.0; 13]
        )
        .is_err());
        assert!(MonthlyGroundLoadsMultiYear::new(
            vec![0.0; 24],
            vec![0.0; 24],
            vec![0.0; 12],
            vec![0.0; 24]
        )
        .is_err());
        let ok = MonthlyGroundLoadsMultiYear::new(
            vec![100.0; 24],
            vec![50.0; 24],
            vec![1.0; 24],
            vec![1.0; 24],
        )
        .unwrap();
        assert_eq!(ok.simulation_years(), 2);
        // 100 kWh over 730 h is ~0.137 kW; the declared 1 kW peak stands
        let peaks = ok.monthly_peak_extraction_simulation_period();
        assert!((peaks[0] - 1.0).abs() < 1e-9);
    }
}

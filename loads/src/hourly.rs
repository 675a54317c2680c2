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
    aggregate_hourly, check_non_negative, check_peak_duration, check_start_month, Float,
    DEFAULT_PEAK_DURATION,
};
use calendar::{MonthsConvention, HOURS_PER_YEAR};
use communication::{Error, GroundLoad};
use serde::{Deserialize, Serialize};

/// Ground-side loads given hour by hour for one year, repeated over the
/// simulation period. Values are kWh per hour (numerically, average kW).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyGroundLoads {
    extraction: Vec<Float>,
    injection: Vec<Float>,
    simulation_years: usize,
    start_month: usize,
    convention: MonthsConvention,
    peak_duration_extraction: Float,
    peak_duration_injection: Float,
}

impl HourlyGroundLoads {
    /// Builds an hourly load from its two 8760-entry series, the year
    /// starting at midnight on the 1st of January.
    pub fn new(extraction: Vec<Float>, injection: Vec<Float>) -> Result<Self, Error> {
        if extraction.len() != HOURS_PER_YEAR || injection.len() != HOURS_PER_YEAR {
            return Err(Error::invalid(format!(
                "an hourly load needs {} values per series (got {} and {})",
                HOURS_PER_YEAR,
                extraction.len(),
                injection.len()
            )));
        }
        check_non_negative("the hourly extraction load", &extraction)?;
        check_non_negative("the hourly injection load", &injection)?;
        Ok(Self {
            extraction,
            injection,
            simulation_years: 20,
            start_month: 1,
            convention: MonthsConvention::default(),
            peak_duration_extraction: DEFAULT_PEAK_DURATION,
            peak_duration_injection: DEFAULT_PEAK_DURATION,
        })
    }

    /// Sets the simulation horizon in years.
    pub fn set_simulation_years(&mut self, years: usize) -> Result<(), Error> {
        if years == 0 {
            return Err(Error::invalid("the simulation must span at least one year"));
        }
        self.simulation_years = years;
        Ok(())
    }

    /// Sets the first simulated month; the hourly year is rotated so
    /// that it starts there.
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

    /// The hourly year rotated to the start month.
    fn rotated(&self, series: &[Float]) -> Vec<Float> {
        let offset = self.convention.hour_boundaries()[self.start_month - 1];
        let mut out = Vec::with_capacity(series.len());
        for i in 0..series.len() {
            out.push(series[(i + offset) % HOURS_PER_YEAR]);
        }
        out
    }

    fn tiled(&self, series: &[Float]) -> Vec<Float> {
        let year = self.rotated(series);
        let mut out = Vec::with_capacity(year.len() * self.simulation_years);
        for _ in 0..self.simulation_years {
            out.extend_from_slice(&year);
        }
        out
    }

    fn monthly(&self, series: &[Float]) -> (Vec<Float>, Vec<Float>) {
        let year = self.rotated(series);
        let (base_year, peak_year) = aggregate_hourly(&year, self.convention, self.start_month);
        let mut base = Vec::with_capacity(base_year.len() * self.simulation_years);
        let mut peak = Vec::with_capacity(peak_year.len() * self.simulation_years);
        for _ in 0..self.simulation_years {
            base.extend_from_slice(&base_year);
            peak.extend_from_slice(&peak_year);
        }
        (base, peak)
    }
}

impl GroundLoad for HourlyGroundLoads {
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
        self.monthly(&self.extraction).0
    }

    fn monthly_baseload_injection_simulation_period(&self) -> Vec<Float> {
        self.monthly(&self.injection).0
    }

    fn monthly_peak_extraction_simulation_period(&self) -> Vec<Float> {
        self.monthly(&self.extraction).1
    }

    fn monthly_peak_injection_simulation_period(&self) -> Vec<Float> {
        self.monthly(&self.injection).1
    }

    fn hourly_extraction_load_simulation_period(&self) -> Option<Vec<Float>> {
        Some(self.tiled(&self.extraction))
    }

    fn hourly_injection_load_simulation_period(&self) -> Option<Vec<Float>> {
        Some(self.tiled(&self.injection))
    }

    fn peak_duration_extraction(&self) -> Float {
        self.peak_duration_extraction
    }

    fn peak_duration_injection(&self) -> Float {
        self.peak_duration_injection
    }
}

/// Ground-side loads given hour by hour over the whole horizon.
///
/// The horizon is embedded in the data: `8760 * years` entries per
/// series, starting in January of the first simulated year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyGroundLoadsMultiYear {
    extraction: Vec<Float>,
    injection: Vec<Float>,
    convention: MonthsConvention,
    peak_duration_extraction: Float,
    peak_duration_injection: Float,
}

impl HourlyGroundLoadsMultiYear {
    /// Builds a multi-year hourly load. Both series must have the same
    /// length, a positive multiple of 8760.
    pub fn new(extraction: Vec<Float>, injection: Vec<Float>) -> Result<Self, Error> {
        let len = extraction.len();
        if len == 0 || len % HOURS_PER_YEAR != 0 {
            return Err(Error::invalid(format!(
                "a multi-year hourly series must hold a positive multiple of {} values, not {}",
                HOURS_PER_YEAR, len
            )));
        }
        if injection.len() != len {
            return Err(Error::invalid(
                "both multi-year hourly series must have the same length",
            ));
        }
        check_non_negative("the hourly extraction load", &extraction)?;
        check_non_negative("the hourly injection load", &injection)?;
        Ok(Self {
            extraction,
            injection,
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
}

impl GroundLoad for HourlyGroundLoadsMultiYear {
    fn simulation_years(&self) -> usize {
        self.extraction.len() / HOURS_PER_YEAR
    }

    fn start_month(&self) -> usize {
        1
    }

    fn months_convention(&self) -> MonthsConvention {
        self.convention
    }

    fn monthly_baseload_extraction_simulation_period(&self) -> Vec<Float> {
        aggregate_hourly(&self.extraction, self.convention, 1).0
    }

    fn monthly_baseload_injection_simulation_period(&self) -> Vec<Float> {
        aggregate_hourly(&self.injection, self.convention, 1).0
    }

    fn monthly_peak_extraction_simulation_period(&self) -> Vec<Float> {
        aggregate_hourly(&self.extraction, self.convention, 1).1
    }

    fn monthly_peak_injection_simulation_period(&self) -> Vec<Float> {
        aggregate_hourly(&self.injection, self.convention, 1).1
    }

    fn hourly_extraction_load_simulation_period(&self) -> Option<Vec<Float>> {
        Some(self.extraction.clone())
    }

    fn hourly_injection_load_simulation_period(&self) -> Option<Vec<Float>> {
        Some(self.injection.clone())
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

    fn ramp_year() -> Vec<Float> {
        (0..HOURS_PER_YEAR).map(|h| h as Float / 1000.0).collect()
    }

    #[test]
    fn length_is_enforced() {
        assert!(HourlyGroundLoads::new(vec![0.0; 100], vec![0.0; 100]).is_err());
        assert!(HourlyGroundLoads::new(vec![0.0; 8760], vec![0.0; 8760]).is_ok());
    }

    #[test]
    fn monthly_resample_matches_sums_and_maxima() {
        let loads = HourlyGroundLoads::new(ramp_year(), vec![0.0; 8760]).unwrap();
        let base = loads.monthly_baseload_extraction_simulation_period();
        let peak = loads.monthly_peak_extraction_simulation_period();
        // January under the equal convention: hours 0..730
        let expected_base: Float = (0..730).map(|h| h as Float / 1000.0).sum();
        assert!((base[0] - expected_base).abs() < 1e-6);
        assert!((peak[0] - 729.0 / 1000.0).abs() < 1e-9);
        // December peak is the yearly maximum
        assert!((peak[11] - 8759.0 / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn imbalance_matches_monthly_view() {
        let loads = HourlyGroundLoads::new(ramp_year(), vec![1.0; 8760]).unwrap();
        let ext: Float = ramp_year().iter().sum();
        let expected = 8760.0 - ext;
        assert!((loads.imbalance() - expected).abs() < 1e-6);
    }

    #[test]
    fn rotation_moves_the_origin() {
        let mut loads = HourlyGroundLoads::new(ramp_year(), vec![0.0; 8760]).unwrap();
        loads.set_start_month(2).unwrap();
        let hourly = loads.hourly_extraction_load_simulation_period().unwrap();
        // the first simulated hour is the first hour of February (equal months)
        assert!((hourly[0] - 730.0 / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn resample_matches_sums_and_maxima_on_random_data() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(20240);
        let series: Vec<Float> = (0..HOURS_PER_YEAR).map(|_| rng.gen_range(0.0..90.0)).collect();

        let mut loads = HourlyGroundLoads::new(series.clone(), vec![0.0; 8760]).unwrap();
        loads.set_months_convention(MonthsConvention::Calendar);
        loads.set_simulation_years(1).unwrap();

        let base = loads.monthly_baseload_extraction_simulation_period();
        let peak = loads.monthly_peak_extraction_simulation_period();
        let boundaries = MonthsConvention::Calendar.hour_boundaries();
        for m in 0..12 {
            let chunk = &series[boundaries[m]..boundaries[m + 1]];
            let sum: Float = chunk.iter().sum();
            let max = chunk.iter().fold(0.0, |a: Float, b| a.max(*b));
            assert!((base[m] - sum).abs() < 1e-6, "month {}", m);
            assert!((peak[m] - max).abs() < 1e-9, "month {}", m);
        }
    }

    #[test]
    fn multi_year_embeds_the_horizon() {
        let mut data = vec![0.0; 2 * 8760];
        data[8760] = 5.0; // one spike in year two
        let loads = HourlyGroundLoadsMultiYear::new(data, vec![0.0; 2 * 8760]).unwrap();
        assert_eq!(loads.simulation_years(), 2);
        let peak = loads.monthly_peak_extraction_simulation_period();
        assert_eq!(peak.len(), 24);
        assert!((peak[12] - 5.0).abs() < 1e-9);
        assert!(peak[0].abs() < 1e-9);
    }
}

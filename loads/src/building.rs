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
    aggregate_hourly, check_non_negative, check_peak_duration, check_start_month, Dhw, Efficiency,
    Float, DEFAULT_PEAK_DURATION,
};
use calendar::{rotate_monthly, MonthsConvention, HOURS_PER_YEAR, MONTHS_PER_YEAR};
use communication::{Error, GroundLoad};
use serde::{Deserialize, Serialize};

fn check_cop(cop: &Efficiency) -> Result<(), Error> {
    if cop.min_value() <= 1.0 {
        return Err(Error::invalid(
            "a heating COP must exceed 1 everywhere, or no heat would be drawn from the ground",
        ));
    }
    Ok(())
}

/// Building-side monthly loads, converted to the ground through a heat
/// pump.
///
/// Heating demand becomes ground extraction scaled by `1 − 1/COP`;
/// cooling demand becomes injection scaled by `1 + 1/EER`. Domestic hot
/// water, if present, is added to the heating side; whether it also
/// raises the extraction peaks is controlled by
/// [`MonthlyBuildingLoads::set_exclude_dhw_from_peak`].
///
/// The four series hold either 12 values (one repeating year, rotated
/// to the start month) or `12 * years` values (an embedded multi-year
/// horizon, starting in January of the first year).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBuildingLoads {
    heating: Vec<Float>,
    cooling: Vec<Float>,
    peak_heating: Vec<Float>,
    peak_cooling: Vec<Float>,
    cop: Efficiency,
    eer: Efficiency,
    dhw: Dhw,
    exclude_dhw_from_peak: bool,
    simulation_years: usize,
    start_month: usize,
    convention: MonthsConvention,
    peak_duration_extraction: Float,
    peak_duration_injection: Float,
}

impl MonthlyBuildingLoads {
    /// Builds a monthly building load. Baseloads in kWh/month, peaks in
    /// kW, January first; all four series must share their length, a
    /// positive multiple of 12.
    pub fn new(
        heating: Vec<Float>,
        cooling: Vec<Float>,
        peak_heating: Vec<Float>,
        peak_cooling: Vec<Float>,
        cop: Efficiency,
        eer: Efficiency,
    ) -> Result<Self, Error> {
        let len = heating.len();
        if len == 0 || len % MONTHS_PER_YEAR != 0 {
            return Err(Error::invalid(format!(
                "a monthly building series must hold a positive multiple of 12 values, not {}",
                len
            )));
        }
        if cooling.len() != len || peak_heating.len() != len || peak_cooling.len() != len {
            return Err(Error::invalid(
                "all four monthly building series must have the same length",
            ));
        }
        check_non_negative("the heating demand", &heating)?;
        check_non_negative("the cooling demand", &cooling)?;
        check_non_negative("the heating peak", &peak_heating)?;
        check_non_negative("the cooling peak", &peak_cooling)?;
        check_cop(&cop)?;
        Ok(Self {
            heating,
            cooling,
            peak_heating,
            peak_cooling,
            cop,
            eer,
            dhw: Dhw::None,
            exclude_dhw_from_peak: false,
            simulation_years: 20,
            start_month: 1,
            convention: MonthsConvention::default(),
            peak_duration_extraction: DEFAULT_PEAK_DURATION,
            peak_duration_injection: DEFAULT_PEAK_DURATION,
        })
    }

    /// Whether this load embeds its own multi-year horizon.
    pub fn is_multi_year(&self) -> bool {
        self.heating.len() > MONTHS_PER_YEAR
    }

    /// Adds a domestic hot water demand.
    pub fn set_dhw(&mut self, dhw: Dhw) {
        self.dhw = dhw;
    }

    /// When true, DHW contributes to the extraction baseload only, not
    /// to the extraction peaks.
    pub fn set_exclude_dhw_from_peak(&mut self, exclude: bool) {
        self.exclude_dhw_from_peak = exclude;
    }

    /// Sets the simulation horizon in years. Ignored for multi-year
    /// data, where the horizon is embedded.
    pub fn set_simulation_years(&mut self, years: usize) -> Result<(), Error> {
        if years == 0 {
            return Err(Error::invalid("the simulation must span at least one year"));
        }
        self.simulation_years = years;
        Ok(())
    }

    /// Sets the first simulated month. Ignored for multi-year data.
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

    /// Expands a January-first series to the simulation period:
    /// rotate-and-tile for single-year data, verbatim for multi-year.
    fn expand(&self, series: &[Float]) -> Vec<Float> {
        if self.is_multi_year() {
            return series.to_vec();
        }
        let mut year = [0.0; 12];
        year.copy_from_slice(series);
        let rotated = rotate_monthly(&year, self.start_month);
        let mut out = Vec::with_capacity(MONTHS_PER_YEAR * self.simulation_years);
        for _ in 0..self.simulation_years {
            out.extend_from_slice(&rotated);
        }
        out
    }

    fn dhw_energy_simulation_period(&self) -> Vec<Float> {
        let year = self.dhw.monthly_energy(self.convention);
        let start_month = self.start_month();
        let rotated = rotate_monthly(&year, start_month);
        let mut out = Vec::with_capacity(MONTHS_PER_YEAR * self.simulation_years());
        for _ in 0..self.simulation_years() {
            out.extend_from_slice(&rotated);
        }
        out
    }

    fn hours_simulation_period(&self) -> Vec<Float> {
        calendar::hours_per_month_simulation_period(
            self.convention,
            self.start_month(),
            self.simulation_years(),
        )
    }

    fn extraction_factor(&self) -> Float {
        1.0 - 1.0 / self.cop.value(1.0)
    }

    fn injection_factor(&self) -> Float {
        1.0 + 1.0 / self.eer.value(1.0)
    }
}

impl GroundLoad for MonthlyBuildingLoads {
    fn simulation_years(&self) -> usize {
        if self.is_multi_year() {
            self.heating.len() / MONTHS_PER_YEAR
        } else {
            self.simulation_years
        }
    }

    fn start_month(&self) -> usize {
        if self.is_multi_year() {
            1
        } else {
            self.start_month
        }
    }

    fn months_convention(&self) -> MonthsConvention {
        self.convention
    }

    fn monthly_baseload_extraction_simulation_period(&self) -> Vec<Float> {
        let f = self.extraction_factor();
        let heating = self.expand(&self.heating);
        let dhw = self.dhw_energy_simulation_period();
        heating
            .iter()
            .zip(dhw)
            .map(|(h, d)| (h + d) * f)
            .collect()
    }

    fn monthly_baseload_injection_simulation_period(&self) -> Vec<Float> {
        let f = self.injection_factor();
        self.expand(&self.cooling).iter().map(|c| c * f).collect()
    }

    fn monthly_peak_extraction_simulation_period(&self) -> Vec<Float> {
        let f = self.extraction_factor();
        let hours = self.hours_simulation_period();
        let dhw = self.dhw_energy_simulation_period();
        let mut peaks: Vec<Float> = self
            .expand(&self.peak_heating)
            .iter()
            .enumerate()
            .map(|(m, p)| {
                let dhw_power = if self.exclude_dhw_from_peak {
                    0.0
                } else {
                    dhw[m] / hours[m]
                };
                (p + dhw_power) * f
            })
            .collect();
        let baseloads = self.monthly_baseload_extraction_simulation_period();
        crate::raise_peaks_to_average(&mut peaks, &baseloads, &hours);
        peaks
    }

    fn monthly_peak_injection_simulation_period(&self) -> Vec<Float> {
        let f = self.injection_factor();
        let mut peaks: Vec<Float> = self
            .expand(&self.peak_cooling)
            .iter()
            .map(|p| p * f)
            .collect();
        let baseloads = self.monthly_baseload_injection_simulation_period();
        let hours = self.hours_simulation_period();
        crate::raise_peaks_to_average(&mut peaks, &baseloads, &hours);
        peaks
    }

    fn peak_duration_extraction(&self) -> Float {
        self.peak_duration_extraction
    }

    fn peak_duration_injection(&self) -> Float {
        self.peak_duration_injection
    }
}

/// Building-side hourly loads, converted to the ground through a heat
/// pump.
///
/// The COP/EER part-load axis is driven hour by hour with
/// `current load / yearly peak`. The two series hold either 8760 values
/// (one repeating year) or `8760 * years` values (embedded horizon).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyBuildingLoads {
    heating: Vec<Float>,
    cooling: Vec<Float>,
    cop: Efficiency,
    eer: Efficiency,
    dhw: Dhw,
    exclude_dhw_from_peak: bool,
    simulation_years: usize,
    start_month: usize,
    convention: MonthsConvention,
    peak_duration_extraction: Float,
    peak_duration_injection: Float,
}

impl HourlyBuildingLoads {
    /// Builds an hourly building load from heating and cooling demand
    /// series in kWh/h, the year starting on the 1st of January.
    pub fn new(
        heating: Vec<Float>,
        cooling: Vec<Float>,
        cop: Efficiency,
        eer: Efficiency,
    ) -> Result<Self, Error> {
        let len = heating.len();
        if len == 0 || len % HOURS_PER_YEAR != 0 {
            return Err(Error::invalid(format!(
                "an hourly building series must hold a positive multiple of {} values, not {}",
                HOURS_PER_YEAR, len
            )));
        }
        if cooling.len() != len {
            return Err(Error::invalid(
                "both hourly building series must have the same length",
            ));
        }
        check_non_negative("the heating demand", &heating)?;
        check_non_negative("the cooling demand", &cooling)?;
        check_cop(&cop)?;
        Ok(Self {
            heating,
            cooling,
            cop,
            eer,
            dhw: Dhw::None,
            exclude_dhw_from_peak: false,
            simulation_years: 20,
            start_month: 1,
            convention: MonthsConvention::default(),
            peak_duration_extraction: DEFAULT_PEAK_DURATION,
            peak_duration_injection: DEFAULT_PEAK_DURATION,
        })
    }

    /// Whether this load embeds its own multi-year horizon.
    pub fn is_multi_year(&self) -> bool {
        self.heating.len() > HOURS_PER_YEAR
    }

    /// Adds a domestic hot water demand.
    pub fn set_dhw(&mut self, dhw: Dhw) {
        self.dhw = dhw;
    }

    /// When true, DHW contributes to the extraction baseload only, not
    /// to the extraction peaks.
    pub fn set_exclude_dhw_from_peak(&mut self, exclude: bool) {
        self.exclude_dhw_from_peak = exclude;
    }

    /// Sets the simulation horizon in years. Ignored for multi-year
    /// data.
    pub fn set_simulation_years(&mut self, years: usize) -> Result<(), Error> {
        if years == 0 {
            return Err(Error::invalid("the simulation must span at least one year"));
        }
        self.simulation_years = years;
        Ok(())
    }

    /// Sets the first simulated month. Ignored for multi-year data.
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

    /// The DHW power of every hour of the data period (one year or the
    /// whole horizon), kW.
    fn dhw_hours(&self) -> Vec<Float> {
        let year = self.dhw.hourly_profile(self.convention);
        if !self.is_multi_year() {
            return year;
        }
        let years = self.heating.len() / HOURS_PER_YEAR;
        let mut out = Vec::with_capacity(self.heating.len());
        for _ in 0..years {
            out.extend_from_slice(&year);
        }
        out
    }

    /// Ground-side extraction, over the data period, with and without
    /// DHW. The per-hour COP is evaluated at the combined part load.
    fn ground_extraction(&self) -> (Vec<Float>, Vec<Float>) {
        let dhw = self.dhw_hours();
        let max_combined = self
            .heating
            .iter()
            .zip(&dhw)
            .fold(0.0, |a: Float, (h, d)| a.max(h + d));
        let mut with_dhw = Vec::with_capacity(self.heating.len());
        let mut without_dhw = Vec::with_capacity(self.heating.len());
        for (h, d) in self.heating.iter().zip(&dhw) {
            let combined = h + d;
            let part_load = if max_combined > 0.0 {
                combined / max_combined
            } else {
                0.0
            };
            let f = 1.0 - 1.0 / self.cop.value(part_load);
            with_dhw.push(combined * f);
            without_dhw.push(h * f);
        }
        (with_dhw, without_dhw)
    }

    /// Ground-side injection over the data period.
    fn ground_injection(&self) -> Vec<Float> {
        let max_cooling = self.cooling.iter().fold(0.0, |a: Float, b| a.max(*b));
        self.cooling
            .iter()
            .map(|c| {
                let part_load = if max_cooling > 0.0 { c / max_cooling } else { 0.0 };
                c * (1.0 + 1.0 / self.eer.value(part_load))
            })
            .collect()
    }

    /// Expands a data-period series to the simulation period:
    /// rotate-and-tile for single-year data, verbatim for multi-year.
    fn expand(&self, series: Vec<Float>) -> Vec<Float> {
        if self.is_multi_year() {
            return series;
        }
        let offset = self.convention.hour_boundaries()[self.start_month - 1];
        let mut rotated = Vec::with_capacity(series.len());
        for i in 0..series.len() {
            rotated.push(series[(i + offset) % HOURS_PER_YEAR]);
        }
        let mut out = Vec::with_capacity(rotated.len() * self.simulation_years);
        for _ in 0..self.simulation_years {
            out.extend_from_slice(&rotated);
        }
        out
    }
}

impl GroundLoad for HourlyBuildingLoads {
    fn simulation_years(&self) -> usize {
        if self.is_multi_year() {
            self.heating.len() / HOURS_PER_YEAR
        } else {
            self.simulation_years
        }
    }

    fn start_month(&self) -> usize {
        if self.is_multi_year() {
            1
        } else {
            self.start_month
        }
    }

    fn months_convention(&self) -> MonthsConvention {
        self.convention
    }

    fn monthly_baseload_extraction_simulation_period(&self) -> Vec<Float> {
        let series = self.expand(self.ground_extraction().0);
        aggregate_hourly(&series, self.convention, self.start_month()).0
    }

    fn monthly_baseload_injection_simulation_period(&self) -> Vec<Float> {
        let series = self.expand(self.ground_injection());
        aggregate_hourly(&series, self.convention, self.start_month()).0
    }

    fn monthly_peak_extraction_simulation_period(&self) -> Vec<Float> {
        let (with_dhw, without_dhw) = self.ground_extraction();
        let peak_basis = if self.exclude_dhw_from_peak {
            without_dhw
        } else {
            with_dhw
        };
        let series = self.expand(peak_basis);
        aggregate_hourly(&series, self.convention, self.start_month()).1
    }

    fn monthly_peak_injection_simulation_period(&self) -> Vec<Float> {
        let series = self.expand(self.ground_injection());
        aggregate_hourly(&series, self.convention, self.start_month()).1
    }

    fn hourly_extraction_load_simulation_period(&self) -> Option<Vec<Float>> {
        Some(self.expand(self.ground_extraction().0))
    }

    fn hourly_injection_load_simulation_period(&self) -> Option<Vec<Float>> {
        Some(self.expand(self.ground_injection()))
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

    #[test]
    fn monthly_conversion_applies_cop_and_eer() {
        let mut heating = vec![0.0; 12];
        heating[0] = 1000.0;
        let mut cooling = vec![0.0; 12];
        cooling[6] = 1000.0;
        let loads = MonthlyBuildingLoads::new(
            heating,
            cooling,
            vec![10.0; 12],
            vec![10.0; 12],
            Efficiency::constant(4.0).unwrap(),
            Efficiency::constant(5.0).unwrap(),
        )
        .unwrap();

        let ext = loads.monthly_baseload_extraction_simulation_period();
        assert!((ext[0] - 1000.0 * 0.75).abs() < 1e-9);
        let inj = loads.monthly_baseload_injection_simulation_period();
        assert!((inj[6] - 1000.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn cop_of_one_or_less_is_rejected() {
        let r = MonthlyBuildingLoads::new(
            vec![0.0; 12],
            vec![0.0; 12],
            vec![0.0; 12],
            vec![0.0; 12],
            Efficiency::Constant(1.0),
            Efficiency::constant(5.0).unwrap(),
        );
        assert!(r.is_err());
    }

    #[test]
    fn dhw_raises_baseload_and_optionally_peaks() {
        let mut loads = MonthlyBuildingLoads::new(
            vec![0.0; 12],
            vec![0.0; 12],
            vec![10.0; 12],
            vec![0.0; 12],
            Efficiency::constant(4.0).unwrap(),
            Efficiency::constant(5.0).unwrap(),
        )
        .unwrap();
        loads.set_dhw(Dhw::yearly(8760.0).unwrap());

        // 730 kWh per equal month, times (1 - 1/4)
        let ext = loads.monthly_baseload_extraction_simulation_period();
        assert!((ext[0] - 730.0 * 0.75).abs() < 1e-9);

        // included in the peak: 10 kW + 1 kW of DHW, converted
        let peaks = loads.monthly_peak_extraction_simulation_period();
        assert!((peaks[0] - 11.0 * 0.75).abs() < 1e-9);

        loads.set_exclude_dhw_from_peak(true);
        let peaks = loads.monthly_peak_extraction_simulation_period();
        assert!((peaks[0] - 10.0 * 0.75).abs() < 1e-9);
    }

    #[test]
    fn hourly_part_load_drives_the_map() {
        let mut heating = vec![0.0; 8760];
        heating[0] = 10.0; // the peak hour
        heating[1] = 5.0; // half load
        let cop = Efficiency::map(
            vec![0.0, 10.0],
            vec![0.5, 1.0],
            vec![vec![2.0, 6.0], vec![2.0, 6.0]],
        )
        .unwrap();
        let loads = HourlyBuildingLoads::new(
            heating,
            vec![0.0; 8760],
            cop,
            Efficiency::constant(5.0).unwrap(),
        )
        .unwrap();
        let ext = loads.hourly_extraction_load_simulation_period().unwrap();
        // full load: COP 6 -> factor 5/6
        assert!((ext[0] - 10.0 * (1.0 - 1.0 / 6.0)).abs() < 1e-9);
        // half load: COP 2 -> factor 1/2
        assert!((ext[1] - 5.0 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn hourly_exclude_dhw_only_touches_peaks() {
        let mut heating = vec![0.0; 8760];
        heating[100] = 8.0;
        let mut loads = HourlyBuildingLoads::new(
            heating,
            vec![0.0; 8760],
            Efficiency::constant(4.0).unwrap(),
            Efficiency::constant(5.0).unwrap(),
        )
        .unwrap();
        loads.set_dhw(Dhw::yearly(8760.0).unwrap());
        loads.set_exclude_dhw_from_peak(true);

        let base = loads.monthly_baseload_extraction_simulation_period();
        // January: (8 + 730 * 1) kWh building side, converted
        assert!((base[0] - (8.0 + 730.0) * 0.75).abs() < 1e-6);

        let peaks = loads.monthly_peak_extraction_simulation_period();
        // the peak ignores the 1 kW DHW floor
        assert!((peaks[0] - 8.0 * 0.75).abs() < 1e-9);
    }
}

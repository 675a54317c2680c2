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

use crate::{Borefield, Float, PI};
use calendar::{hourly_time_axis, hours_per_month_simulation_period, monthly_time_axis};
use communication::{Error, GroundLoad};

/// Monthly temperature evolution over the simulation period, °C.
/// One entry per month.
#[derive(Debug, Clone)]
pub struct MonthlyTemperatures {
    /// Borehole-wall temperature T_b.
    pub wall: Vec<Float>,

    /// Mean fluid temperature under the average extraction load.
    pub fluid_baseload_extraction: Vec<Float>,

    /// Mean fluid temperature under the average injection load.
    pub fluid_baseload_injection: Vec<Float>,

    /// Mean fluid temperature at the extraction peak pulse.
    pub fluid_peak_extraction: Vec<Float>,

    /// Mean fluid temperature at the injection peak pulse.
    pub fluid_peak_injection: Vec<Float>,
}

/// Hourly temperature evolution over the simulation period, °C.
/// One entry per hour.
#[derive(Debug, Clone)]
pub struct HourlyTemperatures {
    /// Borehole-wall temperature T_b.
    pub wall: Vec<Float>,

    /// Mean fluid temperature.
    pub fluid: Vec<Float>,
}

/// Causal convolution of the net load with the g-function increments:
/// `out[k] = Σ_{i ≤ k} load[i] · dg[k − i]`. Zero load steps are
/// skipped, and the cancellation flag is honoured between months of
/// work even on hourly series.
fn superpose(
    loads: &[Float],
    dg: &[Float],
    cancel: &communication::CancelFlag,
    check_every: usize,
) -> Result<Vec<Float>, Error> {
    let n = loads.len();
    let mut out = vec![0.0; n];
    for (i, q) in loads.iter().enumerate() {
        if i % check_every == 0 {
            cancel.check()?;
        }
        if *q == 0.0 {
            continue;
        }
        for (j, g) in dg[..n - i].iter().enumerate() {
            out[i + j] += q * g;
        }
    }
    Ok(out)
}

fn check_depth(h: Float) -> Result<(), Error> {
    if !h.is_finite() || h <= 0.0 {
        return Err(Error::invalid(format!(
            "the borehole length must be positive, not {}",
            h
        )));
    }
    Ok(())
}

impl Borefield {
    /// Monthly temperature evolution at borehole length `h`.
    ///
    /// The wall temperature is the superposition of the monthly net
    /// ground load (injection minus extraction, as average power); the
    /// fluid temperatures add the resistance drop of the monthly
    /// average and, for the peak series, the extra pulse of duration
    /// `peak_duration_*` on top of it.
    pub fn evaluate_monthly(
        &self,
        load: &dyn GroundLoad,
        h: Float,
    ) -> Result<MonthlyTemperatures, Error> {
        check_depth(h)?;
        let rb = self.rb(h)?;
        let n = self.n_boreholes() as Float;
        let ks = self.ground().conductivity;
        let tg = self.ground().temperature_at(h);

        let convention = load.months_convention();
        let start_month = load.start_month();
        let years = load.simulation_years();
        let hours = hours_per_month_simulation_period(convention, start_month, years);

        let extraction = load.monthly_baseload_extraction_simulation_period();
        let injection = load.monthly_baseload_injection_simulation_period();
        let peak_extraction = load.monthly_peak_extraction_simulation_period();
        let peak_injection = load.monthly_peak_injection_simulation_period();

        // monthly average powers, kW
        let avg_extraction: Vec<Float> = extraction
            .iter()
            .zip(&hours)
            .map(|(e, h)| e / h)
            .collect();
        let avg_injection: Vec<Float> = injection.iter().zip(&hours).map(|(i, h)| i / h).collect();
        let net: Vec<Float> = avg_injection
            .iter()
            .zip(&avg_extraction)
            .map(|(i, e)| i - e)
            .collect();

        let times = monthly_time_axis(convention, start_month, years);
        let g = self.g(&times, h)?;
        let mut dg = g.clone();
        for k in (1..dg.len()).rev() {
            dg[k] -= dg[k - 1];
        }

        let scale = 1000.0 / (2.0 * PI * ks * n * h);
        let superposed = superpose(&net, &dg, self.cancel_flag(), 12)?;
        let wall: Vec<Float> = superposed.iter().map(|dt| tg + scale * dt).collect();

        // resistance drop of the monthly average, K per kW
        let r_fluid = 1000.0 * rb / (n * h);
        let fluid_baseload_extraction: Vec<Float> = wall
            .iter()
            .zip(&avg_extraction)
            .map(|(w, q)| w - q * r_fluid)
            .collect();
        let fluid_baseload_injection: Vec<Float> = wall
            .iter()
            .zip(&avg_injection)
            .map(|(w, q)| w + q * r_fluid)
            .collect();

        // the extra peak pulse rides on the monthly average
        let g_peak_extraction = self.g(&[load.peak_duration_extraction()], h)?[0];
        let g_peak_injection = self.g(&[load.peak_duration_injection()], h)?[0];
        let r_pulse_extraction =
            1000.0 * (g_peak_extraction / (2.0 * PI * ks) + rb) / (n * h);
        let r_pulse_injection = 1000.0 * (g_peak_injection / (2.0 * PI * ks) + rb) / (n * h);

        let fluid_peak_extraction: Vec<Float> = fluid_baseload_extraction
            .iter()
            .enumerate()
            .map(|(m, base)| {
                let over = (peak_extraction[m] - avg_extraction[m]).max(0.0);
                base - over * r_pulse_extraction
            })
            .collect();
        let fluid_peak_injection: Vec<Float> = fluid_baseload_injection
            .iter()
            .enumerate()
            .map(|(m, base)| {
                let over = (peak_injection[m] - avg_injection[m]).max(0.0);
                base + over * r_pulse_injection
            })
            .collect();

        Ok(MonthlyTemperatures {
            wall,
            fluid_baseload_extraction,
            fluid_baseload_injection,
            fluid_peak_extraction,
            fluid_peak_injection,
        })
    }

    /// Hourly temperature evolution at borehole length `h`. Only
    /// available for loads carrying hourly data.
    pub fn evaluate_hourly(
        &self,
        load: &dyn GroundLoad,
        h: Float,
    ) -> Result<HourlyTemperatures, Error> {
        let extraction = load.hourly_extraction_load_simulation_period().ok_or_else(|| {
            Error::invalid("this load has no hourly data; use the monthly evaluation")
        })?;
        let injection = load
            .hourly_injection_load_simulation_period()
            .ok_or_else(|| {
                Error::invalid("this load has no hourly data; use the monthly evaluation")
            })?;
        self.hourly_temperatures_from_series(&extraction, &injection, h)
    }

    /// Hourly temperature evolution of explicit load series (kWh/h).
    /// The reshaper drives this directly with clipped candidates.
    pub fn hourly_temperatures_from_series(
        &self,
        extraction: &[Float],
        injection: &[Float],
        h: Float,
    ) -> Result<HourlyTemperatures, Error> {
        check_depth(h)?;
        if extraction.len() != injection.len() {
            return Err(Error::invalid(
                "the hourly extraction and injection series must have the same length",
            ));
        }
        let rb = self.rb(h)?;
        let n = self.n_boreholes() as Float;
        let ks = self.ground().conductivity;
        let tg = self.ground().temperature_at(h);

        let net: Vec<Float> = injection
            .iter()
            .zip(extraction)
            .map(|(i, e)| i - e)
            .collect();
        let times = hourly_time_axis(net.len().div_ceil(calendar::HOURS_PER_YEAR));
        let g = self.g(&times[..net.len()], h)?;
        let mut dg = g.clone();
        for k in (1..dg.len()).rev() {
            dg[k] -= dg[k - 1];
        }

        let scale = 1000.0 / (2.0 * PI * ks * n * h);
        let superposed = superpose(&net, &dg, self.cancel_flag(), 730)?;
        let wall: Vec<Float> = superposed.iter().map(|dt| tg + scale * dt).collect();

        let r_fluid = 1000.0 * rb / (n * h);
        let fluid: Vec<Float> = wall
            .iter()
            .zip(&net)
            .map(|(w, q)| w + q * r_fluid)
            .collect();

        Ok(HourlyTemperatures { wall, fluid })
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;
    use borehole::ResistanceModel;
    use communication::CancelFlag;
    use gfunction::GFunctionTable;
    use loads::MonthlyGroundLoads;
    use model::{FieldGeometry, Ground, TemperatureLimits};
    use std::sync::Arc;

    /// A table whose g-function is flat in time and depth, which makes
    /// the superposition collapse to `T_b = T_g + scale · q[k] · g`.
    fn flat_table(g: Float) -> Arc<GFunctionTable> {
        let time = vec![3600.0, 8760.0 * 3600.0 * 50.0, 8760.0 * 3600.0 * 100.0];
        let depths = vec![10.0, 400.0];
        let values = vec![g; 6];
        Arc::new(GFunctionTable::from_custom_parts("flat", time, depths, values).unwrap())
    }

    fn field(g: Float) -> Borefield {
        Borefield::new(
            Ground::constant_temperature(2.0, 2.4e6, 10.0).unwrap(),
            &FieldGeometry::rectangular(2, 2, 6.0).unwrap(),
            ResistanceModel::constant(0.1).unwrap(),
            TemperatureLimits::new(0.0, 16.0).unwrap(),
            flat_table(g),
            350.0,
        )
        .unwrap()
    }

    fn steady_injection(kw: Float) -> MonthlyGroundLoads {
        let energy = kw * 730.0;
        let mut loads =
            MonthlyGroundLoads::new([0.0; 12], [energy; 12], [0.0; 12], [kw; 12]).unwrap();
        loads.set_simulation_years(2).unwrap();
        loads
    }

    #[test]
    fn flat_response_reduces_to_a_closed_form() {
        let g = 6.0;
        let field = field(g);
        let kw = 40.0;
        let temps = field.evaluate_monthly(&steady_injection(kw), 100.0).unwrap();

        // with a flat g the whole history collapses into one step
        let scale = 1000.0 / (2.0 * PI * 2.0 * 4.0 * 100.0);
        let expected_wall = 10.0 + scale * kw * g;
        for w in &temps.wall {
            assert!((w - expected_wall).abs() < 1e-9, "wall = {}", w);
        }

        // fluid adds the resistance drop
        let expected_fluid = expected_wall + kw * 1000.0 * 0.1 / (4.0 * 100.0);
        for f in &temps.fluid_baseload_injection {
            assert!((f - expected_fluid).abs() < 1e-9);
        }
        // the peak equals the average here, so no extra pulse
        for (p, f) in temps
            .fluid_peak_injection
            .iter()
            .zip(&temps.fluid_baseload_injection)
        {
            assert!((p - f).abs() < 1e-9);
        }
        // nothing is extracted, so the extraction fluid sits on the wall
        for (f, w) in temps.fluid_baseload_extraction.iter().zip(&temps.wall) {
            assert!((f - w).abs() < 1e-9);
        }
    }

    #[test]
    fn peak_pulse_rides_on_the_baseload() {
        let field = field(6.0);
        let mut loads = steady_injection(40.0);
        loads.set_peak_injection([90.0; 12]).unwrap();
        let temps = field.evaluate_monthly(&loads, 100.0).unwrap();

        let rb = 0.1;
        let r_pulse = 1000.0 * (6.0 / (2.0 * PI * 2.0) + rb) / (4.0 * 100.0);
        let expected_over = (90.0 - 40.0) * r_pulse;
        for (p, f) in temps
            .fluid_peak_injection
            .iter()
            .zip(&temps.fluid_baseload_injection)
        {
            assert!(((p - f) - expected_over).abs() < 1e-9);
        }
    }

    #[test]
    fn superposition_is_causal() {
        // an arbitrary decaying dg
        let dg: Vec<Float> = (0..24).map(|k| 5.0 / (1.0 + k as Float)).collect();
        let mut loads: Vec<Float> = (0..24).map(|k| (k as Float * 0.7).sin().abs()).collect();
        let full = superpose(&loads, &dg, &CancelFlag::new(), 12).unwrap();

        // zeroing the future leaves the past untouched
        for q in loads.iter_mut().skip(12) {
            *q = 0.0;
        }
        let truncated = superpose(&loads, &dg, &CancelFlag::new(), 12).unwrap();
        for k in 0..12 {
            assert!((full[k] - truncated[k]).abs() < 1e-12);
        }
    }

    #[test]
    fn hourly_and_monthly_agree_for_a_steady_load() {
        // a constant load makes the two resolutions equivalent
        let field = field(6.0);
        let kw = 25.0;
        let hourly = loads::HourlyGroundLoadsMultiYear::new(vec![0.0; 8760], vec![kw; 8760]).unwrap();
        let temps_h = field.evaluate_hourly(&hourly, 100.0).unwrap();

        let mut monthly = steady_injection(kw);
        monthly.set_simulation_years(1).unwrap();
        let temps_m = field.evaluate_monthly(&monthly, 100.0).unwrap();

        // compare at the end of each month
        let boundaries = calendar::MonthsConvention::Equal.hour_boundaries();
        for m in 0..12 {
            let h_end = boundaries[m + 1] - 1;
            assert!(
                (temps_h.fluid[h_end] - temps_m.fluid_baseload_injection[m]).abs() < 1e-6,
                "month {}",
                m
            );
        }
    }

    #[test]
    fn cancellation_is_observed() {
        let mut field = field(6.0);
        let cancel = CancelFlag::new();
        cancel.cancel();
        field.set_cancel_flag(cancel);
        let err = field
            .evaluate_monthly(&steady_injection(40.0), 100.0)
            .unwrap_err();
        assert_eq!(err, communication::Error::Cancelled);
    }

    #[test]
    fn depth_must_be_positive() {
        let field = field(6.0);
        assert!(field.evaluate_monthly(&steady_injection(1.0), 0.0).is_err());
        assert!(field.evaluate_monthly(&steady_injection(1.0), -5.0).is_err());
    }
}

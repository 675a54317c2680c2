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
use calendar::MonthsConvention;

/// What the temperature evaluator and the sizers need from a load model.
///
/// Every load variant (monthly or hourly, ground-side or building-side,
/// single- or multi-year, or a cluster of them) answers the same
/// questions: monthly baseloads (kWh per month) and monthly peaks (kW)
/// over the whole simulation period, and (for hourly variants) the
/// hourly ground loads themselves.
///
/// Sign convention: extraction takes heat from the ground, injection
/// puts heat into it. All series are non-negative; the two directions
/// are kept apart rather than folded into one signed series.
///
/// `Sync` so that a field search can size candidate configurations
/// against the same load concurrently.
pub trait GroundLoad: Sync {
    /// The simulation horizon in years.
    fn simulation_years(&self) -> usize;

    /// The first simulated month, 1 (January) to 12 (December).
    /// Yearly patterns are rotated so this month comes first.
    fn start_month(&self) -> usize;

    /// The months-per-year convention all time arithmetic uses.
    fn months_convention(&self) -> MonthsConvention;

    /// Monthly extraction baseload over the whole period, kWh/month.
    /// Length `12 * simulation_years()`.
    fn monthly_baseload_extraction_simulation_period(&self) -> Vec<Float>;

    /// Monthly injection baseload over the whole period, kWh/month.
    fn monthly_baseload_injection_simulation_period(&self) -> Vec<Float>;

    /// Monthly peak extraction power over the whole period, kW.
    ///
    /// Never below the monthly average power: a peak smaller than the
    /// baseload average is silently raised to that average.
    fn monthly_peak_extraction_simulation_period(&self) -> Vec<Float>;

    /// Monthly peak injection power over the whole period, kW.
    fn monthly_peak_injection_simulation_period(&self) -> Vec<Float>;

    /// Hourly extraction load over the whole period, kWh/h.
    /// `None` for monthly-resolution variants.
    fn hourly_extraction_load_simulation_period(&self) -> Option<Vec<Float>> {
        None
    }

    /// Hourly injection load over the whole period, kWh/h.
    fn hourly_injection_load_simulation_period(&self) -> Option<Vec<Float>> {
        None
    }

    /// Whether this variant carries hourly data.
    fn has_hourly(&self) -> bool {
        self.hourly_extraction_load_simulation_period().is_some()
    }

    /// The notional duration of an extraction peak pulse, in seconds.
    fn peak_duration_extraction(&self) -> Float;

    /// The notional duration of an injection peak pulse, in seconds.
    fn peak_duration_injection(&self) -> Float;

    /// Yearly net ground energy, `(Σ injection − Σ extraction) / years`,
    /// in kWh. Positive means the field heats up over the years.
    fn imbalance(&self) -> Float {
        let extraction: Float = self
            .monthly_baseload_extraction_simulation_period()
            .iter()
            .sum();
        let injection: Float = self
            .monthly_baseload_injection_simulation_period()
            .iter()
            .sum();
        (injection - extraction) / self.simulation_years() as Float
    }
}

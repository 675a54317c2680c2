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
use communication::Error;
use serde::{Deserialize, Serialize};

/// The band the mean fluid temperature must stay inside, °C, held
/// constant over the horizon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TemperatureLimits {
    min: Float,
    max: Float,
}

impl TemperatureLimits {
    /// Builds the band; the minimum must lie strictly below the
    /// maximum.
    pub fn new(min: Float, max: Float) -> Result<Self, Error> {
        if !(min < max) {
            return Err(Error::invalid(format!(
                "the minimum fluid temperature ({}) must lie below the maximum ({})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// The lower bound, °C.
    pub fn min(&self) -> Float {
        self.min
    }

    /// The upper bound, °C.
    pub fn max(&self) -> Float {
        self.max
    }
}

/// Options of one simulation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationOptions {
    /// Horizon in years.
    pub simulation_years: usize,

    /// How the 8760 hours of a year split into months.
    pub months_convention: MonthsConvention,

    /// First simulated month, 1..=12.
    pub start_month: usize,

    /// Initial borehole length guess for the sizers, m.
    pub h_init: Float,

    /// Deepest acceptable borehole, m.
    pub h_max: Float,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            simulation_years: 20,
            months_convention: MonthsConvention::Equal,
            start_month: 1,
            h_init: 100.0,
            h_max: 350.0,
        }
    }
}

impl SimulationOptions {
    /// Validates the option set as a whole.
    pub fn validate(&self) -> Result<(), Error> {
        if self.simulation_years == 0 {
            return Err(Error::invalid("the simulation must span at least one year"));
        }
        if !(1..=12).contains(&self.start_month) {
            return Err(Error::invalid(format!(
                "the start month must be between 1 and 12, not {}",
                self.start_month
            )));
        }
        if !(self.h_max > 0.0) {
            return Err(Error::invalid("the maximum borehole length must be positive"));
        }
        Ok(())
    }
}

/// The cost of drilling a field, as a polynomial in the total drilled
/// length `L = N · H`:
/// `cost(L) = c_0 + c_1 L + c_2 L² + ...`.
///
/// The default is proportional to the length, which is all that is
/// needed to rank candidate fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostModel {
    /// Polynomial coefficients, the constant term first.
    pub coefficients: Vec<Float>,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::proportional(1.0)
    }
}

impl CostModel {
    /// A cost of `per_metre` per drilled metre.
    pub fn proportional(per_metre: Float) -> Self {
        Self {
            coefficients: vec![0.0, per_metre],
        }
    }

    /// A polynomial cost model from its coefficients, the constant
    /// term first.
    pub fn polynomial(coefficients: Vec<Float>) -> Result<Self, Error> {
        if coefficients.is_empty() {
            return Err(Error::invalid("a cost polynomial needs coefficients"));
        }
        Ok(Self { coefficients })
    }

    /// The cost of a total drilled length, m.
    pub fn cost(&self, total_length: Float) -> Float {
        let mut out = 0.0;
        let mut power = 1.0;
        for c in &self.coefficients {
            out += c * power;
            power *= total_length;
        }
        out
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_must_be_ordered() {
        assert!(TemperatureLimits::new(0.0, 16.0).is_ok());
        assert!(TemperatureLimits::new(16.0, 0.0).is_err());
        assert!(TemperatureLimits::new(5.0, 5.0).is_err());
    }

    #[test]
    fn default_options_validate() {
        assert!(SimulationOptions::default().validate().is_ok());
        let mut bad = SimulationOptions::default();
        bad.start_month = 13;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn cost_polynomial() {
        let linear = CostModel::proportional(35.0);
        assert!((linear.cost(1000.0) - 35_000.0).abs() < 1e-9);

        let poly = CostModel::polynomial(vec![10_000.0, 30.0, 0.001]).unwrap();
        let expected = 10_000.0 + 30.0 * 500.0 + 0.001 * 500.0 * 500.0;
        assert!((poly.cost(500.0) - expected).abs() < 1e-9);

        assert!(CostModel::polynomial(vec![]).is_err());
    }
}

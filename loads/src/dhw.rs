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

use crate::{check_non_negative, Float};
use calendar::{MonthsConvention, HOURS_PER_YEAR};
use communication::Error;
use serde::{Deserialize, Serialize};

/// Domestic hot water demand, building side, always on the extraction
/// side of the ground.
///
/// Either absent, a yearly total spread uniformly over the hours of the
/// year, or an explicit monthly or hourly profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum Dhw {
    /// No domestic hot water.
    #[default]
    None,

    /// A yearly total, kWh, drawn uniformly.
    Yearly(Float),

    /// Twelve monthly totals, kWh, January first.
    Monthly(Vec<Float>),

    /// 8760 hourly values, kWh/h, the year starting on the 1st of
    /// January.
    Hourly(Vec<Float>),
}

impl Dhw {
    /// A yearly total, kWh.
    pub fn yearly(total: Float) -> Result<Self, Error> {
        check_non_negative("the yearly DHW demand", &[total])?;
        Ok(Dhw::Yearly(total))
    }

    /// Twelve monthly totals, kWh.
    pub fn monthly(values: Vec<Float>) -> Result<Self, Error> {
        if values.len() != 12 {
            return Err(Error::invalid(format!(
                "a monthly DHW profile needs 12 values, not {}",
                values.len()
            )));
        }
        check_non_negative("the monthly DHW demand", &values)?;
        Ok(Dhw::Monthly(values))
    }

    /// 8760 hourly values, kWh/h.
    pub fn hourly(values: Vec<Float>) -> Result<Self, Error> {
        if values.len() != HOURS_PER_YEAR {
            return Err(Error::invalid(format!(
                "an hourly DHW profile needs {} values, not {}",
                HOURS_PER_YEAR,
                values.len()
            )));
        }
        check_non_negative("the hourly DHW demand", &values)?;
        Ok(Dhw::Hourly(values))
    }

    /// The DHW energy of each month, kWh, January first.
    pub fn monthly_energy(&self, convention: MonthsConvention) -> [Float; 12] {
        let hours = convention.hours_per_month_float();
        match self {
            Dhw::None => [0.0; 12],
            Dhw::Yearly(total) => {
                let per_hour = total / HOURS_PER_YEAR as Float;
                let mut out = [0.0; 12];
                for (o, h) in out.iter_mut().zip(hours) {
                    *o = per_hour * h;
                }
                out
            }
            Dhw::Monthly(values) => {
                let mut out = [0.0; 12];
                out.copy_from_slice(values);
                out
            }
            Dhw::Hourly(values) => {
                let (base, _) = crate::aggregate_hourly(values, convention, 1);
                let mut out = [0.0; 12];
                out.copy_from_slice(&base);
                out
            }
        }
    }

    /// The DHW power of each hour of the year, kW, the year starting on
    /// the 1st of January. Monthly and yearly shapes are spread flat
    /// inside each month.
    pub fn hourly_profile(&self, convention: MonthsConvention) -> Vec<Float> {
        match self {
            Dhw::None => vec![0.0; HOURS_PER_YEAR],
            Dhw::Yearly(total) => vec![total / HOURS_PER_YEAR as Float; HOURS_PER_YEAR],
            Dhw::Monthly(values) => {
                let hours = convention.hours_per_month();
                let mut out = Vec::with_capacity(HOURS_PER_YEAR);
                for (m, n) in hours.iter().enumerate() {
                    let power = values[m] / *n as Float;
                    out.extend(std::iter::repeat(power).take(*n));
                }
                out
            }
            Dhw::Hourly(values) => values.clone(),
        }
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yearly_spreads_by_hours() {
        let dhw = Dhw::yearly(8760.0).unwrap();
        let monthly = dhw.monthly_energy(MonthsConvention::Calendar);
        assert!((monthly[0] - 744.0).abs() < 1e-9);
        assert!((monthly[1] - 672.0).abs() < 1e-9);
        let total: Float = monthly.iter().sum();
        assert!((total - 8760.0).abs() < 1e-9);

        let hourly = dhw.hourly_profile(MonthsConvention::Calendar);
        assert_eq!(hourly.len(), 8760);
        assert!((hourly[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn monthly_profile_is_flat_within_a_month() {
        let mut values = vec![0.0; 12];
        values[1] = 672.0; // February only
        let dhw = Dhw::monthly(values).unwrap();
        let hourly = dhw.hourly_profile(MonthsConvention::Calendar);
        assert!(hourly[743].abs() < 1e-9); // last hour of January
        assert!((hourly[744] - 1.0).abs() < 1e-9); // first hour of February
        let total: Float = hourly.iter().sum();
        assert!((total - 672.0).abs() < 1e-9);
    }

    #[test]
    fn shapes_are_validated() {
        assert!(Dhw::yearly(-1.0).is_err());
        assert!(Dhw::monthly(vec![0.0; 11]).is_err());
        assert!(Dhw::hourly(vec![0.0; 8761]).is_err());
    }
}

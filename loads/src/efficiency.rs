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
use communication::Error;
use serde::{Deserialize, Serialize};

/// A heat-pump efficiency (COP for heating, EER for cooling).
///
/// Three fidelities: a single scalar (SCOP/SEER), a curve over the
/// average fluid temperature, or a map over temperature and part load.
/// Curves and maps are evaluated at a fixed reference temperature; the
/// sizing core does not iterate the load conversion with the fluid
/// temperature it later computes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Efficiency {
    /// A seasonal scalar.
    Constant(Float),

    /// Linear interpolation over the fluid temperature; clamped at the
    /// ends of the table.
    TemperatureCurve {
        /// Strictly increasing fluid temperatures, °C.
        temperatures: Vec<Float>,
        /// Efficiency at each temperature.
        values: Vec<Float>,
        /// The temperature the load conversion is evaluated at.
        reference_temperature: Float,
    },

    /// Bilinear interpolation over fluid temperature and part load
    /// (fraction of the yearly peak, 0..=1); clamped at the edges.
    Map {
        /// Strictly increasing fluid temperatures, °C.
        temperatures: Vec<Float>,
        /// Strictly increasing part loads.
        part_loads: Vec<Float>,
        /// `values[t][p]`: efficiency at `temperatures[t]`,
        /// `part_loads[p]`.
        values: Vec<Vec<Float>>,
        /// The temperature the load conversion is evaluated at.
        reference_temperature: Float,
    },
}

fn check_axis(name: &str, axis: &[Float]) -> Result<(), Error> {
    if axis.is_empty() {
        return Err(Error::invalid(format!("the {} axis may not be empty", name)));
    }
    for w in axis.windows(2) {
        if w[1] <= w[0] {
            return Err(Error::invalid(format!(
                "the {} axis must be strictly increasing",
                name
            )));
        }
    }
    Ok(())
}

fn check_values(values: &[Float]) -> Result<(), Error> {
    for v in values {
        if !v.is_finite() || *v <= 0.0 {
            return Err(Error::invalid(format!(
                "efficiencies must be positive numbers, not {}",
                v
            )));
        }
    }
    Ok(())
}

/// Linear interpolation with clamping at both ends.
fn interp1(xs: &[Float], ys: &[Float], x: Float) -> Float {
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }
    let i = xs.partition_point(|v| *v <= x) - 1;
    let w = (x - xs[i]) / (xs[i + 1] - xs[i]);
    ys[i] * (1.0 - w) + ys[i + 1] * w
}

impl Efficiency {
    /// A scalar efficiency.
    pub fn constant(value: Float) -> Result<Self, Error> {
        check_values(&[value])?;
        Ok(Efficiency::Constant(value))
    }

    /// An efficiency interpolated over the fluid temperature. The
    /// reference temperature defaults to the midpoint of the table.
    pub fn curve(temperatures: Vec<Float>, values: Vec<Float>) -> Result<Self, Error> {
        check_axis("temperature", &temperatures)?;
        if values.len() != temperatures.len() {
            return Err(Error::invalid(
                "an efficiency curve needs one value per temperature",
            ));
        }
        check_values(&values)?;
        let reference_temperature = (temperatures[0] + temperatures[temperatures.len() - 1]) / 2.0;
        Ok(Efficiency::TemperatureCurve {
            temperatures,
            values,
            reference_temperature,
        })
    }

    /// An efficiency interpolated over temperature and part load. The
    /// reference temperature defaults to the midpoint of the table.
    pub fn map(
        temperatures: Vec<Float>,
        part_loads: Vec<Float>,
        values: Vec<Vec<Float>>,
    ) -> Result<Self, Error> {
        check_axis("temperature", &temperatures)?;
        check_axis("part-load", &part_loads)?;
        if values.len() != temperatures.len() {
            return Err(Error::invalid(
                "an efficiency map needs one row per temperature",
            ));
        }
        for row in &values {
            if row.len() != part_loads.len() {
                return Err(Error::invalid(
                    "every efficiency-map row needs one value per part load",
                ));
            }
            check_values(row)?;
        }
        let reference_temperature = (temperatures[0] + temperatures[temperatures.len() - 1]) / 2.0;
        Ok(Efficiency::Map {
            temperatures,
            part_loads,
            values,
            reference_temperature,
        })
    }

    /// Overrides the temperature the conversion is evaluated at.
    /// No effect on scalar efficiencies.
    pub fn set_reference_temperature(&mut self, temperature: Float) {
        match self {
            Efficiency::Constant(_) => (),
            Efficiency::TemperatureCurve {
                reference_temperature,
                ..
            }
            | Efficiency::Map {
                reference_temperature,
                ..
            } => *reference_temperature = temperature,
        }
    }

    /// The efficiency at the reference temperature and the given part
    /// load.
    pub fn value(&self, part_load: Float) -> Float {
        match self {
            Efficiency::Constant(v) => *v,
            Efficiency::TemperatureCurve {
                reference_temperature,
                ..
            }
            | Efficiency::Map {
                reference_temperature,
                ..
            } => self.value_at(*reference_temperature, part_load),
        }
    }

    /// The efficiency at an explicit temperature and part load.
    pub fn value_at(&self, temperature: Float, part_load: Float) -> Float {
        match self {
            Efficiency::Constant(v) => *v,
            Efficiency::TemperatureCurve {
                temperatures,
                values,
                ..
            } => interp1(temperatures, values, temperature),
            Efficiency::Map {
                temperatures,
                part_loads,
                values,
                ..
            } => {
                // interpolate each temperature row over the part load,
                // then across temperatures
                let rows: Vec<Float> = values
                    .iter()
                    .map(|row| interp1(part_loads, row, part_load))
                    .collect();
                interp1(temperatures, &rows, temperature)
            }
        }
    }

    /// The smallest efficiency anywhere in the table.
    pub fn min_value(&self) -> Float {
        match self {
            Efficiency::Constant(v) => *v,
            Efficiency::TemperatureCurve { values, .. } => {
                values.iter().fold(Float::INFINITY, |a, b| a.min(*b))
            }
            Efficiency::Map { values, .. } => values
                .iter()
                .flatten()
                .fold(Float::INFINITY, |a, b| a.min(*b)),
        }
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

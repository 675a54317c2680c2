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

/// The undisturbed ground temperature model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum GroundTemperature {
    /// One temperature at any depth, °C.
    Constant(Float),

    /// A surface temperature plus a linear geothermal gradient. The
    /// temperature a borehole of length H sees is the average over its
    /// depth, `T_surface + gradient · H / 200` with the gradient in
    /// K per 100 m.
    Gradient {
        /// Temperature at the surface, °C.
        surface: Float,
        /// Geothermal gradient, K per 100 m.
        gradient: Float,
    },
}

/// Ground thermal properties.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Ground {
    /// Thermal conductivity k_s, W/(m·K).
    pub conductivity: Float,

    /// Volumetric heat capacity ρc, J/(m³·K).
    pub volumetric_heat_capacity: Float,

    temperature: GroundTemperature,
}

impl Ground {
    /// Ground with a depth-independent undisturbed temperature.
    pub fn constant_temperature(
        conductivity: Float,
        volumetric_heat_capacity: Float,
        temperature: Float,
    ) -> Result<Self, Error> {
        Self::new(
            conductivity,
            volumetric_heat_capacity,
            GroundTemperature::Constant(temperature),
        )
    }

    /// Ground with a linear geothermal gradient (K per 100 m).
    pub fn with_gradient(
        conductivity: Float,
        volumetric_heat_capacity: Float,
        surface: Float,
        gradient: Float,
    ) -> Result<Self, Error> {
        Self::new(
            conductivity,
            volumetric_heat_capacity,
            GroundTemperature::Gradient { surface, gradient },
        )
    }

    /// Ground from an explicit temperature model.
    pub fn new(
        conductivity: Float,
        volumetric_heat_capacity: Float,
        temperature: GroundTemperature,
    ) -> Result<Self, Error> {
        if !(conductivity > 0.0) {
            return Err(Error::invalid(format!(
                "the ground conductivity must be positive, not {}",
                conductivity
            )));
        }
        if !(volumetric_heat_capacity > 0.0) {
            return Err(Error::invalid(format!(
                "the volumetric heat capacity must be positive, not {}",
                volumetric_heat_capacity
            )));
        }
        Ok(Self {
            conductivity,
            volumetric_heat_capacity,
            temperature,
        })
    }

    /// The undisturbed temperature a borehole of length `h` works
    /// against, °C.
    pub fn temperature_at(&self, h: Float) -> Float {
        match self.temperature {
            GroundTemperature::Constant(t) => t,
            GroundTemperature::Gradient { surface, gradient } => {
                surface + gradient * h / 200.0
            }
        }
    }

    /// The temperature model itself.
    pub fn temperature_model(&self) -> GroundTemperature {
        self.temperature
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

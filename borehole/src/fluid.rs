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

/// The heat-carrier fluid and the mass flow through one borehole.
///
/// Properties are taken constant over the operating range; the presets
/// are evaluated around 15 °C.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FluidData {
    /// Density, kg/m³.
    pub density: Float,

    /// Specific heat, J/(kg·K).
    pub specific_heat: Float,

    /// Dynamic viscosity, Pa·s.
    pub viscosity: Float,

    /// Thermal conductivity, W/(m·K).
    pub conductivity: Float,

    /// Mass flow rate through one borehole, kg/s.
    pub mass_flow_rate: Float,
}

fn check_positive(name: &str, value: Float) -> Result<(), Error> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::invalid(format!(
            "the fluid {} must be positive, not {}",
            name, value
        )));
    }
    Ok(())
}

impl FluidData {
    /// A fluid from explicit properties.
    pub fn new(
        density: Float,
        specific_heat: Float,
        viscosity: Float,
        conductivity: Float,
        mass_flow_rate: Float,
    ) -> Result<Self, Error> {
        check_positive("density", density)?;
        check_positive("specific heat", specific_heat)?;
        check_positive("viscosity", viscosity)?;
        check_positive("conductivity", conductivity)?;
        check_positive("mass flow rate", mass_flow_rate)?;
        Ok(Self {
            density,
            specific_heat,
            viscosity,
            conductivity,
            mass_flow_rate,
        })
    }

    /// Plain water at the given per-borehole mass flow, kg/s.
    pub fn water(mass_flow_rate: Float) -> Result<Self, Error> {
        Self::new(999.1, 4183.0, 1.14e-3, 0.589, mass_flow_rate)
    }

    /// A water/monoethylene-glycol mixture at the given glycol volume
    /// fraction (0..=0.5) and per-borehole mass flow, kg/s.
    ///
    /// Properties are linear blends between water and a 50 % mixture,
    /// which is accurate enough for resistance estimates.
    pub fn water_glycol(mass_flow_rate: Float, glycol_fraction: Float) -> Result<Self, Error> {
        if !(0.0..=0.5).contains(&glycol_fraction) {
            return Err(Error::invalid(format!(
                "the glycol fraction must lie in [0, 0.5], not {}",
                glycol_fraction
            )));
        }
        // properties of a 50 % MEG mixture around 15 °C
        let x = glycol_fraction / 0.5;
        let density = 999.1 * (1.0 - x) + 1070.0 * x;
        let specific_heat = 4183.0 * (1.0 - x) + 3300.0 * x;
        let viscosity = 1.14e-3 * (1.0 - x) + 4.8e-3 * x;
        let conductivity = 0.589 * (1.0 - x) + 0.40 * x;
        Self::new(density, specific_heat, viscosity, conductivity, mass_flow_rate)
    }

    /// The Prandtl number of the fluid.
    pub fn prandtl(&self) -> Float {
        self.specific_heat * self.viscosity / self.conductivity
    }

    /// The heat-capacity flow through one borehole, W/K.
    pub fn capacity_flow(&self) -> Float {
        self.mass_flow_rate * self.specific_heat
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_prandtl_is_plausible() {
        let water = FluidData::water(0.3).unwrap();
        let pr = water.prandtl();
        assert!(pr > 5.0 && pr < 12.0, "Pr = {}", pr);
    }

    #[test]
    fn glycol_is_thicker_than_water() {
        let water = FluidData::water(0.3).unwrap();
        let brine = FluidData::water_glycol(0.3, 0.3).unwrap();
        assert!(brine.viscosity > water.viscosity);
        assert!(brine.conductivity < water.conductivity);
        assert!(FluidData::water_glycol(0.3, 0.7).is_err());
    }

    #[test]
    fn non_physical_properties_are_rejected() {
        assert!(FluidData::new(0.0, 4183.0, 1e-3, 0.6, 0.3).is_err());
        assert!(FluidData::new(1000.0, 4183.0, 1e-3, 0.6, -0.1).is_err());
        assert!(FluidData::water(0.0).is_err());
    }
}

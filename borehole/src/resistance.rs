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

use crate::{Float, FluidData, PipeData, PI};
use communication::Error;
use serde::{Deserialize, Serialize};

/// The equivalent borehole resistance R_b, m·K/W, behind one call:
/// [`ResistanceModel::rb`].
///
/// Three modes. `Constant` returns the user's scalar. `Dynamic`
/// recomputes from the pipe/fluid description at every call; the
/// borehole length enters through the short-circuit correction, so the
/// sizers re-evaluate it each iteration. "Constant but unknown" is
/// covered by [`ResistanceModel::frozen`], which computes the dynamic
/// value once at an initial length and freezes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ResistanceModel {
    /// A fixed, user-supplied resistance.
    Constant(Float),

    /// Recomputed from geometry, fluid and flow at every call.
    Dynamic(DynamicResistance),
}

impl ResistanceModel {
    /// A constant resistance. Negative or zero values are a hard error.
    pub fn constant(rb: Float) -> Result<Self, Error> {
        if !rb.is_finite() || rb <= 0.0 {
            return Err(Error::invalid(format!(
                "the borehole resistance must be positive, not {}",
                rb
            )));
        }
        Ok(ResistanceModel::Constant(rb))
    }

    /// A resistance recomputed from the borehole internals at every
    /// sizing iteration.
    pub fn dynamic(
        pipe: PipeData,
        fluid: FluidData,
        borehole_radius: Float,
        ground_conductivity: Float,
    ) -> Result<Self, Error> {
        Ok(ResistanceModel::Dynamic(DynamicResistance::new(
            pipe,
            fluid,
            borehole_radius,
            ground_conductivity,
        )?))
    }

    /// A resistance computed once from the borehole internals at
    /// `h_init` and frozen there.
    pub fn frozen(
        pipe: PipeData,
        fluid: FluidData,
        borehole_radius: Float,
        ground_conductivity: Float,
        h_init: Float,
    ) -> Result<Self, Error> {
        let dynamic = DynamicResistance::new(pipe, fluid, borehole_radius, ground_conductivity)?;
        Ok(ResistanceModel::Constant(dynamic.equivalent(h_init)?))
    }

    /// The equivalent resistance at borehole length `h`, m·K/W.
    pub fn rb(&self, h: Float) -> Result<Float, Error> {
        match self {
            ResistanceModel::Constant(rb) => Ok(*rb),
            ResistanceModel::Dynamic(dynamic) => dynamic.equivalent(h),
        }
    }
}

/// The pipe/fluid description a dynamic resistance is computed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DynamicResistance {
    pipe: PipeData,
    fluid: FluidData,
    borehole_radius: Float,
    ground_conductivity: Float,
}

impl DynamicResistance {
    /// Validates the description, including the shank-spacing bound.
    pub fn new(
        pipe: PipeData,
        fluid: FluidData,
        borehole_radius: Float,
        ground_conductivity: Float,
    ) -> Result<Self, Error> {
        if !(borehole_radius > 0.0) {
            return Err(Error::invalid("the borehole radius must be positive"));
        }
        if !(ground_conductivity > 0.0) {
            return Err(Error::invalid("the ground conductivity must be positive"));
        }
        pipe.validate_shank_spacing(borehole_radius)?;
        Ok(Self {
            pipe,
            fluid,
            borehole_radius,
            ground_conductivity,
        })
    }

    /// Reynolds number of the flow in one pipe leg.
    pub fn reynolds(&self) -> Float {
        let leg_flow = self.fluid.mass_flow_rate / self.pipe.n_pipes as Float;
        2.0 * leg_flow / (PI * self.pipe.inner_radius * self.fluid.viscosity)
    }

    /// Nusselt number of the internal flow: 4.36 below Re = 2300,
    /// Gnielinski with a Haaland friction factor above.
    fn nusselt(&self) -> Float {
        let re = self.reynolds();
        if re < 2300.0 {
            return 4.36;
        }
        let pr = self.fluid.prandtl();
        let rel_roughness = self.pipe.roughness / (2.0 * self.pipe.inner_radius);
        let haaland: Float = -1.8 * ((rel_roughness / 3.7).powf(1.11) + 6.9 / re).log10();
        let f = haaland.powi(-2);
        (f / 8.0) * (re - 1000.0) * pr / (1.0 + 12.7 * (f / 8.0).sqrt() * (pr.powf(2.0 / 3.0) - 1.0))
    }

    /// Resistance of one pipe leg: internal convection plus conduction
    /// through the wall, m·K/W.
    fn pipe_resistance(&self) -> Float {
        let h_conv = self.nusselt() * self.fluid.conductivity / (2.0 * self.pipe.inner_radius);
        let convection = 1.0 / (2.0 * PI * self.pipe.inner_radius * h_conv);
        let wall = (self.pipe.outer_radius / self.pipe.inner_radius).ln()
            / (2.0 * PI * self.pipe.conductivity);
        convection + wall
    }

    /// Local (short-circuit-free) borehole resistance: zeroth-order
    /// multipole for `n` legs placed symmetrically at the shank radius.
    fn local_resistance(&self) -> Float {
        let n = self.pipe.n_legs() as Float;
        let rb = self.borehole_radius;
        let rp = self.pipe.outer_radius;
        let b = self.pipe.shank_spacing;
        let kg = self.pipe.grout_conductivity;
        let sigma = (kg - self.ground_conductivity) / (kg + self.ground_conductivity);

        let placement = n * rb.ln() - n.ln() - rp.ln() - (n - 1.0) * b.ln();
        let wall_images = -sigma * (1.0 - (b / rb).powf(2.0 * n)).ln();
        let grout = (placement + wall_images) / (2.0 * PI * kg * n);
        grout + self.pipe_resistance() / n
    }

    /// Internal fluid-to-fluid resistance between the up- and down-legs
    /// of a U-pipe, m·K/W.
    fn internal_resistance(&self) -> Float {
        let rb = self.borehole_radius;
        let rp = self.pipe.outer_radius;
        let b = self.pipe.shank_spacing;
        let kg = self.pipe.grout_conductivity;
        let sigma = (kg - self.ground_conductivity) / (kg + self.ground_conductivity);

        let ra = 2.0 * self.pipe_resistance()
            + ((2.0 * b / rp).ln() + sigma * ((rb * rb + b * b) / (rb * rb - b * b)).ln())
                / (PI * kg);
        // parallel U-pipes short-circuit in parallel
        ra / self.pipe.n_pipes as Float
    }

    /// The effective resistance at borehole length `h`: the local value
    /// plus the short-circuit correction `H² / (3 R_a (ṁ c_p)²)`.
    pub fn equivalent(&self, h: Float) -> Result<Float, Error> {
        if !h.is_finite() || h <= 0.0 {
            return Err(Error::invalid(format!(
                "the borehole length must be positive, not {}",
                h
            )));
        }
        let capacity_flow = self.fluid.capacity_flow();
        let correction =
            h * h / (3.0 * self.internal_resistance() * capacity_flow * capacity_flow);
        Ok(self.local_resistance() + correction)
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

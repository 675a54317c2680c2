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

use crate::{Float, PI};
use communication::Error;
use serde::{Deserialize, Serialize};

/// The U-pipes inside a borehole and the grout around them.
///
/// `n_pipes` counts U-pipes; each contributes two legs to the borehole
/// cross-section, placed symmetrically on a circle of radius
/// `shank_spacing` around the centre.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PipeData {
    /// Number of U-pipes per borehole (1 = single-U, 2 = double-U...).
    pub n_pipes: usize,

    /// Inner pipe radius, m.
    pub inner_radius: Float,

    /// Outer pipe radius, m.
    pub outer_radius: Float,

    /// Distance from the borehole centre to each pipe centre, m.
    pub shank_spacing: Float,

    /// Pipe-wall conductivity, W/(m·K).
    pub conductivity: Float,

    /// Grout conductivity, W/(m·K).
    pub grout_conductivity: Float,

    /// Inner pipe-wall roughness, m.
    pub roughness: Float,

    /// Burial depth of the borehole head, m.
    pub burial_depth: Float,
}

impl PipeData {
    /// Builds a pipe description, checking every dimension for
    /// plausibility. The shank-spacing bound that involves the borehole
    /// radius is checked separately in
    /// [`PipeData::validate_shank_spacing`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n_pipes: usize,
        inner_radius: Float,
        outer_radius: Float,
        shank_spacing: Float,
        conductivity: Float,
        grout_conductivity: Float,
        roughness: Float,
        burial_depth: Float,
    ) -> Result<Self, Error> {
        if n_pipes == 0 {
            return Err(Error::invalid("a borehole needs at least one U-pipe"));
        }
        if !(inner_radius > 0.0 && outer_radius > inner_radius) {
            return Err(Error::invalid(format!(
                "pipe radii must satisfy 0 < r_in < r_out (got r_in = {}, r_out = {})",
                inner_radius, outer_radius
            )));
        }
        if !(shank_spacing > 0.0) {
            return Err(Error::invalid("the shank spacing must be positive"));
        }
        if !(conductivity > 0.0) || !(grout_conductivity > 0.0) {
            return Err(Error::invalid(
                "pipe and grout conductivities must be positive",
            ));
        }
        if !(roughness >= 0.0) || !(burial_depth >= 0.0) {
            return Err(Error::invalid(
                "roughness and burial depth may not be negative",
            ));
        }
        Ok(Self {
            n_pipes,
            inner_radius,
            outer_radius,
            shank_spacing,
            conductivity,
            grout_conductivity,
            roughness,
            burial_depth,
        })
    }

    /// A typical single-U HDPE pipe in thermally-enhanced grout.
    pub fn single_u_default() -> Self {
        Self {
            n_pipes: 1,
            inner_radius: 0.0131,
            outer_radius: 0.016,
            shank_spacing: 0.04,
            conductivity: 0.42,
            grout_conductivity: 1.5,
            roughness: 1e-6,
            burial_depth: 1.0,
        }
    }

    /// The number of pipe legs in the borehole cross-section.
    pub fn n_legs(&self) -> usize {
        2 * self.n_pipes
    }

    /// The smallest shank spacing that keeps neighbouring legs from
    /// overlapping, with `α = π / n_pipes`:
    /// `2 r_out (cos((π−α)/2) + sin((π−α)/2) / tan α)`.
    ///
    /// For a single U-pipe the expression degenerates (`tan π = 0`);
    /// its limit, `r_out`, is used instead.
    pub fn min_shank_spacing(&self) -> Float {
        if self.n_pipes == 1 {
            return self.outer_radius;
        }
        let alpha = PI / self.n_pipes as Float;
        let half = (PI - alpha) / 2.0;
        2.0 * self.outer_radius * (half.cos() + half.sin() / alpha.tan())
    }

    /// Checks the geometric bound on the pipe placement:
    /// `min_shank_spacing ≤ shank ≤ r_b − r_out`. Violation is a hard
    /// error, since such a field cannot be built.
    pub fn validate_shank_spacing(&self, borehole_radius: Float) -> Result<(), Error> {
        let min = self.min_shank_spacing();
        let max = borehole_radius - self.outer_radius;
        if self.shank_spacing < min || self.shank_spacing > max {
            return Err(Error::invalid(format!(
                "the shank spacing {} m must lie within [{:.4}, {:.4}] m for {} U-pipe(s) of outer radius {} m in a borehole of radius {} m",
                self.shank_spacing, min, max, self.n_pipes, self.outer_radius, borehole_radius
            )));
        }
        Ok(())
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_single_u_fits_a_standard_borehole() {
        let pipe = PipeData::single_u_default();
        assert!(pipe.validate_shank_spacing(0.075).is_ok());
        assert_eq!(pipe.n_legs(), 2);
    }

    #[test]
    fn shank_bounds_are_enforced() {
        let mut pipe = PipeData::single_u_default();

        // pipes poking out of the borehole
        pipe.shank_spacing = 0.07;
        let err = pipe.validate_shank_spacing(0.075).unwrap_err();
        assert_eq!(err.tag(), "invalid_input");

        // pipes overlapping in the centre
        pipe.shank_spacing = 0.01;
        assert!(pipe.validate_shank_spacing(0.075).is_err());
    }

    #[test]
    fn double_u_needs_more_room_than_single() {
        let single = PipeData::single_u_default();
        let mut double = single;
        double.n_pipes = 2;
        assert!(double.min_shank_spacing() > single.min_shank_spacing());
    }

    #[test]
    fn dimensions_are_validated() {
        assert!(PipeData::new(0, 0.013, 0.016, 0.04, 0.42, 1.5, 1e-6, 1.0).is_err());
        assert!(PipeData::new(1, 0.016, 0.013, 0.04, 0.42, 1.5, 1e-6, 1.0).is_err());
        assert!(PipeData::new(1, 0.013, 0.016, 0.04, 0.42, -1.5, 1e-6, 1.0).is_err());
    }
}

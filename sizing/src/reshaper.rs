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

use crate::{Borefield, Float};
use communication::{Error, GroundLoad};

/// How close the touched extreme must come to its limit before the
/// reshaper declares itself done, K.
pub const TEMPERATURE_TOLERANCE: Float = 0.05;

const MAX_ITERATIONS: usize = 60;

/// An hourly load split into what the field can absorb and a residual
/// for auxiliary equipment.
#[derive(Debug, Clone)]
pub struct ReshapedLoad {
    /// The clipped hourly extraction the field serves, kWh/h.
    pub extraction: Vec<Float>,

    /// The clipped hourly injection the field serves, kWh/h.
    pub injection: Vec<Float>,

    /// `original − clipped` on the extraction side.
    pub residual_extraction: Vec<Float>,

    /// `original − clipped` on the injection side.
    pub residual_injection: Vec<Float>,

    /// The extraction cap that was found, kW.
    pub cap_extraction: Float,

    /// The injection cap that was found, kW.
    pub cap_injection: Float,

    /// Evaluation rounds spent.
    pub iterations: usize,
}

fn clip(series: &[Float], cap: Float) -> Vec<Float> {
    series.iter().map(|v| v.min(cap)).collect()
}

fn residual(original: &[Float], clipped: &[Float]) -> Vec<Float> {
    original
        .iter()
        .zip(clipped)
        .map(|(o, c)| o - c)
        .collect()
}

struct CapSearch {
    cap: Float,
    peak: Float,
    /// Largest cap known to keep the band.
    feasible: Float,
    /// Smallest cap known to break it; the original peak until a
    /// violation is seen.
    infeasible: Option<Float>,
}

impl CapSearch {
    fn new(peak: Float) -> Self {
        Self {
            cap: peak,
            peak,
            feasible: 0.0,
            infeasible: None,
        }
    }

    /// One bisection step. `violation` is how far the fluid overshot
    /// the limit on this cap's side; negative values mean headroom.
    /// Returns whether the cap moved.
    fn step(&mut self, violation: Float) -> bool {
        if violation > TEMPERATURE_TOLERANCE {
            // too much: come down towards the feasible bracket
            self.infeasible = Some(self.cap);
            let next = (self.feasible + self.cap) / 2.0;
            let moved = (next - self.cap).abs() > 1e-9;
            self.cap = next;
            return moved;
        }

        self.feasible = self.feasible.max(self.cap);
        if self.cap >= self.peak {
            // the whole load fits
            return false;
        }
        if violation >= -TEMPERATURE_TOLERANCE {
            // touching the limit: done on this side
            return false;
        }
        // strict headroom: raise towards the known-infeasible cap, or
        // straight to the peak if none was seen yet
        let next = match self.infeasible {
            Some(hi) => ((self.cap + hi) / 2.0).min(self.peak),
            None => self.peak,
        };
        let moved = (next - self.cap).abs() > 1e-9;
        self.cap = next;
        moved
    }
}

impl Borefield {
    /// Finds hourly power caps such that the clipped load keeps the
    /// fluid inside the temperature band at borehole length `h`,
    /// touching but not crossing the binding limit.
    ///
    /// Each side is bisected on its cap: a violation pulls the cap
    /// towards the last feasible value, headroom pushes it back up
    /// towards the original peak. The residual (original minus
    /// clipped) is what auxiliary equipment must cover.
    pub fn reshape_hourly(&self, load: &dyn GroundLoad, h: Float) -> Result<ReshapedLoad, Error> {
        let extraction = load.hourly_extraction_load_simulation_period().ok_or_else(|| {
            Error::invalid("load reshaping needs hourly data")
        })?;
        let injection = load
            .hourly_injection_load_simulation_period()
            .ok_or_else(|| Error::invalid("load reshaping needs hourly data"))?;

        let peak_extraction = extraction.iter().fold(0.0, |a: Float, b| a.max(*b));
        let peak_injection = injection.iter().fold(0.0, |a: Float, b| a.max(*b));
        let limits = self.limits();

        let mut ext_search = CapSearch::new(peak_extraction);
        let mut inj_search = CapSearch::new(peak_injection);

        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > MAX_ITERATIONS {
                return Err(Error::NonConvergent {
                    iterations: MAX_ITERATIONS,
                });
            }
            self.cancel_flag().check()?;

            let clipped_extraction = clip(&extraction, ext_search.cap);
            let clipped_injection = clip(&injection, inj_search.cap);
            let temps =
                self.hourly_temperatures_from_series(&clipped_extraction, &clipped_injection, h)?;

            let coldest = temps.fluid.iter().fold(Float::INFINITY, |a, b| a.min(*b));
            let hottest = temps
                .fluid
                .iter()
                .fold(Float::NEG_INFINITY, |a, b| a.max(*b));

            let cold_violation = limits.min() - coldest;
            let hot_violation = hottest - limits.max();

            let ext_moved = ext_search.step(cold_violation);
            let inj_moved = inj_search.step(hot_violation);
            if !ext_moved && !inj_moved {
                return Ok(ReshapedLoad {
                    residual_extraction: residual(&extraction, &clipped_extraction),
                    residual_injection: residual(&injection, &clipped_injection),
                    extraction: clipped_extraction,
                    injection: clipped_injection,
                    cap_extraction: ext_search.cap,
                    cap_injection: inj_search.cap,
                    iterations,
                });
            }
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
    fn clipping_and_residuals() {
        let original = vec![1.0, 5.0, 3.0, 0.0];
        let clipped = clip(&original, 3.0);
        assert_eq!(clipped, vec![1.0, 3.0, 3.0, 0.0]);
        let rest = residual(&original, &clipped);
        assert_eq!(rest, vec![0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn cap_search_comes_down_on_violation_and_back_up_on_headroom() {
        let mut search = CapSearch::new(100.0);

        // violating by 2 K halves the cap
        assert!(search.step(2.0));
        assert!((search.cap - 50.0).abs() < 1e-9);

        // plenty of headroom: move back up towards 100
        assert!(search.step(-3.0));
        assert!((search.cap - 75.0).abs() < 1e-9);

        // touching the limit: stop
        assert!(!search.step(0.0));
        assert!((search.cap - 75.0).abs() < 1e-9);
    }

    #[test]
    fn unconstrained_load_keeps_its_peak() {
        let mut search = CapSearch::new(40.0);
        assert!(!search.step(-5.0));
        assert!((search.cap - 40.0).abs() < 1e-9);
    }
}

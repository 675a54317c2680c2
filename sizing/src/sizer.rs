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
use calendar::{two_pulse_time_axis, HOURS_PER_YEAR, MONTHS_PER_YEAR, SECONDS_PER_HOUR};
use communication::{Error, GroundLoad};
use loads::{first_year_params, last_year_params};

/// Convergence threshold of the outer fixed point, m.
pub const DEPTH_TOLERANCE: Float = 0.05;

/// Iteration budget of the outer fixed point.
pub const MAX_ITERATIONS: usize = 40;

/// Below this margin between a temperature limit and the undisturbed
/// ground, sizing is hopeless, K.
const MIN_TEMPERATURE_MARGIN: Float = 0.1;

/// The sizing method: increasing temporal resolution, increasing cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingMethod {
    /// Pulse formulas: last-year two-pulse for the last-year quadrants,
    /// first-year three-pulse for the first-year ones.
    L2,

    /// Monthly step superposition: the full monthly temperature
    /// profile, scaled to the limit.
    L3,

    /// Hourly convolution of the whole load history.
    L4,
}

impl std::str::FromStr for SizingMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_uppercase().as_str() {
            "L2" => Ok(SizingMethod::L2),
            "L3" => Ok(SizingMethod::L3),
            "L4" => Ok(SizingMethod::L4),
            other => Err(Error::invalid(format!(
                "unknown sizing method '{}' (expected L2, L3 or L4)",
                other
            ))),
        }
    }
}

/// The outcome of a sizing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingResult {
    /// Required borehole length, m.
    pub depth: Float,

    /// The binding quadrant, 1..=4.
    pub quadrant: u8,

    /// Outer fixed-point iterations spent on the binding quadrant.
    pub iterations: usize,
}

impl SizingResult {
    /// The total drilled length for `n` boreholes, m.
    pub fn total_length(&self, n: usize) -> Float {
        self.depth * n as Float
    }
}

fn is_extraction_quadrant(quadrant: u8) -> bool {
    quadrant == 1 || quadrant == 4
}

fn is_first_year_quadrant(quadrant: u8) -> bool {
    quadrant == 1 || quadrant == 3
}

fn initial_depth(h_init: Float) -> Float {
    if h_init < 1.0 {
        50.0
    } else {
        h_init
    }
}

impl Borefield {
    /// Finds the minimum borehole length that keeps the mean fluid
    /// temperature within the limits.
    ///
    /// The operating regime decides which quadrants are examined: a
    /// negative imbalance (extraction dominated) puts the field in
    /// quadrants 1 and 4, a positive one in 2 and 3; a perfectly
    /// balanced field is checked against all four. The required length
    /// is the maximum over the examined quadrants, and the binding one
    /// is recorded. Pass `quadrant` to size against one quadrant only.
    pub fn size(
        &self,
        load: &dyn GroundLoad,
        h_init: Float,
        method: SizingMethod,
        quadrant: Option<u8>,
    ) -> Result<SizingResult, Error> {
        let candidates: Vec<u8> = match quadrant {
            Some(q) if (1..=4).contains(&q) => vec![q],
            Some(q) => {
                return Err(Error::invalid(format!(
                    "there is no quadrant {}; quadrants are 1..=4",
                    q
                )))
            }
            None => {
                let imbalance = load.imbalance();
                if imbalance < 0.0 {
                    vec![1, 4]
                } else if imbalance > 0.0 {
                    vec![2, 3]
                } else {
                    vec![1, 2, 3, 4]
                }
            }
        };

        let mut best: Option<SizingResult> = None;
        for q in candidates {
            let (depth, iterations) = self.size_quadrant(load, h_init, q, method)?;
            let better = match &best {
                None => true,
                Some(b) => depth > b.depth,
            };
            if better {
                best = Some(SizingResult {
                    depth,
                    quadrant: q,
                    iterations,
                });
            }
        }

        // candidates is never empty, so best is set
        let best = best.unwrap();
        if best.depth <= 0.0 {
            return Err(Error::Infeasible(
                "no temperature limit constrains this load; there is nothing to size".to_string(),
            ));
        }
        log::info!(
            "sized to H = {:.2} m in quadrant {} ({} iterations)",
            best.depth,
            best.quadrant,
            best.iterations
        );
        Ok(best)
    }

    fn size_quadrant(
        &self,
        load: &dyn GroundLoad,
        h_init: Float,
        quadrant: u8,
        method: SizingMethod,
    ) -> Result<(Float, usize), Error> {
        match method {
            SizingMethod::L2 => self.size_quadrant_pulses(load, h_init, quadrant),
            SizingMethod::L3 => self.size_quadrant_profile(load, h_init, quadrant, false),
            SizingMethod::L4 => self.size_quadrant_profile(load, h_init, quadrant, true),
        }
    }

    fn limit_for(&self, quadrant: u8) -> Float {
        if is_extraction_quadrant(quadrant) {
            self.limits().min()
        } else {
            self.limits().max()
        }
    }

    fn margin(&self, quadrant: u8, h: Float) -> Result<Float, Error> {
        let t_limit = self.limit_for(quadrant);
        let tg = self.ground().temperature_at(h);
        let delta = t_limit - tg;
        if delta.abs() < MIN_TEMPERATURE_MARGIN {
            return Err(Error::Infeasible(format!(
                "the temperature limit {} °C coincides with the ground temperature {} °C",
                t_limit, tg
            )));
        }
        Ok(delta)
    }

    /// The pulse-formula sizing of one quadrant: Bernier's last-year
    /// two-pulse expression for quadrants 2 and 4, Carcel's first-year
    /// three-pulse expression for quadrants 1 and 3.
    fn size_quadrant_pulses(
        &self,
        load: &dyn GroundLoad,
        h_init: Float,
        quadrant: u8,
    ) -> Result<(Float, usize), Error> {
        let extraction = is_extraction_quadrant(quadrant);
        let n = self.n_boreholes() as Float;
        let ks = self.ground().conductivity;
        let c = 2.0 * PI * ks;

        let mut h = initial_depth(h_init);
        for iteration in 1..=MAX_ITERATIONS {
            self.cancel_flag().check()?;
            let rb = self.rb(h)?;
            let delta = self.margin(quadrant, h)?;

            let length = if is_first_year_quadrant(quadrant) {
                let p = first_year_params(load, extraction);
                let month = p.month_hours * SECONDS_PER_HOUR;
                let times = [
                    p.peak_duration,
                    p.peak_duration + month,
                    p.current_month_end + p.peak_duration,
                ];
                let g = self.g(&times, h)?;
                let r_prior = (g[2] - g[1]) / c;
                let r_month = (g[1] - g[0]) / c;
                let r_peak = g[0] / c;
                (p.peak * rb + p.peak * r_peak + p.month_average * r_month
                    + p.prior_average * r_prior)
                    / delta
            } else {
                let p = last_year_params(load, extraction);
                let month = p.month_hours * SECONDS_PER_HOUR;
                let times = two_pulse_time_axis(p.peak_duration, month, load.simulation_years());
                let g = self.g(&times, h)?;
                let r_yearly = (g[2] - g[1]) / c;
                let r_month = (g[1] - g[0]) / c;
                let r_peak = g[0] / c;
                (p.yearly_average * r_yearly + p.month_average * r_month
                    + p.peak * (r_peak + rb))
                    / delta
            };

            if !length.is_finite() {
                return Err(Error::Infeasible(format!(
                    "the required length in quadrant {} is not finite",
                    quadrant
                )));
            }
            if length <= 0.0 {
                // this quadrant imposes nothing
                return Ok((0.0, iteration));
            }
            let h_new = length / n;
            if (h_new - h).abs() < DEPTH_TOLERANCE {
                return Ok((h_new, iteration));
            }
            h = h_new;
        }
        Err(Error::NonConvergent {
            iterations: MAX_ITERATIONS,
        })
    }

    /// Profile-based sizing of one quadrant: evaluate the temperature
    /// evolution (monthly or hourly), look at the quadrant's year
    /// (first for 1/3, last for 2/4), and scale the length by how far
    /// the binding extreme overshoots the limit.
    fn size_quadrant_profile(
        &self,
        load: &dyn GroundLoad,
        h_init: Float,
        quadrant: u8,
        hourly: bool,
    ) -> Result<(Float, usize), Error> {
        let extraction = is_extraction_quadrant(quadrant);
        let first_year = is_first_year_quadrant(quadrant);

        let mut h = initial_depth(h_init);
        for iteration in 1..=MAX_ITERATIONS {
            self.cancel_flag().check()?;
            let delta = self.margin(quadrant, h)?;
            let tg = self.ground().temperature_at(h);

            let deviation = if hourly {
                let temps = self.evaluate_hourly(load, h)?;
                let len = temps.fluid.len();
                let window = if first_year {
                    &temps.fluid[..HOURS_PER_YEAR.min(len)]
                } else {
                    &temps.fluid[len - HOURS_PER_YEAR.min(len)..]
                };
                extreme_deviation(window, tg, extraction)
            } else {
                let temps = self.evaluate_monthly(load, h)?;
                let series = if extraction {
                    &temps.fluid_peak_extraction
                } else {
                    &temps.fluid_peak_injection
                };
                let len = series.len();
                let window = if first_year {
                    &series[..MONTHS_PER_YEAR.min(len)]
                } else {
                    &series[len - MONTHS_PER_YEAR.min(len)..]
                };
                extreme_deviation(window, tg, extraction)
            };

            if deviation <= 0.0 {
                // the fluid never leaves the ground temperature on this
                // side: the quadrant imposes nothing
                return Ok((0.0, iteration));
            }
            let h_new = (h * deviation / delta.abs()).max(1.0);
            if (h_new - h).abs() < DEPTH_TOLERANCE {
                return Ok((h_new, iteration));
            }
            h = h_new;
        }
        Err(Error::NonConvergent {
            iterations: MAX_ITERATIONS,
        })
    }
}

/// How far the fluid swings away from the ground temperature on the
/// binding side: `max(tg − T_f)` for extraction, `max(T_f − tg)` for
/// injection.
fn extreme_deviation(window: &[Float], tg: Float, extraction: bool) -> Float {
    window
        .iter()
        .map(|t| if extraction { tg - t } else { t - tg })
        .fold(Float::NEG_INFINITY, Float::max)
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parsing() {
        assert_eq!("l2".parse::<SizingMethod>().unwrap(), SizingMethod::L2);
        assert_eq!("L4".parse::<SizingMethod>().unwrap(), SizingMethod::L4);
        assert!("L9".parse::<SizingMethod>().is_err());
    }

    #[test]
    fn extreme_deviation_sides() {
        let window = [8.0, 12.0, 6.0];
        assert!((extreme_deviation(&window, 10.0, true) - 4.0).abs() < 1e-12);
        assert!((extreme_deviation(&window, 10.0, false) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn quadrant_roles() {
        assert!(is_extraction_quadrant(1));
        assert!(is_extraction_quadrant(4));
        assert!(!is_extraction_quadrant(2));
        assert!(is_first_year_quadrant(1));
        assert!(is_first_year_quadrant(3));
        assert!(!is_first_year_quadrant(2));
    }

    #[test]
    fn shallow_initial_guesses_are_clamped() {
        assert!((initial_depth(0.0) - 50.0).abs() < 1e-12);
        assert!((initial_depth(0.5) - 50.0).abs() < 1e-12);
        assert!((initial_depth(120.0) - 120.0).abs() < 1e-12);
    }
}

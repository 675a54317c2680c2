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

/// Cells per aggregation level, after Claesson & Javed.
const CELLS_PER_LEVEL: usize = 5;

/// Cell-width growth between consecutive levels.
const EXPANSION_RATE: Float = 2.0;

/// The aggregation time grid of Claesson & Javed: five cells per level,
/// each level's cell twice as wide as the previous level's, starting at
/// `dt` and running until `t_max` is covered.
///
/// The default tables are tabulated on
/// `claesson_javed_times(3600, 100 years)`, which keeps the grid dense
/// where the response curves sharply and sparse in the flat long-term
/// tail.
pub fn claesson_javed_times(dt: Float, t_max: Float) -> Vec<Float> {
    debug_assert!(dt > 0.0 && t_max > dt);
    let mut times = Vec::new();
    let mut t = 0.0;
    let mut width = dt;
    'levels: loop {
        for _ in 0..CELLS_PER_LEVEL {
            t += width;
            times.push(t);
            if t >= t_max {
                break 'levels;
            }
        }
        width *= EXPANSION_RATE;
    }
    times
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_HORIZON;

    #[test]
    fn grid_starts_at_dt_and_covers_the_horizon() {
        let times = claesson_javed_times(3600.0, MAX_HORIZON);
        assert!((times[0] - 3600.0).abs() < 1e-9);
        assert!(*times.last().unwrap() >= MAX_HORIZON);
        // strictly increasing
        for w in times.windows(2) {
            assert!(w[1] > w[0]);
        }
        // a hundred years in a few dozen points, not thousands
        assert!(times.len() < 150, "grid has {} points", times.len());
    }

    #[test]
    fn levels_double() {
        let times = claesson_javed_times(1.0, 1000.0);
        // level 0: 1,2,3,4,5. level 1 (width 2): 7,9,11,13,15
        assert_eq!(&times[..8], &[1.0, 2.0, 3.0, 4.0, 5.0, 7.0, 9.0, 11.0]);
    }
}

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

/// Multilinear interpolation on a regular grid of up to a handful of
/// dimensions.
///
/// Axes must be strictly increasing; values are stored flattened with
/// the last axis contiguous. Queries are clamped to the grid: the
/// bounds policy (what is clamped, what is an error) is the caller's
/// business.
/// Evaluation is a pure function of the stored table: equal queries
/// give bit-identical answers.
#[derive(Debug, Clone)]
pub struct Interpolator {
    axes: Vec<Vec<Float>>,
    values: Vec<Float>,
    strides: Vec<usize>,
}

impl Interpolator {
    /// Builds an interpolator from its axes and the flattened value
    /// grid (last axis contiguous, row-major).
    pub fn new(axes: Vec<Vec<Float>>, values: Vec<Float>) -> Result<Self, Error> {
        if axes.is_empty() {
            return Err(Error::invalid("an interpolator needs at least one axis"));
        }
        let mut expected = 1;
        for (d, axis) in axes.iter().enumerate() {
            if axis.is_empty() {
                return Err(Error::invalid(format!(
                    "interpolation axis {} is empty",
                    d
                )));
            }
            for w in axis.windows(2) {
                if w[1] <= w[0] {
                    return Err(Error::invalid(format!(
                        "interpolation axis {} must be strictly increasing",
                        d
                    )));
                }
            }
            expected *= axis.len();
        }
        if values.len() != expected {
            return Err(Error::invalid(format!(
                "the value grid holds {} entries but the axes imply {}",
                values.len(),
                expected
            )));
        }

        let mut strides = vec![1; axes.len()];
        for d in (0..axes.len() - 1).rev() {
            strides[d] = strides[d + 1] * axes[d + 1].len();
        }
        Ok(Self {
            axes,
            values,
            strides,
        })
    }

    /// The number of dimensions.
    pub fn dimensions(&self) -> usize {
        self.axes.len()
    }

    /// The axis of dimension `d`.
    pub fn axis(&self, d: usize) -> &[Float] {
        &self.axes[d]
    }

    /// Interpolates at `point` (one coordinate per axis), clamping each
    /// coordinate to its axis range.
    pub fn eval(&self, point: &[Float]) -> Float {
        debug_assert_eq!(point.len(), self.axes.len());

        // bracket and weight per axis
        let mut lower = Vec::with_capacity(self.axes.len());
        let mut weight = Vec::with_capacity(self.axes.len());
        for (axis, x) in self.axes.iter().zip(point) {
            if axis.len() == 1 {
                lower.push(0);
                weight.push(0.0);
                continue;
            }
            let last = axis.len() - 1;
            let i = if *x <= axis[0] {
                0
            } else if *x >= axis[last] {
                last - 1
            } else {
                axis.partition_point(|v| *v <= *x) - 1
            };
            let w = ((x - axis[i]) / (axis[i + 1] - axis[i])).clamp(0.0, 1.0);
            lower.push(i);
            weight.push(w);
        }

        // accumulate the 2^d corners
        let d = self.axes.len();
        let mut out = 0.0;
        for corner in 0..(1usize << d) {
            let mut w = 1.0;
            let mut index = 0;
            for dim in 0..d {
                let hi = (corner >> dim) & 1 == 1;
                if hi {
                    if self.axes[dim].len() == 1 {
                        w = 0.0;
                        break;
                    }
                    w *= weight[dim];
                    index += (lower[dim] + 1) * self.strides[dim];
                } else {
                    w *= 1.0 - weight[dim];
                    index += lower[dim] * self.strides[dim];
                }
            }
            if w != 0.0 {
                out += w * self.values[index];
            }
        }
        out
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

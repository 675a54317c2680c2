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

#![deny(missing_docs)]

//! Precomputed g-function tables and their interpolation.
//!
//! A g-function is the dimensionless response of the borehole-wall
//! temperature of a whole field to a unit step of heat input; computing
//! one is expensive, so they are tabulated offline and consumed here.
//! Callers reconstruct the physical temperature change as
//! `ΔT_b = Q / (2 π k_s H N) · g`.
//!
//! This crate loads the tables from a keyed store, wraps them in a
//! regular-grid multilinear interpolator, and caches the result
//! process-wide so concurrent scenarios sharing a dataset build it once.

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// The default tabulation time step: one hour, in seconds.
pub const DEFAULT_TIME_STEP: Float = 3600.;

/// The longest horizon any table covers: one hundred years, in seconds.
pub const MAX_HORIZON: Float = 100. * 8760. * 3600.;

/// The logarithmic-ish aggregation time grid.
pub mod timegrid;
pub use timegrid::claesson_javed_times;

/// Regular-grid multilinear interpolation.
pub mod interpolator;
pub use interpolator::Interpolator;

/// The in-memory tables and their JSON encodings.
pub mod dataset;
pub use dataset::GFunctionTable;

/// The keyed, process-wide cached store.
pub mod store;
pub use store::GFunctionStore;

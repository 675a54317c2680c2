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

//! The thermal-response engine and the sizing algorithms.
//!
//! [`Borefield`] ties a field geometry, the ground, a resistance model
//! and a g-function table together. On top of it sit the temperature
//! evaluator (temporal superposition of the load history), the three
//! depth sizers (two-pulse, monthly and hourly), the rectangular-field
//! enumerator and the hourly load reshaper.

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

#[cfg(feature = "float")]
pub(crate) const PI: Float = std::f32::consts::PI;

#[cfg(not(feature = "float"))]
pub(crate) const PI: Float = std::f64::consts::PI;

/// The central object: field + ground + resistance + g-function.
pub mod borefield;
pub use borefield::Borefield;

/// Temporal superposition: loads in, temperatures out.
pub mod evaluator;
pub use evaluator::{HourlyTemperatures, MonthlyTemperatures};

/// The depth sizers and the quadrant model.
pub mod sizer;
pub use sizer::{SizingMethod, SizingResult, DEPTH_TOLERANCE, MAX_ITERATIONS};

/// Search over rectangular field configurations.
pub mod enumerator;
pub use enumerator::{FieldCandidate, FieldConstraints, FieldEnumerator, Traversal};

/// Clipping an hourly load to what a field can absorb.
pub mod reshaper;
pub use reshaper::ReshapedLoad;

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

//! The inside of a single borehole: pipes, fluid, and the equivalent
//! resistance R_b between the circulating fluid and the borehole wall.
//!
//! R_b can be a user-supplied constant, or computed from the pipe and
//! fluid description: internal convection (laminar or Gnielinski
//! turbulent), conduction through the pipe wall, and a zeroth-order
//! multipole expression for the grout and pipe placement, corrected for
//! the thermal short-circuit between the up- and down-legs, which is
//! where the borehole length enters.

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

/// The working fluid and its flow.
pub mod fluid;
pub use fluid::FluidData;

/// Pipe geometry and materials.
pub mod pipe;
pub use pipe::PipeData;

/// The equivalent borehole resistance models.
pub mod resistance;
pub use resistance::ResistanceModel;

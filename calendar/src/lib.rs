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

//! Month-by-month time arithmetic for borefield simulations.
//!
//! Loads are given month by month (or hour by hour) and the simulation
//! horizon spans several years, so every other crate needs one shared
//! answer to "how long is month `m`" and "how many seconds have passed at
//! the end of month `k` of the simulation". This crate holds the two
//! months-per-year conventions and builds the time axes the sizing
//! methods work on.

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

/// Months in a year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Hours in a (non-leap) year.
pub const HOURS_PER_YEAR: usize = 8760;

/// Seconds in an hour.
pub const SECONDS_PER_HOUR: Float = 3600.;

/// The two months-per-year conventions and their hour tables.
pub mod months;
pub use months::{rotate_monthly, MonthsConvention};

/// The monthly, hourly and two-pulse time axes.
pub mod axes;
pub use axes::{
    hourly_time_axis, hours_per_month_simulation_period, monthly_time_axis, two_pulse_time_axis,
};

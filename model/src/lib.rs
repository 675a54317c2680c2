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

//! The borefield description a scenario carries: ground properties,
//! field geometry, temperature limits, simulation options and costs.
//! It also holds the persistence layer: the versioned scenario archive
//! and the hourly-load CSV importer.

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

/// Ground thermal properties and the undisturbed temperature model.
pub mod ground;
pub use ground::{Ground, GroundTemperature};

/// Rectangular and custom borefield geometries.
pub mod geometry;
pub use geometry::{BoreholeRecord, FieldGeometry};

/// Temperature limits, simulation options and the cost model.
pub mod options;
pub use options::{CostModel, SimulationOptions, TemperatureLimits};

/// The versioned scenario archive.
pub mod scenario;
pub use scenario::{Scenario, ScenarioArchive, ScenarioOptions, SizingOutcome};

/// Hourly-load CSV import.
pub mod csv;
pub use csv::{read_hourly_csv, CsvOptions, HourlyCsv, PowerUnit};

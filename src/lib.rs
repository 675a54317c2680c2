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

//! The main `ghetool` crate: sizing vertical closed-loop borehole
//! fields against building heating and cooling demands, and predicting
//! the fluid-loop temperature evolution over multi-year horizons.
//!
//! This crate combines the domain crates (loads, g-functions, borehole
//! resistance, the sizing engine) behind one roof, adds the scenario
//! runner and the sequential worker queue, and hosts the `ghetool` CLI
//! binary.

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

/// Builds the engine objects out of a scenario's options and sizes it.
pub mod runner;
pub use runner::{run_archive, run_scenario};

/// The host-side worker queue: one scenario at a time, results in
/// submission order.
pub mod queue;
pub use queue::{ScenarioQueue, ScenarioReport};

// Re-exports
pub use borehole::{FluidData, PipeData, ResistanceModel};
pub use calendar::MonthsConvention;
pub use communication::{CancelFlag, Error, GroundLoad};
pub use gfunction::{claesson_javed_times, GFunctionStore, GFunctionTable};
pub use loads::{
    Cluster, Dhw, Efficiency, HourlyBuildingLoads, HourlyGroundLoads, HourlyGroundLoadsMultiYear,
    MonthlyBuildingLoads, MonthlyGroundLoads, MonthlyGroundLoadsMultiYear,
};
pub use model::{
    read_hourly_csv, BoreholeRecord, CostModel, CsvOptions, FieldGeometry, Ground, HourlyCsv,
    PowerUnit, Scenario, ScenarioArchive, ScenarioOptions, SimulationOptions, SizingOutcome,
    TemperatureLimits,
};
pub use sizing::{
    Borefield, FieldCandidate, FieldConstraints, FieldEnumerator, HourlyTemperatures,
    MonthlyTemperatures, ReshapedLoad, SizingMethod, SizingResult, Traversal,
};

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

use borehole::{FluidData, PipeData, ResistanceModel};
use calendar::MonthsConvention;
use communication::{CancelFlag, Error};
use gfunction::GFunctionStore;
use loads::MonthlyGroundLoads;
use model::{
    FieldGeometry, Ground, Scenario, ScenarioArchive, ScenarioOptions, SimulationOptions,
    SizingOutcome, TemperatureLimits,
};
use sizing::{Borefield, SizingMethod};

use crate::queue::{ScenarioQueue, ScenarioReport};

fn months_convention(options: &ScenarioOptions, scenario: &str) -> MonthsConvention {
    match options.months_convention.as_str() {
        "equal" => MonthsConvention::Equal,
        "calendar" => MonthsConvention::Calendar,
        other => {
            log::warn!(
                "scenario '{}': unknown months convention '{}'; using equal months",
                scenario,
                other
            );
            MonthsConvention::Equal
        }
    }
}

fn resistance_model(options: &ScenarioOptions) -> Result<ResistanceModel, Error> {
    match options.rb_mode.as_str() {
        "constant" => ResistanceModel::constant(options.rb),
        mode @ ("dynamic" | "frozen") => {
            let pipe = PipeData::new(
                options.n_pipes,
                options.r_in,
                options.r_out,
                options.shank_spacing,
                options.k_pipe,
                options.k_grout,
                options.roughness,
                options.burial_depth,
            )?;
            let fluid = FluidData::new(
                options.fluid_density,
                options.fluid_specific_heat,
                options.fluid_viscosity,
                options.fluid_conductivity,
                options.mass_flow_rate,
            )?;
            if mode == "dynamic" {
                ResistanceModel::dynamic(
                    pipe,
                    fluid,
                    options.borehole_radius,
                    options.conductivity,
                )
            } else {
                ResistanceModel::frozen(
                    pipe,
                    fluid,
                    options.borehole_radius,
                    options.conductivity,
                    options.h_init,
                )
            }
        }
        other => Err(Error::invalid(format!(
            "unknown resistance mode '{}' (expected constant, dynamic or frozen)",
            other
        ))),
    }
}

/// Builds the engine objects described by a scenario's options, runs
/// the selected sizing method, and reports the outcome.
pub fn run_scenario(
    scenario: &Scenario,
    store: &GFunctionStore,
    cancel: CancelFlag,
) -> Result<SizingOutcome, Error> {
    let options = &scenario.options;

    let simulation = SimulationOptions {
        simulation_years: options.simulation_years,
        months_convention: months_convention(options, &scenario.name),
        start_month: options.start_month,
        h_init: options.h_init,
        h_max: options.h_max,
    };
    simulation.validate()?;

    let ground = if options.use_gradient {
        Ground::with_gradient(
            options.conductivity,
            options.volumetric_heat_capacity,
            options.surface_temperature,
            options.gradient,
        )?
    } else {
        Ground::constant_temperature(
            options.conductivity,
            options.volumetric_heat_capacity,
            options.ground_temperature,
        )?
    };
    let geometry = FieldGeometry::rectangular(options.n_1, options.n_2, options.spacing)?;
    let limits = TemperatureLimits::new(options.t_min, options.t_max)?;
    let resistance = resistance_model(options)?;

    let dataset = if options.dataset.is_empty() {
        // rectangular geometries always have a library key
        geometry.library_key().unwrap()
    } else {
        options.dataset.clone()
    };
    let table = store.get(&dataset)?;

    let mut field = Borefield::new(
        ground,
        &geometry,
        resistance,
        limits,
        table,
        simulation.h_max,
    )?;
    field.set_cancel_flag(cancel);

    let mut load = MonthlyGroundLoads::new(
        options.baseload_extraction,
        options.baseload_injection,
        options.peak_extraction,
        options.peak_injection,
    )?;
    load.set_simulation_years(simulation.simulation_years)?;
    load.set_start_month(simulation.start_month)?;
    load.set_months_convention(simulation.months_convention);
    load.set_peak_duration_extraction(options.peak_duration_extraction)?;
    load.set_peak_duration_injection(options.peak_duration_injection)?;

    let method: SizingMethod = options.sizing_method.parse()?;
    let result = field.size(&load, simulation.h_init, method, None)?;
    if result.depth > options.h_max {
        return Err(Error::Infeasible(format!(
            "the required length {:.1} m exceeds the allowed maximum of {:.1} m",
            result.depth, options.h_max
        )));
    }

    Ok(SizingOutcome {
        depth: result.depth,
        limiting_quadrant: result.quadrant,
        iterations: result.iterations,
        total_length: result.total_length(geometry.n_boreholes()),
    })
}

/// Runs every scenario of an archive through the worker queue, in
/// order, and writes the outcomes back: a successful sizing stores its
/// result, a failed one is marked "not calculated" with its message.
pub fn run_archive(archive: &mut ScenarioArchive, store: &GFunctionStore) -> Vec<ScenarioReport> {
    let mut queue = ScenarioQueue::new(store.clone());
    for scenario in &archive.scenarios {
        queue.submit(scenario.clone());
    }
    let reports = queue.finish();

    for (scenario, report) in archive.scenarios.iter_mut().zip(&reports) {
        debug_assert_eq!(scenario.name, report.name);
        match &report.outcome {
            Ok(outcome) => {
                scenario.outcome = Some(*outcome);
                scenario.error = None;
            }
            Err(e) => {
                scenario.outcome = None;
                scenario.error = Some(format!("{}: {}", e.tag(), e));
            }
        }
    }
    reports
}

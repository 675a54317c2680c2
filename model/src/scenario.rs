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
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;

/// The archive version written by this build.
pub const CURRENT_VERSION: &str = "2";

/// The one older version the loader still accepts. Version 1 stored
/// each scenario as its bare option map, without the `options` wrapper
/// and without a computed-borefield block.
pub const PREVIOUS_VERSION: &str = "1";

/// The result of a sizing run, stored with its scenario so a reloaded
/// archive can be checked against a re-run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SizingOutcome {
    /// Required borehole length, m.
    pub depth: Float,

    /// The quadrant that was binding, 1..=4.
    pub limiting_quadrant: u8,

    /// Outer fixed-point iterations spent.
    pub iterations: usize,

    /// Total drilled length, m.
    pub total_length: Float,
}

/// One flat option set, every field covered by a documented default.
///
/// Unknown keys in an archive are ignored; a key that is present but
/// unconvertible falls back to its default with a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOptions {
    /// Ground conductivity k_s, W/(m·K).
    pub conductivity: Float,
    /// Volumetric heat capacity, J/(m³·K).
    pub volumetric_heat_capacity: Float,
    /// Undisturbed ground temperature, °C (constant model).
    pub ground_temperature: Float,
    /// Use the gradient model instead of the constant one.
    pub use_gradient: bool,
    /// Surface temperature, °C (gradient model).
    pub surface_temperature: Float,
    /// Geothermal gradient, K per 100 m (gradient model).
    pub gradient: Float,

    /// Boreholes along the first side.
    pub n_1: usize,
    /// Boreholes along the second side.
    pub n_2: usize,
    /// Borehole spacing, m.
    pub spacing: Float,
    /// Borehole radius, m.
    pub borehole_radius: Float,
    /// Burial depth of the borehole heads, m.
    pub burial_depth: Float,

    /// Minimum mean fluid temperature, °C.
    pub t_min: Float,
    /// Maximum mean fluid temperature, °C.
    pub t_max: Float,

    /// Simulation horizon, years.
    pub simulation_years: usize,
    /// `"equal"` or `"calendar"`.
    pub months_convention: String,
    /// First simulated month, 1..=12.
    pub start_month: usize,
    /// Initial borehole length guess, m.
    pub h_init: Float,
    /// Deepest acceptable borehole, m.
    pub h_max: Float,

    /// `"constant"`, `"dynamic"` or `"frozen"`.
    pub rb_mode: String,
    /// Constant borehole resistance, m·K/W.
    pub rb: Float,
    /// U-pipes per borehole.
    pub n_pipes: usize,
    /// Inner pipe radius, m.
    pub r_in: Float,
    /// Outer pipe radius, m.
    pub r_out: Float,
    /// Shank spacing, m.
    pub shank_spacing: Float,
    /// Pipe conductivity, W/(m·K).
    pub k_pipe: Float,
    /// Grout conductivity, W/(m·K).
    pub k_grout: Float,
    /// Pipe roughness, m.
    pub roughness: Float,
    /// Fluid density, kg/m³.
    pub fluid_density: Float,
    /// Fluid specific heat, J/(kg·K).
    pub fluid_specific_heat: Float,
    /// Fluid viscosity, Pa·s.
    pub fluid_viscosity: Float,
    /// Fluid conductivity, W/(m·K).
    pub fluid_conductivity: Float,
    /// Mass flow per borehole, kg/s.
    pub mass_flow_rate: Float,

    /// Monthly extraction baseload, kWh, January first.
    pub baseload_extraction: [Float; 12],
    /// Monthly injection baseload, kWh.
    pub baseload_injection: [Float; 12],
    /// Monthly extraction peaks, kW.
    pub peak_extraction: [Float; 12],
    /// Monthly injection peaks, kW.
    pub peak_injection: [Float; 12],
    /// Extraction peak duration, s.
    pub peak_duration_extraction: Float,
    /// Injection peak duration, s.
    pub peak_duration_injection: Float,

    /// `"L2"`, `"L3"` or `"L4"`.
    pub sizing_method: String,
    /// G-function dataset name; empty means "derive from the
    /// rectangular configuration".
    pub dataset: String,
}

impl Default for ScenarioOptions {
    fn default() -> Self {
        Self {
            conductivity: 2.0,
            volumetric_heat_capacity: 2.4e6,
            ground_temperature: 10.0,
            use_gradient: false,
            surface_temperature: 10.0,
            gradient: 2.0,
            n_1: 10,
            n_2: 10,
            spacing: 6.0,
            borehole_radius: 0.075,
            burial_depth: 1.0,
            t_min: 0.0,
            t_max: 16.0,
            simulation_years: 20,
            months_convention: "equal".to_string(),
            start_month: 1,
            h_init: 100.0,
            h_max: 350.0,
            rb_mode: "constant".to_string(),
            rb: 0.12,
            n_pipes: 1,
            r_in: 0.0131,
            r_out: 0.016,
            shank_spacing: 0.04,
            k_pipe: 0.42,
            k_grout: 1.5,
            roughness: 1e-6,
            fluid_density: 999.1,
            fluid_specific_heat: 4183.0,
            fluid_viscosity: 1.14e-3,
            fluid_conductivity: 0.589,
            mass_flow_rate: 0.25,
            baseload_extraction: [0.0; 12],
            baseload_injection: [0.0; 12],
            peak_extraction: [0.0; 12],
            peak_injection: [0.0; 12],
            peak_duration_extraction: 6.0 * 3600.0,
            peak_duration_injection: 6.0 * 3600.0,
            sizing_method: "L2".to_string(),
            dataset: String::new(),
        }
    }
}

fn warn_bad(scenario: &str, key: &str) {
    log::warn!(
        "scenario '{}': option '{}' could not be converted; using its default",
        scenario,
        key
    );
}

fn get_number(map: &Map<String, Value>, scenario: &str, key: &str, default: Float) -> Float {
    match map.get(key) {
        None => default,
        Some(v) => match v.as_f64() {
            Some(f) => f as Float,
            None => {
                warn_bad(scenario, key);
                default
            }
        },
    }
}

fn get_usize(map: &Map<String, Value>, scenario: &str, key: &str, default: usize) -> usize {
    match map.get(key) {
        None => default,
        Some(v) => match v.as_u64() {
            Some(u) => u as usize,
            None => {
                warn_bad(scenario, key);
                default
            }
        },
    }
}

fn get_bool(map: &Map<String, Value>, scenario: &str, key: &str, default: bool) -> bool {
    match map.get(key) {
        None => default,
        Some(v) => match v.as_bool() {
            Some(b) => b,
            None => {
                warn_bad(scenario, key);
                default
            }
        },
    }
}

fn get_string(map: &Map<String, Value>, scenario: &str, key: &str, default: &str) -> String {
    match map.get(key) {
        None => default.to_string(),
        Some(v) => match v.as_str() {
            Some(s) => s.to_string(),
            None => {
                warn_bad(scenario, key);
                default.to_string()
            }
        },
    }
}

fn get_array12(
    map: &Map<String, Value>,
    scenario: &str,
    key: &str,
    default: [Float; 12],
) -> [Float; 12] {
    let arr = match map.get(key) {
        None => return default,
        Some(Value::Array(a)) if a.len() == 12 => a,
        Some(_) => {
            warn_bad(scenario, key);
            return default;
        }
    };
    let mut out = [0.0; 12];
    for (o, v) in out.iter_mut().zip(arr) {
        match v.as_f64() {
            Some(f) => *o = f as Float,
            None => {
                warn_bad(scenario, key);
                return default;
            }
        }
    }
    out
}

macro_rules! number_keys {
    ($($key:ident),* $(,)?) => {
        [$(stringify!($key)),*]
    };
}

impl ScenarioOptions {
    /// Reads an option set from a flat key→value map. Missing keys use
    /// the defaults; present-but-broken keys use the defaults with a
    /// warning; unknown keys are ignored.
    pub fn from_map(scenario: &str, map: &Map<String, Value>) -> Self {
        let d = Self::default();
        Self {
            conductivity: get_number(map, scenario, "conductivity", d.conductivity),
            volumetric_heat_capacity: get_number(
                map,
                scenario,
                "volumetric_heat_capacity",
                d.volumetric_heat_capacity,
            ),
            ground_temperature: get_number(map, scenario, "ground_temperature", d.ground_temperature),
            use_gradient: get_bool(map, scenario, "use_gradient", d.use_gradient),
            surface_temperature: get_number(
                map,
                scenario,
                "surface_temperature",
                d.surface_temperature,
            ),
            gradient: get_number(map, scenario, "gradient", d.gradient),
            n_1: get_usize(map, scenario, "n_1", d.n_1),
            n_2: get_usize(map, scenario, "n_2", d.n_2),
            spacing: get_number(map, scenario, "spacing", d.spacing),
            borehole_radius: get_number(map, scenario, "borehole_radius", d.borehole_radius),
            burial_depth: get_number(map, scenario, "burial_depth", d.burial_depth),
            t_min: get_number(map, scenario, "t_min", d.t_min),
            t_max: get_number(map, scenario, "t_max", d.t_max),
            simulation_years: get_usize(map, scenario, "simulation_years", d.simulation_years),
            months_convention: get_string(
                map,
                scenario,
                "months_convention",
                &d.months_convention,
            ),
            start_month: get_usize(map, scenario, "start_month", d.start_month),
            h_init: get_number(map, scenario, "h_init", d.h_init),
            h_max: get_number(map, scenario, "h_max", d.h_max),
            rb_mode: get_string(map, scenario, "rb_mode", &d.rb_mode),
            rb: get_number(map, scenario, "rb", d.rb),
            n_pipes: get_usize(map, scenario, "n_pipes", d.n_pipes),
            r_in: get_number(map, scenario, "r_in", d.r_in),
            r_out: get_number(map, scenario, "r_out", d.r_out),
            shank_spacing: get_number(map, scenario, "shank_spacing", d.shank_spacing),
            k_pipe: get_number(map, scenario, "k_pipe", d.k_pipe),
            k_grout: get_number(map, scenario, "k_grout", d.k_grout),
            roughness: get_number(map, scenario, "roughness", d.roughness),
            fluid_density: get_number(map, scenario, "fluid_density", d.fluid_density),
            fluid_specific_heat: get_number(
                map,
                scenario,
                "fluid_specific_heat",
                d.fluid_specific_heat,
            ),
            fluid_viscosity: get_number(map, scenario, "fluid_viscosity", d.fluid_viscosity),
            fluid_conductivity: get_number(map, scenario, "fluid_conductivity", d.fluid_conductivity),
            mass_flow_rate: get_number(map, scenario, "mass_flow_rate", d.mass_flow_rate),
            baseload_extraction: get_array12(
                map,
                scenario,
                "baseload_extraction",
                d.baseload_extraction,
            ),
            baseload_injection: get_array12(
                map,
                scenario,
                "baseload_injection",
                d.baseload_injection,
            ),
            peak_extraction: get_array12(map, scenario, "peak_extraction", d.peak_extraction),
            peak_injection: get_array12(map, scenario, "peak_injection", d.peak_injection),
            peak_duration_extraction: get_number(
                map,
                scenario,
                "peak_duration_extraction",
                d.peak_duration_extraction,
            ),
            peak_duration_injection: get_number(
                map,
                scenario,
                "peak_duration_injection",
                d.peak_duration_injection,
            ),
            sizing_method: get_string(map, scenario, "sizing_method", &d.sizing_method),
            dataset: get_string(map, scenario, "dataset", &d.dataset),
        }
    }

    /// Writes the option set back to a flat map.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        let mut num = |k: &str, v: Float| {
            map.insert(k.to_string(), json!(v));
        };
        num("conductivity", self.conductivity);
        num("volumetric_heat_capacity", self.volumetric_heat_capacity);
        num("ground_temperature", self.ground_temperature);
        num("surface_temperature", self.surface_temperature);
        num("gradient", self.gradient);
        num("spacing", self.spacing);
        num("borehole_radius", self.borehole_radius);
        num("burial_depth", self.burial_depth);
        num("t_min", self.t_min);
        num("t_max", self.t_max);
        num("h_init", self.h_init);
        num("h_max", self.h_max);
        num("rb", self.rb);
        num("r_in", self.r_in);
        num("r_out", self.r_out);
        num("shank_spacing", self.shank_spacing);
        num("k_pipe", self.k_pipe);
        num("k_grout", self.k_grout);
        num("roughness", self.roughness);
        num("fluid_density", self.fluid_density);
        num("fluid_specific_heat", self.fluid_specific_heat);
        num("fluid_viscosity", self.fluid_viscosity);
        num("fluid_conductivity", self.fluid_conductivity);
        num("mass_flow_rate", self.mass_flow_rate);
        num("peak_duration_extraction", self.peak_duration_extraction);
        num("peak_duration_injection", self.peak_duration_injection);

        map.insert("use_gradient".to_string(), json!(self.use_gradient));
        map.insert("n_1".to_string(), json!(self.n_1));
        map.insert("n_2".to_string(), json!(self.n_2));
        map.insert(
            "simulation_years".to_string(),
            json!(self.simulation_years),
        );
        map.insert(
            "months_convention".to_string(),
            json!(self.months_convention),
        );
        map.insert("start_month".to_string(), json!(self.start_month));
        map.insert("rb_mode".to_string(), json!(self.rb_mode));
        map.insert("n_pipes".to_string(), json!(self.n_pipes));
        map.insert(
            "baseload_extraction".to_string(),
            json!(self.baseload_extraction.to_vec()),
        );
        map.insert(
            "baseload_injection".to_string(),
            json!(self.baseload_injection.to_vec()),
        );
        map.insert(
            "peak_extraction".to_string(),
            json!(self.peak_extraction.to_vec()),
        );
        map.insert(
            "peak_injection".to_string(),
            json!(self.peak_injection.to_vec()),
        );
        map.insert("sizing_method".to_string(), json!(self.sizing_method));
        map.insert("dataset".to_string(), json!(self.dataset));
        map
    }

    /// The numeric scalar keys of the option set. Exposed for shells
    /// that edit scenarios generically.
    pub fn number_keys() -> &'static [&'static str] {
        &number_keys![
            conductivity,
            volumetric_heat_capacity,
            ground_temperature,
            surface_temperature,
            gradient,
            spacing,
            borehole_radius,
            burial_depth,
            t_min,
            t_max,
            h_init,
            h_max,
            rb,
            r_in,
            r_out,
            shank_spacing,
            k_pipe,
            k_grout,
            roughness,
            fluid_density,
            fluid_specific_heat,
            fluid_viscosity,
            fluid_conductivity,
            mass_flow_rate,
            peak_duration_extraction,
            peak_duration_injection,
        ]
    }
}

/// One named scenario of an archive.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// The scenario name, unique within its archive.
    pub name: String,

    /// The option set.
    pub options: ScenarioOptions,

    /// The stored sizing result, if the scenario has been calculated.
    pub outcome: Option<SizingOutcome>,

    /// The last sizing error, if the scenario failed to calculate.
    pub error: Option<String>,
}

impl Scenario {
    /// A fresh scenario with default options.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            options: ScenarioOptions::default(),
            outcome: None,
            error: None,
        }
    }
}

/// An ordered collection of scenarios with save/load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioArchive {
    /// The name this archive was last saved under.
    pub filename: String,

    /// The scenarios, in user order.
    pub scenarios: Vec<Scenario>,
}

impl ScenarioArchive {
    /// Parses an archive from its JSON (or JSON5) text.
    pub fn from_str(text: &str) -> Result<Self, Error> {
        let value: Value = match serde_json::from_str(text) {
            Ok(v) => v,
            // fall back to the lenient encoding
            Err(_) => json5::from_str(text)
                .map_err(|e| Error::Io(format!("the archive is unreadable: {}", e)))?,
        };
        Self::from_value(&value)
    }

    fn from_value(value: &Value) -> Result<Self, Error> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::Io("the archive is not a JSON object".to_string()))?;
        let version = obj
            .get("version")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        if version != CURRENT_VERSION && version != PREVIOUS_VERSION {
            return Err(Error::invalid(format!(
                "unknown archive version '{}' (this build reads {} and {})",
                version, CURRENT_VERSION, PREVIOUS_VERSION
            )));
        }

        let filename = obj
            .get("filename")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let names: Vec<String> = obj
            .get("scenario_names")
            .and_then(|v| v.as_array())
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        let empty = Map::new();
        let entries = obj
            .get("scenarios")
            .and_then(|v| v.as_object())
            .unwrap_or(&empty);

        let mut scenarios = Vec::with_capacity(names.len());
        for name in names {
            let entry = entries.get(&name).and_then(|v| v.as_object());
            let scenario = match (version, entry) {
                (_, None) => Scenario::new(name),
                (PREVIOUS_VERSION, Some(flat)) => Scenario {
                    options: ScenarioOptions::from_map(&name, flat),
                    name,
                    outcome: None,
                    error: None,
                },
                (_, Some(wrapped)) => {
                    let options = wrapped
                        .get("options")
                        .and_then(|v| v.as_object())
                        .map(|m| ScenarioOptions::from_map(&name, m))
                        .unwrap_or_default();
                    let outcome = wrapped
                        .get("borefield")
                        .and_then(|v| serde_json::from_value(v.clone()).ok());
                    let error = wrapped
                        .get("error")
                        .and_then(|v| v.as_str())
                        .map(|s| s.to_string());
                    Scenario {
                        name,
                        options,
                        outcome,
                        error,
                    }
                }
            };
            scenarios.push(scenario);
        }

        Ok(Self {
            filename,
            scenarios,
        })
    }

    /// Serialises the archive at the current version.
    pub fn to_value(&self) -> Value {
        let names: Vec<&str> = self.scenarios.iter().map(|s| s.name.as_str()).collect();
        let mut entries = Map::new();
        for s in &self.scenarios {
            let mut wrapped = Map::new();
            wrapped.insert("options".to_string(), Value::Object(s.options.to_map()));
            if let Some(outcome) = &s.outcome {
                // a Copy struct of plain numbers always serialises
                if let Ok(v) = serde_json::to_value(outcome) {
                    wrapped.insert("borefield".to_string(), v);
                }
            }
            if let Some(error) = &s.error {
                wrapped.insert("error".to_string(), json!(error));
            }
            entries.insert(s.name.clone(), Value::Object(wrapped));
        }
        json!({
            "version": CURRENT_VERSION,
            "filename": self.filename,
            "scenario_names": names,
            "scenarios": entries,
        })
    }

    /// Loads an archive from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::Io(format!("file not found: {}", path.display())));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("could not read '{}': {}", path.display(), e)))?;
        let mut archive = Self::from_str(&text)?;
        if archive.filename.is_empty() {
            archive.filename = path.display().to_string();
        }
        Ok(archive)
    }

    /// Saves the archive to disk at the current version.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(&self.to_value())
            .map_err(|e| Error::Io(format!("could not serialise the archive: {}", e)))?;
        std::fs::write(path, text)
            .map_err(|e| Error::Io(format!("could not write '{}': {}", path.display(), e)))?;
        Ok(())
    }

    /// The scenario of the given name, if any.
    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip() {
        let mut archive = ScenarioArchive::default();
        archive.filename = "demo.json".to_string();
        let mut s = Scenario::new("office");
        s.options.n_1 = 12;
        s.options.t_max = 17.5;
        s.outcome = Some(SizingOutcome {
            depth: 92.4,
            limiting_quadrant: 2,
            iterations: 5,
            total_length: 9240.0,
        });
        archive.scenarios.push(s);
        archive.scenarios.push(Scenario::new("school"));

        let text = serde_json::to_string(&archive.to_value()).unwrap();
        let back = ScenarioArchive::from_str(&text).unwrap();
        assert_eq!(back, archive);
        // order survives
        assert_eq!(back.scenarios[0].name, "office");
        assert_eq!(back.scenarios[1].name, "school");
    }

    #[test]
    fn unknown_keys_are_ignored_and_missing_keys_default() {
        let text = r#"{
            "version": "2",
            "filename": "x",
            "scenario_names": ["a"],
            "scenarios": {
                "a": { "options": { "n_1": 7, "mystery_knob": 3 } }
            }
        }"#;
        let archive = ScenarioArchive::from_str(text).unwrap();
        let s = archive.get("a").unwrap();
        assert_eq!(s.options.n_1, 7);
        // everything else at its default
        assert_eq!(s.options.n_2, 10);
        assert!((s.options.t_max - 16.0).abs() < 1e-12);
    }

    #[test]
    fn broken_values_fall_back_to_defaults() {
        let text = r#"{
            "version": "2",
            "scenario_names": ["a"],
            "scenarios": {
                "a": { "options": { "spacing": "six metres", "n_2": 8 } }
            }
        }"#;
        let archive = ScenarioArchive::from_str(text).unwrap();
        let s = archive.get("a").unwrap();
        assert!((s.options.spacing - 6.0).abs() < 1e-12);
        assert_eq!(s.options.n_2, 8);
    }

    #[test]
    fn previous_version_is_accepted() {
        let text = r#"{
            "version": "1",
            "scenario_names": ["legacy"],
            "scenarios": {
                "legacy": { "n_1": 4, "n_2": 5, "spacing": 7.0 }
            }
        }"#;
        let archive = ScenarioArchive::from_str(text).unwrap();
        let s = archive.get("legacy").unwrap();
        assert_eq!(s.options.n_1, 4);
        assert_eq!(s.options.n_2, 5);
        assert!(s.outcome.is_none());
    }

    #[test]
    fn unknown_version_is_an_error() {
        let text = r#"{ "version": "99", "scenario_names": [], "scenarios": {} }"#;
        let err = ScenarioArchive::from_str(text).unwrap_err();
        assert_eq!(err.tag(), "invalid_input");
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ScenarioArchive::load("/does/not/exist.json").unwrap_err();
        assert_eq!(err.tag(), "io_error");
    }

    #[test]
    fn json5_input_is_accepted() {
        let text = r#"{
            version: "2",
            scenario_names: ["a"],
            scenarios: { a: { options: { n_1: 3 } } },
        }"#;
        let archive = ScenarioArchive::from_str(text).unwrap();
        assert_eq!(archive.get("a").unwrap().options.n_1, 3);
    }
}

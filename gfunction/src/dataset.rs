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

use crate::{Float, Interpolator, MAX_HORIZON};
use communication::{BoundKind, Error};
use serde_json::{Map, Value};

/// A g-function table ready for querying.
///
/// Library entries are tabulated over (spacing, ground conductivity,
/// depth, time) for one field configuration. Custom entries, computed
/// offline for a user-supplied borehole list at one spacing and
/// conductivity, are tabulated only over (depth, time).
#[derive(Debug, Clone)]
pub struct GFunctionTable {
    name: String,
    time: Vec<Float>,
    kind: TableKind,
}

#[derive(Debug, Clone)]
enum TableKind {
    Library {
        depths: Vec<Float>,
        interp: Interpolator,
    },
    Custom {
        depths: Vec<Float>,
        interp: Interpolator,
    },
}

fn close(a: Float, b: Float) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn parse_float_array(name: &str, value: &Value) -> Result<Vec<Float>, Error> {
    let arr = value
        .as_array()
        .ok_or_else(|| Error::invalid(format!("'{}' must be an array of numbers", name)))?;
    let mut out = Vec::with_capacity(arr.len());
    for v in arr {
        let f = v
            .as_f64()
            .ok_or_else(|| Error::invalid(format!("'{}' holds a non-numeric entry", name)))?;
        out.push(f as Float);
    }
    Ok(out)
}

/// The entries of a JSON object whose keys are numbers, sorted by the
/// parsed value.
fn numeric_entries<'a>(map: &'a Map<String, Value>) -> Result<Vec<(Float, &'a Value)>, Error> {
    let mut out = Vec::with_capacity(map.len());
    for (k, v) in map {
        if k == "Time" {
            continue;
        }
        let parsed: f64 = k
            .parse()
            .map_err(|_| Error::invalid(format!("'{}' is not a numeric dataset key", k)))?;
        out.push((parsed as Float, v));
    }
    out.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    if out.is_empty() {
        return Err(Error::invalid("the dataset holds no data entries"));
    }
    Ok(out)
}

impl GFunctionTable {
    /// Parses a table from its JSON document.
    ///
    /// Two shapes are accepted: a library entry
    /// `{"Time": [...], "<B>": {"<k_s>": {"<H>": [...]}}}` and a custom
    /// entry `{"Time": [...], "Data": {"<H>": [...]}}`.
    pub fn from_json_value(name: &str, value: &Value) -> Result<Self, Error> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::invalid(format!("dataset '{}' is not a JSON object", name)))?;
        let time = parse_float_array(
            "Time",
            obj.get("Time")
                .ok_or_else(|| Error::invalid(format!("dataset '{}' has no 'Time' grid", name)))?,
        )?;

        if let Some(data) = obj.get("Data") {
            Self::custom_from_json(name, time, data)
        } else {
            Self::library_from_json(name, time, obj)
        }
    }

    fn custom_from_json(name: &str, time: Vec<Float>, data: &Value) -> Result<Self, Error> {
        let map = data
            .as_object()
            .ok_or_else(|| Error::invalid(format!("dataset '{}': 'Data' must be an object", name)))?;
        let mut depths = Vec::new();
        let mut values = Vec::new();
        for (h, g) in numeric_entries(map)? {
            let g = parse_float_array("Data", g)?;
            if g.len() != time.len() {
                return Err(Error::invalid(format!(
                    "dataset '{}': the response at H = {} has {} entries but the time grid has {}",
                    name,
                    h,
                    g.len(),
                    time.len()
                )));
            }
            depths.push(h);
            values.extend_from_slice(&g);
        }
        Self::from_custom_parts(name, time, depths, values)
    }

    fn library_from_json(
        name: &str,
        time: Vec<Float>,
        obj: &Map<String, Value>,
    ) -> Result<Self, Error> {
        let mut spacings = Vec::new();
        let mut conductivities: Option<Vec<Float>> = None;
        let mut depths: Option<Vec<Float>> = None;
        let mut values = Vec::new();

        for (b, by_conductivity) in numeric_entries(obj)? {
            spacings.push(b);
            let by_conductivity = by_conductivity.as_object().ok_or_else(|| {
                Error::invalid(format!(
                    "dataset '{}': entry B = {} must map conductivities to depths",
                    name, b
                ))
            })?;
            let mut ks_here = Vec::new();
            for (ks, by_depth) in numeric_entries(by_conductivity)? {
                ks_here.push(ks);
                let by_depth = by_depth.as_object().ok_or_else(|| {
                    Error::invalid(format!(
                        "dataset '{}': entry k_s = {} must map depths to responses",
                        name, ks
                    ))
                })?;
                let mut depths_here = Vec::new();
                for (h, g) in numeric_entries(by_depth)? {
                    depths_here.push(h);
                    let g = parse_float_array("g", g)?;
                    if g.len() != time.len() {
                        return Err(Error::invalid(format!(
                            "dataset '{}': the response at H = {} has {} entries but the time grid has {}",
                            name, h, g.len(), time.len()
                        )));
                    }
                    values.extend_from_slice(&g);
                }
                match &depths {
                    None => depths = Some(depths_here),
                    Some(known) => {
                        let same = known.len() == depths_here.len()
                            && known.iter().zip(&depths_here).all(|(a, b)| close(*a, *b));
                        if !same {
                            return Err(Error::invalid(format!(
                                "dataset '{}' is not a regular grid: depth axes differ between entries",
                                name
                            )));
                        }
                    }
                }
            }
            match &conductivities {
                None => conductivities = Some(ks_here),
                Some(known) => {
                    let same = known.len() == ks_here.len()
                        && known.iter().zip(&ks_here).all(|(a, b)| close(*a, *b));
                    if !same {
                        return Err(Error::invalid(format!(
                            "dataset '{}' is not a regular grid: conductivity axes differ between entries",
                            name
                        )));
                    }
                }
            }
        }

        // numeric_entries guarantees at least one spacing entry
        let conductivities = conductivities.unwrap();
        let depths = depths.unwrap();
        Self::from_library_parts(name, time, spacings, conductivities, depths, values)
    }

    /// Builds a library table from already-separated parts. `values` is
    /// flattened in `[spacing][conductivity][depth][time]` order.
    pub fn from_library_parts(
        name: &str,
        time: Vec<Float>,
        spacings: Vec<Float>,
        conductivities: Vec<Float>,
        depths: Vec<Float>,
        values: Vec<Float>,
    ) -> Result<Self, Error> {
        let interp = Interpolator::new(
            vec![spacings, conductivities, depths.clone(), time.clone()],
            values,
        )?;
        Ok(Self {
            name: name.to_string(),
            time,
            kind: TableKind::Library { depths, interp },
        })
    }

    /// Builds a custom table from already-separated parts. `values` is
    /// flattened in `[depth][time]` order.
    pub fn from_custom_parts(
        name: &str,
        time: Vec<Float>,
        depths: Vec<Float>,
        values: Vec<Float>,
    ) -> Result<Self, Error> {
        let interp = Interpolator::new(vec![depths.clone(), time.clone()], values)?;
        Ok(Self {
            name: name.to_string(),
            time,
            kind: TableKind::Custom { depths, interp },
        })
    }

    /// The name this table is stored under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tabulated time grid, seconds.
    pub fn time(&self) -> &[Float] {
        &self.time
    }

    /// The shallowest tabulated depth, m.
    pub fn h_min(&self) -> Float {
        match &self.kind {
            TableKind::Library { depths, .. } | TableKind::Custom { depths, .. } => depths[0],
        }
    }

    /// The deepest tabulated depth, m.
    pub fn h_max(&self) -> Float {
        match &self.kind {
            TableKind::Library { depths, .. } | TableKind::Custom { depths, .. } => {
                depths[depths.len() - 1]
            }
        }
    }

    /// The latest queryable time, seconds: the end of the tabulated
    /// grid, capped at one hundred years.
    pub fn t_max(&self) -> Float {
        self.time[self.time.len() - 1].min(MAX_HORIZON)
    }

    /// The g-function at each of `times` for a borehole length `h`.
    ///
    /// Library tables also interpolate over the spacing and ground
    /// conductivity given; custom tables were computed at fixed ones
    /// and ignore those arguments.
    ///
    /// Times below the first grid point and depths below the shallowest
    /// tabulated one are clamped; a depth above the deepest one or a
    /// time beyond [`GFunctionTable::t_max`] is an out-of-bounds error
    /// naming the violated bound.
    pub fn g(
        &self,
        times: &[Float],
        h: Float,
        spacing: Float,
        conductivity: Float,
    ) -> Result<Vec<Float>, Error> {
        if h > self.h_max() {
            return Err(Error::OutOfBounds {
                quantity: BoundKind::Depth,
                value: h,
                bound: self.h_max(),
            });
        }
        let t_max = self.t_max();
        for t in times {
            if *t > t_max {
                return Err(Error::OutOfBounds {
                    quantity: BoundKind::Horizon,
                    value: *t,
                    bound: t_max,
                });
            }
        }

        let mut out = Vec::with_capacity(times.len());
        match &self.kind {
            TableKind::Library { interp, .. } => {
                for t in times {
                    out.push(interp.eval(&[spacing, conductivity, h, *t]));
                }
            }
            TableKind::Custom { interp, .. } => {
                for t in times {
                    out.push(interp.eval(&[h, *t]));
                }
            }
        }
        Ok(out)
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_json() -> Value {
        serde_json::json!({
            "Time": [3600.0, 7200.0, 14400.0],
            "Data": {
                "100": [4.0, 5.0, 6.0],
                "150": [5.0, 6.0, 7.0]
            }
        })
    }

    #[test]
    fn custom_table_round_trip() {
        let table = GFunctionTable::from_json_value("field", &custom_json()).unwrap();
        assert_eq!(table.name(), "field");
        assert!((table.h_min() - 100.0).abs() < 1e-9);
        assert!((table.h_max() - 150.0).abs() < 1e-9);

        // stored grid points come back exactly
        let g = table.g(&[3600.0, 14400.0], 100.0, 0.0, 0.0).unwrap();
        assert!((g[0] - 4.0).abs() < 1e-12);
        assert!((g[1] - 6.0).abs() < 1e-12);

        // halfway in depth and time
        let g = table.g(&[5400.0], 125.0, 0.0, 0.0).unwrap();
        assert!((g[0] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn library_table_interpolates_every_axis() {
        let json = serde_json::json!({
            "Time": [3600.0, 7200.0],
            "6": {
                "2": { "100": [1.0, 2.0], "200": [3.0, 4.0] },
                "3": { "100": [2.0, 3.0], "200": [4.0, 5.0] }
            },
            "7": {
                "2": { "100": [2.0, 3.0], "200": [4.0, 5.0] },
                "3": { "100": [3.0, 4.0], "200": [5.0, 6.0] }
            }
        });
        let table = GFunctionTable::from_json_value("2x1", &json).unwrap();
        // corner
        let g = table.g(&[3600.0], 100.0, 6.0, 2.0).unwrap();
        assert!((g[0] - 1.0).abs() < 1e-12);
        // centre of every axis: mean of all 16 corners
        let g = table.g(&[5400.0], 150.0, 6.5, 2.5).unwrap();
        assert!((g[0] - 3.5).abs() < 1e-12);
    }

    #[test]
    fn depth_above_band_is_an_error() {
        let table = GFunctionTable::from_json_value("field", &custom_json()).unwrap();
        let err = table.g(&[3600.0], 400.0, 0.0, 0.0).unwrap_err();
        match err {
            Error::OutOfBounds {
                quantity,
                value,
                bound,
            } => {
                assert_eq!(quantity, BoundKind::Depth);
                assert!((value - 400.0).abs() < 1e-9);
                assert!((bound - 150.0).abs() < 1e-9);
            }
            other => panic!("expected out_of_bounds, got {:?}", other),
        }
        // depths below the band are clamped, not errors
        assert!(table.g(&[3600.0], 50.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn horizon_beyond_grid_is_an_error() {
        let table = GFunctionTable::from_json_value("field", &custom_json()).unwrap();
        let err = table.g(&[20_000.0], 100.0, 0.0, 0.0).unwrap_err();
        match err {
            Error::OutOfBounds { quantity, .. } => assert_eq!(quantity, BoundKind::Horizon),
            other => panic!("expected out_of_bounds, got {:?}", other),
        }
    }

    #[test]
    fn ragged_grids_are_rejected() {
        let json = serde_json::json!({
            "Time": [3600.0],
            "6": { "2": { "100": [1.0] } },
            "7": { "2": { "100": [1.0], "200": [2.0] } }
        });
        assert!(GFunctionTable::from_json_value("bad", &json).is_err());
    }

    #[test]
    fn response_length_must_match_time() {
        let json = serde_json::json!({
            "Time": [3600.0, 7200.0],
            "Data": { "100": [1.0] }
        });
        assert!(GFunctionTable::from_json_value("bad", &json).is_err());
    }
}

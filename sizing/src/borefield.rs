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
use borehole::ResistanceModel;
use communication::{CancelFlag, Error};
use gfunction::GFunctionTable;
use model::{FieldGeometry, Ground, TemperatureLimits};
use std::sync::Arc;

/// A borefield ready for evaluation and sizing.
///
/// Holds everything the thermal-response engine needs: the number of
/// boreholes and their spacing, the ground, the resistance model, the
/// fluid-temperature limits, and the g-function table of this field
/// configuration. The borehole length is *not* stored here: it is an
/// argument to every evaluation, and the unknown of every sizing call.
#[derive(Debug, Clone)]
pub struct Borefield {
    ground: Ground,
    n_boreholes: usize,
    spacing: Float,
    resistance: ResistanceModel,
    limits: TemperatureLimits,
    table: Arc<GFunctionTable>,
    h_max: Float,
    cancel: CancelFlag,
}

impl Borefield {
    /// Ties a field together. The table must match the geometry: the
    /// library entry of a rectangular configuration, or the custom
    /// entry computed for an explicit borehole list.
    pub fn new(
        ground: Ground,
        geometry: &FieldGeometry,
        resistance: ResistanceModel,
        limits: TemperatureLimits,
        table: Arc<GFunctionTable>,
        h_max: Float,
    ) -> Result<Self, Error> {
        let n_boreholes = geometry.n_boreholes();
        if n_boreholes == 0 {
            return Err(Error::invalid("a borefield needs at least one borehole"));
        }
        if !(h_max > 0.0) {
            return Err(Error::invalid(
                "the maximum borehole length must be positive",
            ));
        }
        Ok(Self {
            ground,
            n_boreholes,
            spacing: geometry.spacing().unwrap_or(0.0),
            resistance,
            limits,
            table,
            h_max,
            cancel: CancelFlag::new(),
        })
    }

    /// Shares a cancellation flag with the host; raised flags abort
    /// running evaluations and sizings with a `cancelled` error.
    pub fn set_cancel_flag(&mut self, cancel: CancelFlag) {
        self.cancel = cancel;
    }

    /// The cancellation flag in use.
    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// The ground properties.
    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    /// The fluid-temperature limits.
    pub fn limits(&self) -> TemperatureLimits {
        self.limits
    }

    /// The number of boreholes.
    pub fn n_boreholes(&self) -> usize {
        self.n_boreholes
    }

    /// The deepest acceptable borehole, m.
    pub fn h_max(&self) -> Float {
        self.h_max
    }

    /// The g-function table in use.
    pub fn table(&self) -> &Arc<GFunctionTable> {
        &self.table
    }

    /// The resistance model in use.
    pub fn resistance(&self) -> &ResistanceModel {
        &self.resistance
    }

    /// The equivalent borehole resistance at length `h`, m·K/W.
    pub fn rb(&self, h: Float) -> Result<Float, Error> {
        self.resistance.rb(h)
    }

    /// The g-function of this field at each of `times` for length `h`.
    pub fn g(&self, times: &[Float], h: Float) -> Result<Vec<Float>, Error> {
        self.table
            .g(times, h, self.spacing, self.ground.conductivity)
    }
}

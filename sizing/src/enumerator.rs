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

use crate::{Borefield, Float, SizingMethod};
use borehole::ResistanceModel;
use communication::{CancelFlag, Error, GroundLoad};
use gfunction::GFunctionStore;
use model::{CostModel, FieldGeometry, Ground, TemperatureLimits};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The geometric envelope a candidate field must fit in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConstraints {
    /// Deepest acceptable borehole, m.
    pub h_max: Float,

    /// Available width: `n_1 · B` may not exceed it, m.
    pub max_width: Float,

    /// Available length: `n_2 · B` may not exceed it, m.
    pub max_length: Float,

    /// Smallest spacing to try, m.
    pub b_min: Float,

    /// Largest spacing to try, m.
    pub b_max: Float,

    /// Spacing discretisation step, m.
    pub b_step: Float,
}

impl FieldConstraints {
    fn validate(&self) -> Result<(), Error> {
        if !(self.h_max > 0.0) || !(self.max_width > 0.0) || !(self.max_length > 0.0) {
            return Err(Error::invalid(
                "the field envelope dimensions must be positive",
            ));
        }
        if !(self.b_min > 0.0) || self.b_max < self.b_min || !(self.b_step > 0.0) {
            return Err(Error::invalid(format!(
                "the spacing range [{}, {}] with step {} is not searchable",
                self.b_min, self.b_max, self.b_step
            )));
        }
        Ok(())
    }
}

/// How to walk the candidate configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Stop at the first feasible candidate in canonical order
    /// (fewest boreholes first, then tightest spacing).
    Fast,

    /// Size every candidate and keep the cheapest.
    Robust,
}

/// One feasible configuration and its price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldCandidate {
    /// Boreholes along the width.
    pub n_1: usize,

    /// Boreholes along the length.
    pub n_2: usize,

    /// Spacing, m.
    pub spacing: Float,

    /// Required borehole length, m.
    pub depth: Float,

    /// The binding quadrant of the sizing.
    pub quadrant: u8,

    /// Total drilled length, m.
    pub total_length: Float,

    /// Cost under the active cost model.
    pub cost: Float,
}

/// Searches rectangular configurations for the cheapest feasible field.
///
/// Candidates are all `(n_1, n_2, B)` with the spacing stepped through
/// its range and the counts bounded by the envelope. Each candidate is
/// sized with its own library g-function dataset; configurations whose
/// dataset is not in the store are skipped, as are those that fail to
/// converge or need boreholes deeper than the envelope allows.
pub struct FieldEnumerator<'a> {
    /// Where the library datasets live.
    pub store: &'a GFunctionStore,

    /// Ground properties, shared by all candidates.
    pub ground: Ground,

    /// The per-borehole resistance model, shared by all candidates.
    pub resistance: ResistanceModel,

    /// Fluid-temperature limits.
    pub limits: TemperatureLimits,

    /// The geometric envelope.
    pub constraints: FieldConstraints,

    /// What "cheapest" means.
    pub cost_model: CostModel,

    /// The sizing method to run per candidate.
    pub method: SizingMethod,

    /// Initial borehole length guess per candidate, m.
    pub h_init: Float,

    /// Cooperative cancellation.
    pub cancel: CancelFlag,
}

impl FieldEnumerator<'_> {
    /// Runs the search. Errors with `infeasible` when no candidate
    /// satisfies the limits inside the envelope.
    pub fn find_cheapest(
        &self,
        load: &dyn GroundLoad,
        traversal: Traversal,
    ) -> Result<FieldCandidate, Error> {
        self.constraints.validate()?;
        let candidates = self.candidates();
        log::info!(
            "searching {} rectangular configurations ({:?})",
            candidates.len(),
            traversal
        );

        match traversal {
            Traversal::Fast => {
                for (n_1, n_2, b) in candidates {
                    self.cancel.check()?;
                    if let Some(found) = self.size_candidate(load, n_1, n_2, b)? {
                        return Ok(found);
                    }
                }
                Err(Error::Infeasible(
                    "no rectangular configuration fits the envelope and the temperature limits"
                        .to_string(),
                ))
            }
            Traversal::Robust => {
                let sized = self.size_all(load, &candidates)?;
                sized
                    .into_iter()
                    .flatten()
                    .min_by(|a, b| {
                        // cheapest; ties to fewer boreholes, then
                        // tighter spacing
                        let na = a.n_1 * a.n_2;
                        let nb = b.n_1 * b.n_2;
                        a.cost
                            .partial_cmp(&b.cost)
                            .unwrap_or(std::cmp::Ordering::Equal)
                            .then(na.cmp(&nb))
                            .then(
                                a.spacing
                                    .partial_cmp(&b.spacing)
                                    .unwrap_or(std::cmp::Ordering::Equal),
                            )
                    })
                    .ok_or_else(|| {
                        Error::Infeasible(
                            "no rectangular configuration fits the envelope and the temperature limits"
                                .to_string(),
                        )
                    })
            }
        }
    }

    #[cfg(feature = "parallel")]
    fn size_all(
        &self,
        load: &dyn GroundLoad,
        candidates: &[(usize, usize, Float)],
    ) -> Result<Vec<Option<FieldCandidate>>, Error> {
        candidates
            .par_iter()
            .map(|(n_1, n_2, b)| {
                self.cancel.check()?;
                self.size_candidate(load, *n_1, *n_2, *b)
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn size_all(
        &self,
        load: &dyn GroundLoad,
        candidates: &[(usize, usize, Float)],
    ) -> Result<Vec<Option<FieldCandidate>>, Error> {
        candidates
            .iter()
            .map(|(n_1, n_2, b)| {
                self.cancel.check()?;
                self.size_candidate(load, *n_1, *n_2, *b)
            })
            .collect()
    }

    /// All `(n_1, n_2, B)` fitting the envelope, in canonical order:
    /// ascending borehole count, then spacing, then `n_1`.
    fn candidates(&self) -> Vec<(usize, usize, Float)> {
        let c = &self.constraints;
        let mut out = Vec::new();
        let mut b = c.b_min;
        while b <= c.b_max + 1e-9 {
            let max_1 = (c.max_width / b).floor() as usize;
            let max_2 = (c.max_length / b).floor() as usize;
            for n_1 in 1..=max_1 {
                for n_2 in 1..=max_2 {
                    out.push((n_1, n_2, b));
                }
            }
            b += c.b_step;
        }
        out.sort_by(|a, b| {
            (a.0 * a.1)
                .cmp(&(b.0 * b.1))
                .then(a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
                .then(a.0.cmp(&b.0))
        });
        out
    }

    fn size_candidate(
        &self,
        load: &dyn GroundLoad,
        n_1: usize,
        n_2: usize,
        spacing: Float,
    ) -> Result<Option<FieldCandidate>, Error> {
        let geometry = FieldGeometry::rectangular(n_1, n_2, spacing)?;
        // geometry is rectangular, so the key exists
        let key = geometry.library_key().unwrap();
        if !self.store.contains(&key) {
            log::debug!("no dataset for {} at B = {}; skipping", key, spacing);
            return Ok(None);
        }
        let table = self.store.get(&key)?;

        let mut field = Borefield::new(
            self.ground,
            &geometry,
            self.resistance.clone(),
            self.limits,
            table,
            self.constraints.h_max,
        )?;
        field.set_cancel_flag(self.cancel.clone());

        match field.size(load, self.h_init, self.method, None) {
            Ok(result) => {
                if result.depth > self.constraints.h_max {
                    return Ok(None);
                }
                let total_length = result.total_length(n_1 * n_2);
                Ok(Some(FieldCandidate {
                    n_1,
                    n_2,
                    spacing,
                    depth: result.depth,
                    quadrant: result.quadrant,
                    total_length,
                    cost: self.cost_model.cost(total_length),
                }))
            }
            // a depth request beyond the tabulated band means this
            // candidate would need more field than the table covers
            Err(Error::OutOfBounds { .. }) => Ok(None),
            Err(Error::NonConvergent { .. }) => {
                log::warn!("{} at B = {} did not converge; skipping", key, spacing);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

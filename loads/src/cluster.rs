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
use calendar::MonthsConvention;
use communication::{Error, GroundLoad};

/// Several load models served by the same borefield, summed behind the
/// common contract.
///
/// Every aggregate the contract exposes is the element-wise sum of the
/// members' aggregates; peaks are summed too, which treats member peaks
/// as coincident. Members must agree on horizon, convention and start
/// month.
pub struct Cluster {
    members: Vec<Box<dyn GroundLoad>>,
}

impl Cluster {
    /// Builds a cluster from its member loads.
    pub fn new(members: Vec<Box<dyn GroundLoad>>) -> Result<Self, Error> {
        let first = members
            .first()
            .ok_or_else(|| Error::invalid("a cluster needs at least one load"))?;
        let years = first.simulation_years();
        let convention = first.months_convention();
        let start_month = first.start_month();
        for m in members.iter().skip(1) {
            if m.simulation_years() != years {
                return Err(Error::invalid(
                    "all loads in a cluster must share the simulation horizon",
                ));
            }
            if m.months_convention() != convention {
                return Err(Error::invalid(
                    "all loads in a cluster must share the months convention",
                ));
            }
            if m.start_month() != start_month {
                return Err(Error::invalid(
                    "all loads in a cluster must share the start month",
                ));
            }
        }
        Ok(Self { members })
    }

    /// The number of member loads.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster has no members. Never true for a cluster
    /// built through [`Cluster::new`].
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn summed<F>(&self, get: F) -> Vec<Float>
    where
        F: Fn(&dyn GroundLoad) -> Vec<Float>,
    {
        let mut out = get(self.members[0].as_ref());
        for m in self.members.iter().skip(1) {
            for (o, v) in out.iter_mut().zip(get(m.as_ref())) {
                *o += v;
            }
        }
        out
    }
}

impl GroundLoad for Cluster {
    fn simulation_years(&self) -> usize {
        self.members[0].simulation_years()
    }

    fn start_month(&self) -> usize {
        self.members[0].start_month()
    }

    fn months_convention(&self) -> MonthsConvention {
        self.members[0].months_convention()
    }

    fn monthly_baseload_extraction_simulation_period(&self) -> Vec<Float> {
        self.summed(|m| m.monthly_baseload_extraction_simulation_period())
    }

    fn monthly_baseload_injection_simulation_period(&self) -> Vec<Float> {
        self.summed(|m| m.monthly_baseload_injection_simulation_period())
    }

    fn monthly_peak_extraction_simulation_period(&self) -> Vec<Float> {
        self.summed(|m| m.monthly_peak_extraction_simulation_period())
    }

    fn monthly_peak_injection_simulation_period(&self) -> Vec<Float> {
        self.summed(|m| m.monthly_peak_injection_simulation_period())
    }

    fn hourly_extraction_load_simulation_period(&self) -> Option<Vec<Float>> {
        let mut out = self.members[0].hourly_extraction_load_simulation_period()?;
        for m in self.members.iter().skip(1) {
            let series = m.hourly_extraction_load_simulation_period()?;
            for (o, v) in out.iter_mut().zip(series) {
                *o += v;
            }
        }
        Some(out)
    }

    fn hourly_injection_load_simulation_period(&self) -> Option<Vec<Float>> {
        let mut out = self.members[0].hourly_injection_load_simulation_period()?;
        for m in self.members.iter().skip(1) {
            let series = m.hourly_injection_load_simulation_period()?;
            for (o, v) in out.iter_mut().zip(series) {
                *o += v;
            }
        }
        Some(out)
    }

    fn peak_duration_extraction(&self) -> Float {
        self.members
            .iter()
            .map(|m| m.peak_duration_extraction())
            .fold(0.0, Float::max)
    }

    fn peak_duration_injection(&self) -> Float {
        self.members
            .iter()
            .map(|m| m.peak_duration_injection())
            .fold(0.0, Float::max)
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonthlyGroundLoads;

    fn member(scale: Float) -> MonthlyGroundLoads {
        let mut ext = [0.0; 12];
        let mut peak = [0.0; 12];
        for m in 0..12 {
            ext[m] = scale * (m + 1) as Float * 100.0;
            peak[m] = scale * (m + 1) as Float;
        }
        MonthlyGroundLoads::new(ext, [0.0; 12], peak, [0.0; 12]).unwrap()
    }

    #[test]
    fn aggregates_are_elementwise_sums() {
        let a = member(1.0);
        let b = member(2.0);
        let cluster = Cluster::new(vec![Box::new(a.clone()), Box::new(b.clone())]).unwrap();

        let sum = cluster.monthly_baseload_extraction_simulation_period();
        let ea = a.monthly_baseload_extraction_simulation_period();
        let eb = b.monthly_baseload_extraction_simulation_period();
        for i in 0..sum.len() {
            assert!((sum[i] - (ea[i] + eb[i])).abs() < 1e-9);
        }

        let peaks = cluster.monthly_peak_extraction_simulation_period();
        let pa = a.monthly_peak_extraction_simulation_period();
        let pb = b.monthly_peak_extraction_simulation_period();
        for i in 0..peaks.len() {
            assert!((peaks[i] - (pa[i] + pb[i])).abs() < 1e-9);
        }

        assert!((cluster.imbalance() - (a.imbalance() + b.imbalance())).abs() < 1e-6);
    }

    #[test]
    fn mismatched_members_are_rejected() {
        let a = member(1.0);
        let mut b = member(1.0);
        b.set_simulation_years(7).unwrap();
        assert!(Cluster::new(vec![Box::new(a), Box::new(b)]).is_err());
        assert!(Cluster::new(vec![]).is_err());
    }

    #[test]
    fn monthly_members_have_no_hourly_view() {
        let cluster = Cluster::new(vec![Box::new(member(1.0))]).unwrap();
        assert!(cluster.hourly_extraction_load_simulation_period().is_none());
        assert!(!cluster.has_hourly());
    }
}

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

use crate::{Float, HOURS_PER_YEAR, MONTHS_PER_YEAR, SECONDS_PER_HOUR};
use serde::{Deserialize, Serialize};

const EQUAL_HOURS: [usize; 12] = [730; 12];

const CALENDAR_HOURS: [usize; 12] = [
    744, // Jan
    672, // Feb
    744, // Mar
    720, // Apr
    744, // May
    720, // Jun
    744, // Jul
    744, // Aug
    720, // Sept
    744, // Oct
    720, // Nov
    744, // Dec
];

/// How the 8760 hours of a year are split into months.
///
/// A convention is fixed for a whole run; every piece of time-axis
/// arithmetic (load aggregation, superposition steps, peak placement)
/// uses the same table.
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum MonthsConvention {
    /// Every month lasts 730 hours.
    #[default]
    Equal,

    /// Months follow the (non-leap) civil calendar.
    Calendar,
}

impl MonthsConvention {
    /// The number of hours in each month, January first.
    pub fn hours_per_month(&self) -> [usize; 12] {
        match self {
            MonthsConvention::Equal => EQUAL_HOURS,
            MonthsConvention::Calendar => CALENDAR_HOURS,
        }
    }

    /// Same as [`MonthsConvention::hours_per_month`] but as `Float`s,
    /// which is what the load averaging code wants.
    pub fn hours_per_month_float(&self) -> [Float; 12] {
        let mut out = [0.0; 12];
        for (o, h) in out.iter_mut().zip(self.hours_per_month()) {
            *o = h as Float;
        }
        out
    }

    /// The number of seconds in each month, January first.
    pub fn seconds_per_month(&self) -> [Float; 12] {
        let mut out = self.hours_per_month_float();
        for o in out.iter_mut() {
            *o *= SECONDS_PER_HOUR;
        }
        out
    }

    /// Cumulative hour marks: entry `m` is the number of hours of the
    /// year that have passed when month `m` (0-based) starts. The last
    /// entry is always 8760.
    pub fn hour_boundaries(&self) -> [usize; 13] {
        let mut out = [0; 13];
        let hours = self.hours_per_month();
        for m in 0..MONTHS_PER_YEAR {
            out[m + 1] = out[m] + hours[m];
        }
        debug_assert_eq!(out[12], HOURS_PER_YEAR);
        out
    }

    /// The 0-based month that contains the given hour of the year.
    ///
    /// Hours beyond 8760 wrap around into the next year.
    pub fn month_of_hour(&self, hour_of_year: usize) -> usize {
        let hour = hour_of_year % HOURS_PER_YEAR;
        let boundaries = self.hour_boundaries();
        for m in 0..MONTHS_PER_YEAR {
            if hour < boundaries[m + 1] {
                return m;
            }
        }
        unreachable!()
    }
}

/// Rotates a January-first monthly table so that it starts at
/// `start_month` (1 = January ... 12 = December).
///
/// `rotate_monthly(&v, 1)` is the identity.
pub fn rotate_monthly<T: Copy>(values: &[T; 12], start_month: usize) -> [T; 12] {
    debug_assert!((1..=12).contains(&start_month));
    let offset = start_month - 1;
    let mut out = *values;
    for (m, o) in out.iter_mut().enumerate() {
        *o = values[(m + offset) % MONTHS_PER_YEAR];
    }
    out
}

/* *********** */
/*    TESTS    */
/* *********** */

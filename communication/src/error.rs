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
use std::fmt;
use thiserror::Error as ThisError;

/// Which precomputed bound a g-function query violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// The requested borehole length is above the deepest tabulated one.
    Depth,

    /// The requested time is beyond the tabulated horizon.
    Horizon,
}

impl fmt::Display for BoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundKind::Depth => write!(f, "borehole length"),
            BoundKind::Horizon => write!(f, "simulation time"),
        }
    }
}

/// Everything that can go wrong in the core.
///
/// Each variant carries a message for the user; [`Error::tag`] gives the
/// stable machine tag outer shells key their feedback on. The core never
/// catches its own errors: they propagate with `?` up to whoever drives
/// a scenario.
#[derive(Debug, Clone, ThisError, PartialEq)]
pub enum Error {
    /// A value outside its declared domain was handed to a setter or
    /// constructor. The previous value, if any, is left untouched.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The named g-function dataset could not be found.
    #[error("g-function dataset '{0}' is not available")]
    DatasetMissing(String),

    /// A g-function query left the precomputed grid.
    #[error("{quantity} {value} is beyond the precomputed bound of {bound}")]
    OutOfBounds {
        /// Whether the depth or the horizon was exceeded.
        quantity: BoundKind,
        /// The offending value (m, or s).
        value: Float,
        /// The bound that was exceeded.
        bound: Float,
    },

    /// No borehole length inside the allowed band satisfies the
    /// temperature limits.
    #[error("sizing is infeasible: {0}")]
    Infeasible(String),

    /// An iterative method ran out of its iteration budget.
    #[error("did not converge within {iterations} iterations")]
    NonConvergent {
        /// Iterations performed before giving up.
        iterations: usize,
    },

    /// Cooperative cancellation was observed.
    #[error("the operation was cancelled")]
    Cancelled,

    /// A problem reading or writing persistent data.
    #[error("io error: {0}")]
    Io(String),
}

impl Error {
    /// The stable machine tag of this error.
    pub fn tag(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::DatasetMissing(_) => "dataset_missing",
            Error::OutOfBounds { .. } => "out_of_bounds",
            Error::Infeasible(_) => "infeasible",
            Error::NonConvergent { .. } => "non_convergent",
            Error::Cancelled => "cancelled",
            Error::Io(_) => "io_error",
        }
    }

    /// Shorthand for an [`Error::InvalidInput`] with a formatted message.
    pub fn invalid<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidInput(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_stable() {
        assert_eq!(Error::invalid("x").tag(), "invalid_input");
        assert_eq!(Error::DatasetMissing("10x10".into()).tag(), "dataset_missing");
        let e = Error::OutOfBounds {
            quantity: BoundKind::Depth,
            value: 400.0,
            bound: 350.0,
        };
        assert_eq!(e.tag(), "out_of_bounds");
        assert_eq!(Error::Infeasible("x".into()).tag(), "infeasible");
        assert_eq!(Error::NonConvergent { iterations: 40 }.tag(), "non_convergent");
        assert_eq!(Error::Cancelled.tag(), "cancelled");
        assert_eq!(Error::Io("gone".into()).tag(), "io_error");
    }

    #[test]
    fn out_of_bounds_reports_both_values() {
        let e = Error::OutOfBounds {
            quantity: BoundKind::Depth,
            value: 400.0,
            bound: 350.0,
        };
        let msg = e.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("350"));
        assert!(msg.contains("length"));
    }
}

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

/// One borehole of a custom (non-rectangular) field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoreholeRecord {
    /// Position, m.
    pub x: Float,

    /// Position, m.
    pub y: Float,

    /// Borehole length, m.
    pub depth: Float,

    /// Burial depth of the borehole head, m.
    pub burial_depth: Float,

    /// Borehole radius, m.
    pub radius: Float,
}

/// The layout of the borefield.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FieldGeometry {
    /// `n_1 × n_2` boreholes on a rectangular grid.
    Rectangular {
        /// Boreholes along the first side.
        n_1: usize,
        /// Boreholes along the second side.
        n_2: usize,
        /// Spacing between neighbours, m.
        spacing: Float,
    },

    /// An explicit list of boreholes, served by a custom g-function
    /// dataset computed offline for this exact layout.
    Custom {
        /// The boreholes.
        boreholes: Vec<BoreholeRecord>,
    },
}

impl FieldGeometry {
    /// A validated rectangular field.
    pub fn rectangular(n_1: usize, n_2: usize, spacing: Float) -> Result<Self, Error> {
        if n_1 == 0 || n_2 == 0 {
            return Err(Error::invalid("a field needs at least one borehole"));
        }
        if !(spacing > 0.0) {
            return Err(Error::invalid(format!(
                "the borehole spacing must be positive, not {}",
                spacing
            )));
        }
        Ok(FieldGeometry::Rectangular { n_1, n_2, spacing })
    }

    /// A validated custom field.
    pub fn custom(boreholes: Vec<BoreholeRecord>) -> Result<Self, Error> {
        if boreholes.is_empty() {
            return Err(Error::invalid("a field needs at least one borehole"));
        }
        for (i, b) in boreholes.iter().enumerate() {
            if !(b.depth > 0.0) || !(b.radius > 0.0) || b.burial_depth < 0.0 {
                return Err(Error::invalid(format!(
                    "borehole {} has non-physical dimensions",
                    i
                )));
            }
        }
        Ok(FieldGeometry::Custom { boreholes })
    }

    /// The number of boreholes in the field.
    pub fn n_boreholes(&self) -> usize {
        match self {
            FieldGeometry::Rectangular { n_1, n_2, .. } => n_1 * n_2,
            FieldGeometry::Custom { boreholes } => boreholes.len(),
        }
    }

    /// The spacing of a rectangular field; custom fields have none.
    pub fn spacing(&self) -> Option<Float> {
        match self {
            FieldGeometry::Rectangular { spacing, .. } => Some(*spacing),
            FieldGeometry::Custom { .. } => None,
        }
    }

    /// The library-dataset key of a rectangular field,
    /// `"{max(n_1, n_2)}x{min(n_1, n_2)}"`. Custom fields use a
    /// user-supplied dataset name instead.
    pub fn library_key(&self) -> Option<String> {
        match self {
            FieldGeometry::Rectangular { n_1, n_2, .. } => {
                Some(format!("{}x{}", n_1.max(n_2), n_1.min(n_2)))
            }
            FieldGeometry::Custom { .. } => None,
        }
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangular_counts_and_keys() {
        let field = FieldGeometry::rectangular(4, 10, 6.5).unwrap();
        assert_eq!(field.n_boreholes(), 40);
        assert_eq!(field.library_key().unwrap(), "10x4");
        assert!((field.spacing().unwrap() - 6.5).abs() < 1e-12);

        assert!(FieldGeometry::rectangular(0, 10, 6.0).is_err());
        assert!(FieldGeometry::rectangular(10, 10, 0.0).is_err());
    }

    #[test]
    fn custom_fields_derive_their_count() {
        let b = BoreholeRecord {
            x: 0.0,
            y: 0.0,
            depth: 110.0,
            burial_depth: 1.0,
            radius: 0.075,
        };
        let field = FieldGeometry::custom(vec![b; 7]).unwrap();
        assert_eq!(field.n_boreholes(), 7);
        assert!(field.library_key().is_none());
        assert!(field.spacing().is_none());

        let mut bad = b;
        bad.depth = 0.0;
        assert!(FieldGeometry::custom(vec![bad]).is_err());
    }
}

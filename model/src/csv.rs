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
use calendar::HOURS_PER_YEAR;
use communication::Error;
use std::path::Path;

/// The unit hourly CSV values are given in; everything is converted to
/// kW on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerUnit {
    /// Watts.
    Watt,

    /// Kilowatts.
    #[default]
    Kilowatt,

    /// Megawatts.
    Megawatt,
}

impl PowerUnit {
    fn to_kilowatt(&self) -> Float {
        match self {
            PowerUnit::Watt => 1e-3,
            PowerUnit::Kilowatt => 1.0,
            PowerUnit::Megawatt => 1e3,
        }
    }
}

/// How to read an hourly-load CSV file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsvOptions {
    /// The column separator.
    pub separator: char,

    /// The decimal mark inside numbers.
    pub decimal: char,

    /// Whether the first line is a header to skip.
    pub header: bool,

    /// The unit of the values.
    pub unit: PowerUnit,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: ';',
            decimal: '.',
            header: false,
            unit: PowerUnit::default(),
        }
    }
}

/// One imported year of hourly loads, kW.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyCsv {
    /// Hourly heating demand.
    pub heating: Vec<Float>,

    /// Hourly cooling demand.
    pub cooling: Vec<Float>,
}

fn parse_number(
    raw: &str,
    options: &CsvOptions,
    line_number: usize,
) -> Result<Float, Error> {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c == options.decimal { '.' } else { c })
        .collect();
    cleaned.parse::<Float>().map_err(|_| {
        Error::invalid(format!(
            "line {}: '{}' is not a number",
            line_number,
            raw.trim()
        ))
    })
}

/// Reads one year of hourly loads from a CSV file.
///
/// One column means a signed series: positive is heating, negative is
/// cooling. Two columns mean (heating, cooling), both non-negative.
/// Exactly 8760 data rows are required.
pub fn read_hourly_csv<P: AsRef<Path>>(
    path: P,
    options: &CsvOptions,
) -> Result<HourlyCsv, Error> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Io(format!("could not read '{}': {}", path.display(), e)))?;
    parse_hourly_csv(&text, options)
}

/// Reads one year of hourly loads from already-loaded CSV text.
pub fn parse_hourly_csv(text: &str, options: &CsvOptions) -> Result<HourlyCsv, Error> {
    let scale = options.unit.to_kilowatt();
    let mut heating = Vec::with_capacity(HOURS_PER_YEAR);
    let mut cooling = Vec::with_capacity(HOURS_PER_YEAR);
    let mut columns: Option<usize> = None;

    for (i, line) in text.lines().enumerate() {
        if i == 0 && options.header {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let line_number = i + 1;
        let fields: Vec<&str> = line.split(options.separator).collect();
        match columns {
            None => {
                if fields.len() > 2 {
                    return Err(Error::invalid(format!(
                        "line {}: expected 1 or 2 columns, found {}",
                        line_number,
                        fields.len()
                    )));
                }
                columns = Some(fields.len());
            }
            Some(n) if n != fields.len() => {
                return Err(Error::invalid(format!(
                    "line {}: expected {} columns, found {}",
                    line_number,
                    n,
                    fields.len()
                )));
            }
            Some(_) => (),
        }

        if fields.len() == 1 {
            let v = parse_number(fields[0], options, line_number)? * scale;
            if v >= 0.0 {
                heating.push(v);
                cooling.push(0.0);
            } else {
                heating.push(0.0);
                cooling.push(-v);
            }
        } else {
            let h = parse_number(fields[0], options, line_number)? * scale;
            let c = parse_number(fields[1], options, line_number)? * scale;
            if h < 0.0 || c < 0.0 {
                return Err(Error::invalid(format!(
                    "line {}: two-column files may not hold negative loads",
                    line_number
                )));
            }
            heating.push(h);
            cooling.push(c);
        }
    }

    if heating.len() != HOURS_PER_YEAR {
        return Err(Error::invalid(format!(
            "an hourly load file must hold {} rows, not {}",
            HOURS_PER_YEAR,
            heating.len()
        )));
    }
    Ok(HourlyCsv { heating, cooling })
}

/* *********** */
/*    TESTS    */
/* *********** */

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_text() -> String {
        let mut text = String::from("heating;cooling\n");
        for h in 0..HOURS_PER_YEAR {
            text.push_str(&format!("{};{}\n", h % 50, (h + 1) % 30));
        }
        text
    }

    #[test]
    fn two_columns_with_header() {
        let options = CsvOptions {
            header: true,
            ..CsvOptions::default()
        };
        let csv = parse_hourly_csv(&two_column_text(), &options).unwrap();
        assert_eq!(csv.heating.len(), HOURS_PER_YEAR);
        assert!((csv.heating[1] - 1.0).abs() < 1e-12);
        assert!((csv.cooling[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_signed_column_splits_by_sign() {
        let mut text = String::new();
        for h in 0..HOURS_PER_YEAR {
            if h % 2 == 0 {
                text.push_str("2,5\n");
            } else {
                text.push_str("-1,5\n");
            }
        }
        let options = CsvOptions {
            decimal: ',',
            ..CsvOptions::default()
        };
        let csv = parse_hourly_csv(&text, &options).unwrap();
        assert!((csv.heating[0] - 2.5).abs() < 1e-12);
        assert!(csv.cooling[0].abs() < 1e-12);
        assert!((csv.cooling[1] - 1.5).abs() < 1e-12);
        assert!(csv.heating[1].abs() < 1e-12);
    }

    #[test]
    fn units_scale_to_kilowatts() {
        let mut text = String::new();
        for _ in 0..HOURS_PER_YEAR {
            text.push_str("1500\n");
        }
        let options = CsvOptions {
            unit: PowerUnit::Watt,
            ..CsvOptions::default()
        };
        let csv = parse_hourly_csv(&text, &options).unwrap();
        assert!((csv.heating[0] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let err = parse_hourly_csv("1\n2\n3\n", &CsvOptions::default()).unwrap_err();
        assert_eq!(err.tag(), "invalid_input");
        assert!(err.to_string().contains("8760"));
    }

    #[test]
    fn garbage_reports_the_line() {
        let mut text = String::new();
        for h in 0..HOURS_PER_YEAR {
            if h == 10 {
                text.push_str("oops\n");
            } else {
                text.push_str("1\n");
            }
        }
        let err = parse_hourly_csv(&text, &CsvOptions::default()).unwrap_err();
        assert!(err.to_string().contains("line 11"));
    }
}

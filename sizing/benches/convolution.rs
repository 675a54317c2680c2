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

use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use borehole::ResistanceModel;
use gfunction::{claesson_javed_times, GFunctionTable, MAX_HORIZON};
use loads::HourlyGroundLoadsMultiYear;
use model::{FieldGeometry, Ground, TemperatureLimits};
use sizing::Borefield;

type Float = f64;

fn synthetic_table() -> Arc<GFunctionTable> {
    let time = claesson_javed_times(3600.0, MAX_HORIZON);
    let depths: Vec<Float> = (1..=7).map(|i| i as Float * 50.0).collect();
    let mut values = Vec::with_capacity(depths.len() * time.len());
    for h in &depths {
        for t in &time {
            values.push(0.3 * (t / 3600.0).ln() + h / 1000.0);
        }
    }
    Arc::new(GFunctionTable::from_custom_parts("bench", time, depths, values).unwrap())
}

fn hourly_year() -> HourlyGroundLoadsMultiYear {
    let extraction: Vec<Float> = (0..8760)
        .map(|h| 40.0 * (1.0 + ((h as Float) / 8760.0 * std::f64::consts::TAU).cos()) / 2.0)
        .collect();
    let injection: Vec<Float> = (0..8760)
        .map(|h| 30.0 * (1.0 - ((h as Float) / 8760.0 * std::f64::consts::TAU).cos()) / 2.0)
        .collect();
    HourlyGroundLoadsMultiYear::new(extraction, injection).unwrap()
}

fn bench_hourly_superposition(c: &mut Criterion) {
    let field = Borefield::new(
        Ground::constant_temperature(2.0, 2.4e6, 10.0).unwrap(),
        &FieldGeometry::rectangular(5, 5, 6.0).unwrap(),
        ResistanceModel::constant(0.12).unwrap(),
        TemperatureLimits::new(0.0, 16.0).unwrap(),
        synthetic_table(),
        350.0,
    )
    .unwrap();
    let loads = hourly_year();

    c.bench_function("hourly superposition, one year", |b| {
        b.iter(|| field.evaluate_hourly(&loads, 120.0).unwrap())
    });
}

criterion_group!(benches, bench_hourly_superposition);
criterion_main!(benches);

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

//! Archive-level behaviour against the bundled demo dataset: sizing a
//! scenario, saving, reloading and sizing again must reproduce the
//! result exactly.

use ghetool::{run_archive, GFunctionStore, Scenario, ScenarioArchive};

fn bundled_store() -> GFunctionStore {
    GFunctionStore::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

fn office_scenario() -> Scenario {
    let mut scenario = Scenario::new("office");
    let o = &mut scenario.options;
    o.n_1 = 10;
    o.n_2 = 10;
    o.spacing = 6.0;
    o.conductivity = 2.0;
    o.ground_temperature = 10.0;
    o.t_min = 0.0;
    o.t_max = 16.0;
    o.rb = 0.2;
    o.rb_mode = "constant".to_string();
    o.simulation_years = 20;
    o.sizing_method = "L2".to_string();
    o.baseload_extraction = [
        46500.0, 44400.0, 37500.0, 29700.0, 19200.0, 0.0, 0.0, 0.0, 18300.0, 26100.0, 35100.0,
        43200.0,
    ];
    for m in 0..12 {
        o.baseload_injection[m] = o.baseload_extraction[(m + 6) % 12];
    }
    o.peak_extraction[0] = 160.0;
    o.peak_injection[7] = 240.0;
    scenario
}

#[test]
fn sizing_save_reload_resize_is_identical() {
    let store = bundled_store();
    let mut archive = ScenarioArchive {
        filename: String::new(),
        scenarios: vec![office_scenario()],
    };

    let reports = run_archive(&mut archive, &store);
    let first = reports[0]
        .outcome
        .as_ref()
        .expect("the demo scenario must size");
    assert!(first.depth > 1.0 && first.depth < 350.0, "H = {}", first.depth);
    assert!((1..=4).contains(&first.limiting_quadrant));

    // persist, reload, size again
    let path = std::env::temp_dir().join("ghetool-round-trip.json");
    archive.save(&path).unwrap();
    let mut reloaded = ScenarioArchive::load(&path).unwrap();
    assert_eq!(
        reloaded.get("office").unwrap().outcome.unwrap().depth,
        first.depth
    );

    let reports = run_archive(&mut reloaded, &store);
    let second = reports[0].outcome.as_ref().unwrap();
    assert_eq!(second.depth, first.depth);
    assert_eq!(second.limiting_quadrant, first.limiting_quadrant);
    assert_eq!(second.iterations, first.iterations);
}

#[test]
fn missing_datasets_mark_the_scenario_not_calculated() {
    let store = bundled_store();
    let mut scenario = office_scenario();
    scenario.name = "warehouse".to_string();
    scenario.options.n_1 = 14; // no 14x10 dataset is bundled
    let mut archive = ScenarioArchive {
        filename: String::new(),
        scenarios: vec![office_scenario(), scenario],
    };

    let reports = run_archive(&mut archive, &store);
    assert!(reports[0].outcome.is_ok());
    assert!(reports[1].outcome.is_err());

    let failed = archive.get("warehouse").unwrap();
    assert!(failed.outcome.is_none());
    let message = failed.error.as_ref().unwrap();
    assert!(message.contains("dataset_missing"));
    assert!(message.contains("14x10"));
}

#[test]
fn the_demo_archive_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/office.json");
    let archive = ScenarioArchive::load(path).unwrap();
    let office = archive.get("office").unwrap();
    assert_eq!(office.options.n_1, 10);
    assert!((office.options.peak_injection[7] - 240.0).abs() < 1e-9);
    assert!(office.outcome.is_none());
}

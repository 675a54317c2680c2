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

use clap::Parser;
use ghetool::{run_archive, GFunctionStore, ScenarioArchive};

/// Size borehole fields for the scenarios of an archive file.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Options {
    /// The scenario archive to run
    #[clap(short = 'i')]
    input_file: String,

    /// Directory holding the g-function datasets
    #[clap(short = 'd', default_value = "./data")]
    data_dir: String,

    /// Run only the scenario of this name
    #[clap(short = 's')]
    scenario: Option<String>,

    /// Where to write the updated archive; defaults to the input file
    #[clap(short = 'o')]
    output: Option<String>,

    /// List the scenarios of the archive and exit
    #[clap(short = 'l', long)]
    list: bool,
}

fn run(options: &Options) -> Result<(), String> {
    let mut archive =
        ScenarioArchive::load(&options.input_file).map_err(|e| e.to_string())?;

    if options.list {
        for scenario in &archive.scenarios {
            let state = match (&scenario.outcome, &scenario.error) {
                (Some(o), _) => format!(
                    "H = {:.2} m, quadrant {}",
                    o.depth, o.limiting_quadrant
                ),
                (None, Some(e)) => format!("failed: {}", e),
                (None, None) => "not calculated".to_string(),
            };
            println!("{}: {}", scenario.name, state);
        }
        return Ok(());
    }

    if let Some(name) = &options.scenario {
        archive.scenarios.retain(|s| &s.name == name);
        if archive.scenarios.is_empty() {
            return Err(format!("there is no scenario named '{}'", name));
        }
    }

    let store = GFunctionStore::new(&options.data_dir);
    let reports = run_archive(&mut archive, &store);

    let mut failures = 0;
    for report in &reports {
        match &report.outcome {
            Ok(outcome) => println!(
                "{}: H = {:.2} m over {} boreholes (quadrant {}, {} iterations)",
                report.name,
                outcome.depth,
                (outcome.total_length / outcome.depth).round() as usize,
                outcome.limiting_quadrant,
                outcome.iterations
            ),
            Err(e) => {
                failures += 1;
                println!("{}: not calculated ({})", report.name, e);
            }
        }
    }

    let output = options.output.as_ref().unwrap_or(&options.input_file);
    archive.save(output).map_err(|e| e.to_string())?;

    if failures > 0 {
        Err(format!("{} scenario(s) failed", failures))
    } else {
        Ok(())
    }
}

fn main() {
    let options = Options::parse();

    match utils::init_logger() {
        Ok(path) => log::info!("logging to {}", path.display()),
        Err(e) => eprintln!("Warning: could not set up the log file: {}", e),
    }

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

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

use communication::{CancelFlag, Error};
use gfunction::GFunctionStore;
use model::{Scenario, SizingOutcome};
use std::sync::mpsc;
use std::thread::JoinHandle;

/// What became of one submitted scenario.
#[derive(Debug)]
pub struct ScenarioReport {
    /// The scenario name.
    pub name: String,

    /// Its sizing outcome, or the error that stopped it.
    pub outcome: Result<SizingOutcome, Error>,
}

struct Job {
    index: usize,
    scenario: Scenario,
    cancel: CancelFlag,
}

/// A host-side worker that executes scenarios one at a time on a
/// background thread and hands results back in submission order.
///
/// Each submission returns a [`CancelFlag`]; raising it aborts that
/// scenario within seconds (the engine checks between sizing
/// iterations and between months of hourly work) and the queue moves
/// on to the next one.
pub struct ScenarioQueue {
    sender: Option<mpsc::Sender<Job>>,
    results: mpsc::Receiver<(usize, ScenarioReport)>,
    worker: Option<JoinHandle<()>>,
    submitted: usize,
}

impl ScenarioQueue {
    /// Spawns the worker thread.
    pub fn new(store: GFunctionStore) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (result_tx, result_rx) = mpsc::channel();

        let worker = std::thread::spawn(move || {
            for job in job_rx {
                let outcome = crate::runner::run_scenario(&job.scenario, &store, job.cancel);
                let report = ScenarioReport {
                    name: job.scenario.name,
                    outcome,
                };
                if result_tx.send((job.index, report)).is_err() {
                    // nobody is listening any more
                    return;
                }
            }
        });

        Self {
            sender: Some(job_tx),
            results: result_rx,
            worker: Some(worker),
            submitted: 0,
        }
    }

    /// Enqueues a scenario; returns the flag that cancels it.
    pub fn submit(&mut self, scenario: Scenario) -> CancelFlag {
        let cancel = CancelFlag::new();
        let job = Job {
            index: self.submitted,
            scenario,
            cancel: cancel.clone(),
        };
        self.submitted += 1;
        if let Some(sender) = &self.sender {
            // the worker only dies once the sender is dropped
            let _ = sender.send(job);
        }
        cancel
    }

    /// Closes the queue, waits for the worker, and returns one report
    /// per submission, in submission order.
    pub fn finish(mut self) -> Vec<ScenarioReport> {
        self.sender = None; // the worker drains and exits

        let mut indexed = Vec::with_capacity(self.submitted);
        for _ in 0..self.submitted {
            match self.results.recv() {
                Ok(entry) => indexed.push(entry),
                Err(_) => break,
            }
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }

        // the worker is sequential, but make the ordering explicit
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, report)| report).collect()
    }
}

/* *********** */
/*    TESTS    */
/* *********** */

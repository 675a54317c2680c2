use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

const BAR_LENGTH: usize = 40;

/// A terminal progress bar for long jobs (importing a custom
/// g-function dataset, walking a large field search). Safe to tick
/// from several threads.
pub struct ProgressBar {
    label: String,
    counter: AtomicUsize,
    last_shown: AtomicUsize,
    total: usize,
    start: Instant,
}

impl ProgressBar {
    pub fn new<S: Into<String>>(label: S, total: usize) -> Self {
        let bar = Self {
            label: label.into(),
            counter: AtomicUsize::new(0),
            last_shown: AtomicUsize::new(0),
            total: total.max(1),
            start: Instant::now(),
        };
        bar.draw(0);
        bar
    }

    /// Marks one unit of work done.
    pub fn tick(&self) {
        let done = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let percent = 100 * done / self.total;
        let shown = self.last_shown.load(Ordering::Relaxed);
        if percent >= shown + 100 / BAR_LENGTH {
            self.last_shown.store(percent, Ordering::Relaxed);
            self.draw(percent);
        }
    }

    fn draw(&self, percent: usize) {
        let filled = BAR_LENGTH * percent / 100;
        eprint!(
            "\r{} [{}{}] {:3}%",
            self.label,
            "=".repeat(filled),
            " ".repeat(BAR_LENGTH - filled),
            percent
        );
        let _ = std::io::stderr().flush();
    }

    /// Finishes the bar and reports the elapsed time.
    pub fn done(&self) {
        self.draw(100);
        eprintln!(" ({} s)", self.start.elapsed().as_secs());
    }
}

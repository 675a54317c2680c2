pub mod logger;
pub mod progress_bar;

pub use logger::init_logger;
pub use progress_bar::ProgressBar;

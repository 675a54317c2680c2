use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Writes every record as a level-tagged line to the log file and
/// mirrors it to stderr.
struct FileLogger {
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.level(), record.args());
        eprintln!("{}", line);
        if let Ok(mut file) = self.file.lock() {
            // a failed write is not worth killing the run for
            let _ = writeln!(file, "{}", line);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// The per-user log file: `Documents/GHEtool/GHEtool.log`.
pub fn log_file_path() -> Result<PathBuf, String> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .ok_or_else(|| "no home directory in the environment".to_string())?;
    Ok(PathBuf::from(home)
        .join("Documents")
        .join("GHEtool")
        .join("GHEtool.log"))
}

/// Installs the logger: truncates the log file (creating its directory
/// if needed) and mirrors every record to stderr. Returns the log file
/// path. Call once, early.
pub fn init_logger() -> Result<PathBuf, String> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| format!("could not create '{}': {}", dir.display(), e))?;
    }
    let file = File::create(&path)
        .map_err(|e| format!("could not open '{}': {}", path.display(), e))?;

    log::set_boxed_logger(Box::new(FileLogger {
        file: Mutex::new(file),
    }))
    .map_err(|e| format!("a logger is already installed: {}", e))?;
    log::set_max_level(LevelFilter::Info);
    Ok(path)
}

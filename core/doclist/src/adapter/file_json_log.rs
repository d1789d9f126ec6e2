//! Log ポートの標準実装（FileJsonLog / StderrLog / NoopLog）

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};

/// LogRecord を JSONL としてファイルへ追記する Log
pub struct FileJsonLog {
    path: PathBuf,
}

impl FileJsonLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Log for FileJsonLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let line = serde_json::to_string(record)
            .map_err(|e| Error::parse(format!("failed to serialize log record: {}", e)))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                Error::transport(format!("cannot open log file {}: {}", self.path.display(), e))
            })?;
        writeln!(file, "{}", line).map_err(|e| {
            Error::transport(format!("cannot write log file {}: {}", self.path.display(), e))
        })
    }
}

/// 人間向けに要点だけを stderr へ出す Log（-v 用）
pub struct StderrLog;

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let level = match record.level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        eprintln!("[docl] {} {}: {}", record.ts, level, record.message);
        Ok(())
    }
}

/// 何もしない Log
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: &LogRecord) -> Result<(), Error> {
        Ok(())
    }
}

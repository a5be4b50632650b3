use anyhow::Result;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Formats byte count in human-readable form (e.g., "1.00 MB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Append-only run log. Without a path every call is a no-op.
pub struct Logger {
    file_path: Option<PathBuf>,
}

impl Logger {
    pub fn new(file_path: Option<&Path>) -> Self {
        Self {
            file_path: file_path.map(Path::to_path_buf),
        }
    }

    pub fn disabled() -> Self {
        Self { file_path: None }
    }

    pub fn log(&self, message: &str) -> Result<()> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{}] {}", timestamp, message)?;
        Ok(())
    }
}

//! File watcher: scans a log file on startup, then reports links in newly
//! appended lines as the file grows.

use std::io::{Read as _, Seek as _, SeekFrom};
use std::path::Path;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};
use termlinks::OperatingSystem;

use crate::commands;
use crate::config::OutputFormat;
use crate::error::Error;

/// Debounce delay between filesystem events and re-scan.
const DEBOUNCE_MS: u64 = 100;

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, Error> {
    let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })?;
    return Ok(watcher);
}

/// Entry point for the watch command.
///
/// Reports links in the file's current contents, then watches the file and
/// reports links in whatever gets appended. A truncated file (log rotation)
/// restarts from the top.
///
/// # Errors
///
/// Returns errors from reading the file or from watcher setup.
pub fn run(file: &Path, os: OperatingSystem, format: OutputFormat) -> Result<(), Error> {
    let mut tail = Tail::new();
    tail.report_new_lines(file, os, format)?;

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;

    // Watch the parent so rotation (remove + recreate) still delivers events.
    let dir = file.parent().filter(|p| !p.as_os_str().is_empty());
    watcher.watch(dir.unwrap_or(Path::new(".")), RecursiveMode::NonRecursive)?;

    eprintln!("watch: following {}, press Ctrl+C to stop", file.display());

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        tail.report_new_lines(file, os, format)?;
    }

    return Ok(());
}

/// Read position within the followed file.
struct Tail {
    /// Byte offset of the first unprocessed byte.
    offset: u64,
    /// One-based number of the next line to report.
    line_no: usize,
}

impl Tail {
    fn new() -> Self {
        Self { offset: 0, line_no: 1 }
    }

    /// Report links in every complete line appended since the last call.
    /// A partial trailing line (no newline yet) is left for the next call.
    fn report_new_lines(
        &mut self,
        file: &Path,
        os: OperatingSystem,
        format: OutputFormat,
    ) -> Result<(), Error> {
        let mut handle = match std::fs::File::open(file) {
            Ok(h) => h,
            // The file may briefly not exist mid-rotation.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Error::Io(e)),
        };

        let len = handle.metadata()?.len();
        if len < self.offset {
            // Truncated: start over.
            self.offset = 0;
            self.line_no = 1;
        }

        handle.seek(SeekFrom::Start(self.offset))?;
        let mut appended = String::new();
        handle.read_to_string(&mut appended)?;

        // Only process through the last complete line.
        let Some(complete) = appended.rfind('\n') else {
            return Ok(());
        };
        for line in appended[..=complete].lines() {
            commands::report_line(self.line_no, line, os, format)?;
            self.line_no += 1;
        }
        self.offset += complete as u64 + 1;

        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_reports_only_complete_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.log");
        std::fs::write(&path, "src/a.rs:1:2\npartial").unwrap();

        let mut tail = Tail::new();
        tail.report_new_lines(&path, OperatingSystem::NonWindows, OutputFormat::Text)
            .unwrap();
        assert_eq!(tail.line_no, 2);
        assert_eq!(tail.offset, 13);
    }

    #[test]
    fn tail_resets_on_truncation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.log");
        std::fs::write(&path, "src/a.rs:1:2\nsrc/b.rs:3:4\n").unwrap();

        let mut tail = Tail::new();
        tail.report_new_lines(&path, OperatingSystem::NonWindows, OutputFormat::Text)
            .unwrap();
        assert_eq!(tail.line_no, 3);

        std::fs::write(&path, "src/c.rs:5:6\n").unwrap();
        tail.report_new_lines(&path, OperatingSystem::NonWindows, OutputFormat::Text)
            .unwrap();
        assert_eq!(tail.line_no, 2);
        assert_eq!(tail.offset, 13);
    }

    #[test]
    fn tail_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut tail = Tail::new();
        tail.report_new_lines(
            &dir.path().join("gone.log"),
            OperatingSystem::NonWindows,
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(tail.line_no, 1);
    }
}

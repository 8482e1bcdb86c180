use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

/// Tails a growing file, returning the complete lines appended since the
/// previous call.
///
/// The read position only ever moves forward. Truncation or rotation of the
/// source is not detected and leaves the tailer waiting at its old offset;
/// a source that cannot be opened is retried on every call.
pub struct Tailer {
    path: PathBuf,
    reader: Option<BufReader<File>>,
}

impl Tailer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reader: None,
        }
    }

    /// Reads every complete line appended since the last call, skipping
    /// empty ones. An incomplete trailing line is left in place until its
    /// newline arrives.
    pub fn read_new_lines(&mut self) -> Vec<String> {
        let path = self.path.clone();
        let Some(reader) = self.reader_or_open() else {
            return Vec::new();
        };

        let mut lines = Vec::new();

        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => break,
                Ok(n) => {
                    if !line.ends_with('\n') {
                        // Partial write: rewind so the line is delivered
                        // once it is complete.
                        if let Err(e) = reader.seek_relative(-(n as i64)) {
                            tracing::warn!(error = %e, "could not rewind over partial line");
                        }
                        break;
                    }

                    let line = line.trim_end_matches(['\r', '\n']);
                    if !line.is_empty() {
                        lines.push(line.to_string());
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "error while reading log source");
                    break;
                }
            }
        }

        lines
    }

    fn reader_or_open(&mut self) -> Option<&mut BufReader<File>> {
        if self.reader.is_none() {
            match File::open(&self.path) {
                Ok(file) => self.reader = Some(BufReader::new(file)),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        path = %self.path.display(),
                        "could not open log source, will retry"
                    );
                    return None;
                }
            }
        }

        self.reader.as_mut()
    }
}

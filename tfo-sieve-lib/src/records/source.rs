use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use super::Record;
use crate::error::Result;

/// Lazily decodes line-delimited JSON records
///
/// A line that fails to read or decode contributes nothing; the number of
/// such lines is available from [`RecordSource::skipped`] once the source is
/// drained.
pub struct RecordSource<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
    skipped: usize,
}

impl<R: BufRead> RecordSource<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line_no: 0, skipped: 0 }
    }

    /// Lines dropped so far because they could not be decoded
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for RecordSource<R> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            let line = self.lines.next()?;
            self.line_no = self.line_no.saturating_add(1);
            let decoded = line
                .map_err(|e| e.to_string())
                .and_then(|l| serde_json::from_str::<Record>(&l).map_err(|e| e.to_string()));
            match decoded {
                Ok(record) => return Some(record),
                Err(err) => {
                    debug!(line = self.line_no, %err, "skipping undecodable record");
                    self.skipped = self.skipped.saturating_add(1);
                }
            }
        }
    }
}

/// Open `path` and decode every record in it
pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let file = File::open(path.as_ref())?;
    let mut source = RecordSource::new(BufReader::new(file));
    let records: Vec<Record> = source.by_ref().collect();
    if source.skipped() > 0 {
        warn!(
            path = %path.as_ref().display(),
            skipped = source.skipped(),
            "dropped undecodable records"
        );
    }
    debug!(
        path = %path.as_ref().display(),
        records = records.len(),
        skipped = source.skipped(),
        "records decoded"
    );
    Ok(records)
}

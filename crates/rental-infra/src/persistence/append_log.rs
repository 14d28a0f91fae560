//! Append-only delimited log file

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::debug;

use rental_domain::Loaded;
use rental_types::{LineError, Result};

/// One comma-delimited text file that only ever grows.
///
/// Every append opens the file, writes a single line and closes it again.
/// Values holding a comma or quote are quoted; everything else is written
/// verbatim. A value may not hold a line break, since each line is read back
/// on its own.
#[derive(Debug, Clone)]
pub struct AppendLog {
    path: PathBuf,
}

impl AppendLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line
    pub fn append<I, T>(&self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let fields: Vec<T> = fields.into_iter().collect();
        if fields
            .iter()
            .any(|f| f.as_ref().iter().any(|b| *b == b'\n' || *b == b'\r'))
        {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "line break in field").into());
        }

        // Open the file in append mode, creating it if it doesn't exist.
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        writer.write_record(fields)?;
        writer.flush()?;
        Ok(())
    }

    /// Read the whole file, parsing each line with `parse`.
    ///
    /// A missing file reads as empty. Lines that fail to parse are counted
    /// and skipped; only I/O failures are returned as errors. Blank lines
    /// are ignored.
    pub fn load<T, F>(&self, parse: F) -> Result<Loaded<T>>
    where
        F: Fn(&StringRecord) -> std::result::Result<T, LineError>,
    {
        if !self.path.exists() {
            return Ok(Loaded::default());
        }

        let file = File::open(&self.path)?;
        let mut loaded = Loaded::default();
        for (index, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line?;
            let number = index + 1;

            let record = match read_line(&line) {
                Ok(Some(record)) => record,
                Ok(None) => continue,
                Err(e) => {
                    debug!(path = %self.path.display(), line = number, error = %e, "skipping unreadable line");
                    loaded.skipped += 1;
                    continue;
                }
            };

            match parse(&record) {
                Ok(item) => loaded.items.push(item),
                Err(e) => {
                    debug!(path = %self.path.display(), line = number, error = %e, "skipping malformed line");
                    loaded.skipped += 1;
                }
            }
        }

        Ok(loaded)
    }
}

/// Split a single line into fields. A stray quote cannot reach past its own line.
fn read_line(line: &[u8]) -> std::result::Result<Option<StringRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line);
    let mut record = StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(Some(record))
    } else {
        Ok(None)
    }
}

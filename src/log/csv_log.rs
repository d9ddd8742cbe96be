use super::{LogEntry, LogFilter, LogLayout, SequenceLog};
use crate::error::{PfResult, PinForgeError};
use csv::StringRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Durable log backed by a delimited file that only ever grows by whole
/// records. Assumes a single writer process.
#[derive(Debug, Clone)]
pub struct CsvSequenceLog {
    path: PathBuf,
    layout: LogLayout,
}

impl CsvSequenceLog {
    pub fn new<P: AsRef<Path>>(path: P, layout: LogLayout) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            layout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reader(&self) -> PfResult<Option<csv::Reader<File>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;
        Ok(Some(rdr))
    }

    /// Header row of an existing, non-empty log.
    fn existing_header(&self) -> PfResult<Option<StringRecord>> {
        let Some(mut rdr) = self.reader()? else {
            return Ok(None);
        };
        let headers = rdr.headers()?.clone();
        Ok((!headers.is_empty()).then_some(headers))
    }

    fn check_header(&self, headers: &StringRecord) -> PfResult<()> {
        if !self.layout.matches_header(headers) {
            return Err(PinForgeError::Config(format!(
                "'{}' was not written with the {} layout",
                self.path.display(),
                self.layout
            )));
        }
        Ok(())
    }

    fn data_rows(&self) -> PfResult<u64> {
        let Some(mut rdr) = self.reader()? else {
            return Ok(0);
        };
        let mut rows = 0;
        for record in rdr.records() {
            match record {
                Ok(_) => rows += 1,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(_) => continue,
            }
        }
        Ok(rows)
    }
}

/// True when the file is non-empty and its last byte is not a newline,
/// i.e. a previous write was cut short.
fn has_torn_tail(file: &mut File, len: u64) -> PfResult<bool> {
    if len == 0 {
        return Ok(false);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

impl SequenceLog for CsvSequenceLog {
    fn layout(&self) -> LogLayout {
        self.layout
    }

    fn append(&mut self, entry: LogEntry) -> PfResult<()> {
        self.layout.check_fits(&entry)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        if let Some(headers) = self.existing_header()? {
            self.check_header(&headers)?;
        }
        // Only the per-sequence layout carries a running lock number.
        let number = match self.layout {
            LogLayout::PerSequence => self.data_rows()? + 1,
            LogLayout::PerPin => 0,
        };

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;
        let len = file.metadata()?.len();

        // The whole record is staged in memory and lands in a single append.
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        if len == 0 {
            wtr.write_record(self.layout.header())?;
        }
        self.layout.write_entry(&mut wtr, &entry, number)?;
        let mut bytes = wtr.into_inner().map_err(|e| e.into_error())?;

        if has_torn_tail(&mut file, len)? {
            debug!("Log tail is unterminated, starting a fresh line");
            bytes.insert(0, b'\n');
        }

        file.write_all(&bytes)?;
        file.sync_data()?;

        debug!(
            "Appended {} ({} spots) to {}",
            entry.lock_type_code,
            entry.pins.len(),
            self.path.display()
        );
        Ok(())
    }

    fn query(&self, filter: &LogFilter) -> PfResult<Vec<LogEntry>> {
        let Some(mut rdr) = self.reader()? else {
            return Err(PinForgeError::NotFound("log file does not exist".to_string()));
        };

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Err(PinForgeError::NotFound("log is empty".to_string()));
        }
        self.check_header(&headers)?;

        let entries = self.layout.read_entries(rdr.records());
        if entries.is_empty() {
            return Err(PinForgeError::NotFound("log is empty".to_string()));
        }
        Ok(filter.apply(entries))
    }

    fn clear(&mut self) -> PfResult<()> {
        if self.path.exists() {
            File::create(&self.path)?;
            info!("🧹 Cleared log {}", self.path.display());
        }
        Ok(())
    }
}

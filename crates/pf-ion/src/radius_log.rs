//! Append-only binary log of the ionization radius.
//!
//! Each record is three little-endian `f64`: time (s), radius (m) and the
//! ionizing budget. A record is only written when the radius moved by more
//! than 1e-4 relative to the last written one; every record is flushed.

use crate::error::{IonError, IonResult};
use pf_core::changed_beyond;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

const RECORD_BYTES: usize = 3 * std::mem::size_of::<f64>();
const RELATIVE_CHANGE: f64 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusRecord {
    pub time_s: f64,
    pub radius_m: f64,
    pub budget: f64,
}

impl RadiusRecord {
    fn to_bytes(self) -> [u8; RECORD_BYTES] {
        let mut out = [0u8; RECORD_BYTES];
        out[0..8].copy_from_slice(&self.time_s.to_le_bytes());
        out[8..16].copy_from_slice(&self.radius_m.to_le_bytes());
        out[16..24].copy_from_slice(&self.budget.to_le_bytes());
        out
    }

    fn from_bytes(chunk: &[u8]) -> Self {
        let field = |i: usize| {
            let mut b = [0u8; 8];
            b.copy_from_slice(&chunk[8 * i..8 * (i + 1)]);
            f64::from_le_bytes(b)
        };
        Self {
            time_s: field(0),
            radius_m: field(1),
            budget: field(2),
        }
    }
}

/// Debounced radius log writer.
pub struct RadiusLog {
    sink: Box<dyn Write + Send>,
    /// Last written radius, internal units
    last_radius: f64,
    written: usize,
}

impl std::fmt::Debug for RadiusLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadiusLog")
            .field("last_radius", &self.last_radius)
            .field("written", &self.written)
            .finish()
    }
}

impl RadiusLog {
    /// Create (truncate) the log file at `path`.
    pub fn create(path: &Path) -> IonResult<Self> {
        let file = File::create(path)?;
        tracing::info!(path = %path.display(), "opened ionization radius log");
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    pub fn from_writer(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            last_radius: 0.0,
            written: 0,
        }
    }

    /// Write `record` if `rion` (internal units) differs enough from the last
    /// written radius. Returns whether a record was written.
    pub fn observe(&mut self, rion: f64, record: RadiusRecord) -> IonResult<bool> {
        if !changed_beyond(rion, self.last_radius, RELATIVE_CHANGE) {
            return Ok(false);
        }
        self.sink.write_all(&record.to_bytes())?;
        self.sink.flush()?;
        self.last_radius = rion;
        self.written += 1;
        tracing::info!(
            time_s = record.time_s,
            radius_m = record.radius_m,
            budget = record.budget,
            "ionization radius changed"
        );
        Ok(true)
    }

    pub fn records_written(&self) -> usize {
        self.written
    }

    pub fn last_radius(&self) -> f64 {
        self.last_radius
    }
}

/// Read back every record of a radius log.
pub fn read_radius_log(path: &Path) -> IonResult<Vec<RadiusRecord>> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;

    let trailing = bytes.len() % RECORD_BYTES;
    if trailing != 0 {
        return Err(IonError::CorruptLog { trailing });
    }
    Ok(bytes
        .chunks_exact(RECORD_BYTES)
        .map(RadiusRecord::from_bytes)
        .collect())
}

//! Spill-to-disk itinerary streams.
//!
//! Large itinerary lists can be written to a directory and read back in
//! fixed-size bulks. Two files are used, both made of little-endian `u32`
//! words:
//!
//! - `hdr.bin`: `count_hi, count_lo, 0`, then one `(legs, offset_hi,
//!   offset_lo)` triple per itinerary. Offsets are byte positions in the
//!   data stream.
//! - `data.bin`: every itinerary's flight indices, back to back.

mod error;

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{FlightIndex, Itinerary};

pub use error::SpillError;

pub const HEADER_FILE: &str = "hdr.bin";
pub const DATA_FILE: &str = "data.bin";

const WORD: u64 = 4;

/// Upper bound on leg storage reserved from a header word before any leg
/// has been read.
const MAX_RESERVED_LEGS: u32 = 4096;

fn open(path: PathBuf) -> Result<File, SpillError> {
    File::open(&path).map_err(|source| SpillError::Open { path, source })
}

fn create(path: PathBuf) -> Result<File, SpillError> {
    File::create(&path).map_err(|source| SpillError::Open { path, source })
}

fn write_word<W: Write>(writer: &mut W, word: u32) -> std::io::Result<()> {
    writer.write_all(&word.to_le_bytes())
}

fn read_word<R: Read>(reader: &mut R, stream: &'static str) -> Result<u32, SpillError> {
    let mut buf = [0u8; 4];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(u32::from_le_bytes(buf)),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(SpillError::Truncated { stream }),
        Err(e) => Err(e.into()),
    }
}

/// Write `itineraries` to `dir`, replacing any previous spill there.
pub fn write_itineraries(dir: &Path, itineraries: &[Itinerary]) -> Result<(), SpillError> {
    let mut hdr = BufWriter::new(create(dir.join(HEADER_FILE))?);
    let mut data = BufWriter::new(create(dir.join(DATA_FILE))?);

    let count = itineraries.len() as u64;
    write_word(&mut hdr, (count >> 32) as u32)?;
    write_word(&mut hdr, count as u32)?;
    write_word(&mut hdr, 0)?;

    let mut offset = 0u64;
    for (index, itinerary) in itineraries.iter().enumerate() {
        let legs = u32::try_from(itinerary.len()).map_err(|_| SpillError::TooManyLegs { index })?;

        write_word(&mut hdr, legs)?;
        write_word(&mut hdr, (offset >> 32) as u32)?;
        write_word(&mut hdr, offset as u32)?;

        for leg in itinerary.legs() {
            write_word(&mut data, leg.0)?;
        }
        offset += u64::from(legs) * WORD;
    }

    hdr.flush()?;
    data.flush()?;
    debug!(dir = %dir.display(), count, bytes = offset, "spilled itineraries");
    Ok(())
}

/// Restreams a spilled list in bulks of at most `bulk_size` itineraries.
#[derive(Debug)]
pub struct SpillReader {
    hdr: BufReader<File>,
    data: BufReader<File>,
    data_pos: u64,
    total: u64,
    head: u64,
    bulk_size: usize,
}

impl SpillReader {
    /// Open the spill in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SpillError::ZeroBulkSize`] if `bulk_size` is 0.
    pub fn open(dir: &Path, bulk_size: usize) -> Result<Self, SpillError> {
        if bulk_size == 0 {
            return Err(SpillError::ZeroBulkSize);
        }

        let mut hdr = BufReader::new(open(dir.join(HEADER_FILE))?);
        let hi = read_word(&mut hdr, HEADER_FILE)?;
        let lo = read_word(&mut hdr, HEADER_FILE)?;
        read_word(&mut hdr, HEADER_FILE)?;

        let data = BufReader::new(open(dir.join(DATA_FILE))?);

        Ok(Self {
            hdr,
            data,
            data_pos: 0,
            total: (u64::from(hi) << 32) | u64::from(lo),
            head: 0,
            bulk_size,
        })
    }

    /// Number of itineraries in the spill.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of itineraries not yet read.
    pub fn remaining(&self) -> u64 {
        self.total - self.head
    }

    /// Read the next bulk, or `None` once every itinerary has been returned.
    pub fn next_bulk(&mut self) -> Result<Option<Vec<Itinerary>>, SpillError> {
        if self.head >= self.total {
            return Ok(None);
        }

        let len = self.remaining().min(self.bulk_size as u64) as usize;
        let mut bulk = Vec::with_capacity(len);

        for _ in 0..len {
            let legs = read_word(&mut self.hdr, HEADER_FILE)?;
            let hi = read_word(&mut self.hdr, HEADER_FILE)?;
            let lo = read_word(&mut self.hdr, HEADER_FILE)?;
            let offset = (u64::from(hi) << 32) | u64::from(lo);

            if offset != self.data_pos {
                self.data.seek(SeekFrom::Start(offset))?;
            }

            let mut indices = Vec::with_capacity(legs.min(MAX_RESERVED_LEGS) as usize);
            for _ in 0..legs {
                indices.push(FlightIndex(read_word(&mut self.data, DATA_FILE)?));
            }
            self.data_pos = offset + u64::from(legs) * WORD;
            bulk.push(Itinerary::new(indices));
        }

        self.head += len as u64;
        Ok(Some(bulk))
    }
}

impl Iterator for SpillReader {
    type Item = Result<Vec<Itinerary>, SpillError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_bulk().transpose()
    }
}

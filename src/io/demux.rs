/// Sector demuxer

use crate::error::{Mdf2IsoError, Result};
use crate::format::SectorGeometry;
use crate::progress::Progress;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

/// Totals for a finished demux run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemuxStats {
    /// Sectors copied
    pub sectors: u64,
    /// Bytes written to the destination
    pub bytes_written: u64,
}

/// A single source-to-destination conversion
///
/// Copies the payload region of every source sector to the destination:
///
/// ```text
/// | header_skip | payload_size | trailer_skip |   <- one source sector
///               \_____________/
///                 copied out
/// ```
///
/// Header and trailer are skipped with seeks relative to the current cursor.
/// Every sector costs two seeks, so pass an unbuffered source: a `BufReader`
/// discards its buffer on each seek.
pub struct ConversionJob<R, W> {
    source: R,
    destination: W,
    geometry: SectorGeometry,
    source_len: u64,
    total_sectors: u64,
    sectors_processed: u64,
}

impl<R: Read + Seek, W: Write> ConversionJob<R, W> {
    /// Create a job, measuring the length of the source
    pub fn new(mut source: R, destination: W, geometry: SectorGeometry) -> Result<Self> {
        let source_len = source.seek(SeekFrom::End(0))?;
        let total_sectors = geometry.sector_count(source_len);

        tracing::debug!(
            source_len,
            total_sectors,
            output_len = geometry.output_len(total_sectors),
            "prepared conversion job"
        );

        Ok(Self {
            source,
            destination,
            geometry,
            source_len,
            total_sectors,
            sectors_processed: 0,
        })
    }

    /// Number of whole sectors in the source
    pub fn total_sectors(&self) -> u64 {
        self.total_sectors
    }

    /// Sectors copied so far
    pub fn sectors_processed(&self) -> u64 {
        self.sectors_processed
    }

    /// Bytes the destination will hold once every sector is copied
    pub fn total_output_bytes(&self) -> u64 {
        self.geometry.output_len(self.total_sectors)
    }

    /// Stream every sector from source to destination
    pub fn run<P: Progress + ?Sized>(&mut self, progress: &mut P) -> Result<DemuxStats> {
        let g = self.geometry;

        if self.total_sectors == 0 {
            return Err(Mdf2IsoError::TruncatedSource {
                sector: 0,
                expected: g.sector_size,
                actual: self.source_len,
            });
        }

        let total_output = self.total_output_bytes();
        let mut buf = vec![0u8; g.payload_size as usize];
        let mut last_percent: Option<u64> = None;

        self.source.seek(SeekFrom::Start(0))?;
        self.sectors_processed = 0;

        for sector in 0..self.total_sectors {
            skip(&mut self.source, g.header_skip)?;

            let read = read_full(&mut self.source, &mut buf)?;
            if read < buf.len() {
                return Err(Mdf2IsoError::TruncatedSource {
                    sector,
                    expected: g.payload_size,
                    actual: read as u64,
                });
            }

            self.destination.write_all(&buf)?;
            skip(&mut self.source, g.trailer_skip)?;
            self.sectors_processed += 1;

            let percent = sector * g.payload_size * 100 / total_output;
            if last_percent != Some(percent) {
                progress.update(percent);
                last_percent = Some(percent);
            }
        }

        progress.finish();
        self.destination.flush()?;

        let stats = DemuxStats {
            sectors: self.sectors_processed,
            bytes_written: g.output_len(self.sectors_processed),
        };
        tracing::info!(
            sectors = stats.sectors,
            bytes = stats.bytes_written,
            "demuxed source"
        );
        Ok(stats)
    }

    /// Flush and hand back the destination so it can be closed
    pub fn finish(mut self) -> Result<W> {
        self.destination.flush()?;
        Ok(self.destination)
    }
}

fn skip<R: Seek>(source: &mut R, bytes: u64) -> Result<()> {
    if bytes > 0 {
        source.seek(SeekFrom::Current(bytes as i64))?;
    }
    Ok(())
}

/// Read until `buf` is full or the source ends, returning the count read
fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

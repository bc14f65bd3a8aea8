/// Source layout detection and sector geometry

/// Format constants
pub mod constants;
/// Sector geometry resolution
pub mod geometry;

pub use constants::*;
pub use geometry::{effective_mode, resolve, OutputMode, SectorGeometry};

use crate::error::{Mdf2IsoError, Result};
use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Sector layout of a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLayout {
    /// Raw 2352-byte sectors
    PlainRaw,
    /// MDF data track, 2448-byte sectors with subchannel
    MdfData,
    /// MDF audio track, 2448-byte sectors with subchannel
    MdfAudio,
    /// Already a cooked ISO-9660 image
    AlreadyIso9660,
}

impl SourceLayout {
    /// Get a human-readable name for this layout
    pub fn name(&self) -> &'static str {
        match self {
            SourceLayout::PlainRaw => "Raw 2352",
            SourceLayout::MdfData => "MDF data",
            SourceLayout::MdfAudio => "MDF audio",
            SourceLayout::AlreadyIso9660 => "ISO-9660",
        }
    }

    /// Whether this layout can be converted
    pub fn is_convertible(&self) -> bool {
        !matches!(self, SourceLayout::AlreadyIso9660)
    }
}

impl std::fmt::Display for SourceLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a source from its three probe windows
///
/// `iso` is the 8 bytes at offset 32768, `first` the 12 bytes at offset 0 and
/// `second` the 12 bytes at offset 2352. A window that could not be read in
/// full is passed as `None` and never matches.
pub fn classify_windows(
    iso: Option<&[u8]>,
    first: Option<&[u8]>,
    second: Option<&[u8]>,
) -> Option<SourceLayout> {
    if iso == Some(&ISO_9660_SIGNATURE[..]) {
        return Some(SourceLayout::AlreadyIso9660);
    }

    if first == Some(&SYNC_HEADER[..]) {
        if second == Some(&SYNC_HEADER_MDF[..]) {
            Some(SourceLayout::MdfData)
        } else {
            Some(SourceLayout::PlainRaw)
        }
    } else if second == Some(&SYNC_HEADER_MDF_AUDIO[..]) {
        Some(SourceLayout::MdfAudio)
    } else {
        None
    }
}

/// Detect the layout of a seekable source
///
/// Probes the ISO-9660 descriptor first, then the sync patterns of the first
/// and second sectors. The read cursor is left at an unspecified position.
pub fn detect_layout<R: Read + Seek>(source: &mut R) -> Result<SourceLayout> {
    let mut iso = [0u8; ISO_9660_SIGNATURE.len()];
    let iso_ok = read_window(source, ISO_9660_OFFSET, &mut iso)?;
    tracing::trace!(offset = ISO_9660_OFFSET, complete = iso_ok, "probed volume descriptor");
    if iso_ok && iso == ISO_9660_SIGNATURE {
        tracing::debug!("source is already ISO-9660");
        return Ok(SourceLayout::AlreadyIso9660);
    }

    let mut first = [0u8; SYNC_HEADER_SIZE];
    let first_ok = read_window(source, 0, &mut first)?;
    tracing::trace!(offset = 0, complete = first_ok, "probed first sync header");

    // The second window is needed on both branches
    let mut second = [0u8; SYNC_HEADER_SIZE];
    let second_ok = read_window(source, SECOND_SECTOR_OFFSET, &mut second)?;
    tracing::trace!(
        offset = SECOND_SECTOR_OFFSET,
        complete = second_ok,
        "probed second sync header"
    );

    let layout = classify_windows(
        None,
        first_ok.then_some(&first[..]),
        second_ok.then_some(&second[..]),
    )
    .ok_or_else(|| {
        Mdf2IsoError::unknown_format(format!(
            "no recognised sync pattern at offset 0 or {}",
            SECOND_SECTOR_OFFSET
        ))
    })?;

    tracing::debug!(%layout, "detected source layout");
    Ok(layout)
}

/// Fill `buf` from `offset`, returning false if the source ends first
fn read_window<R: Read + Seek>(source: &mut R, offset: u64, buf: &mut [u8]) -> Result<bool> {
    source.seek(SeekFrom::Start(offset))?;
    match source.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

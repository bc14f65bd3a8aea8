/// Per-sector header/payload/trailer partition

use super::constants::*;
use super::SourceLayout;
use crate::error::{Mdf2IsoError, Result};

/// Requested output of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// Cooked 2048-byte user data sectors
    #[default]
    Iso,
    /// Raw sectors for a `.bin` file plus CUE sheet
    Cue,
    /// Raw sectors for a `.dat` file plus cdrdao TOC file
    Toc,
}

impl OutputMode {
    /// Build the mode from the `--cue` / `--toc` switches
    pub fn from_flags(cue: bool, toc: bool) -> Result<Self> {
        match (cue, toc) {
            (true, true) => Err(Mdf2IsoError::invalid_arguments(
                "--cue and --toc are mutually exclusive",
            )),
            (true, false) => Ok(OutputMode::Cue),
            (false, true) => Ok(OutputMode::Toc),
            (false, false) => Ok(OutputMode::Iso),
        }
    }

    /// Get a human-readable name for this mode
    pub fn name(&self) -> &'static str {
        match self {
            OutputMode::Iso => "ISO",
            OutputMode::Cue => "CUE",
            OutputMode::Toc => "TOC",
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How each source sector is split into skipped and copied regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorGeometry {
    /// Total bytes per source sector
    pub sector_size: u64,
    /// Bytes skipped before the payload
    pub header_skip: u64,
    /// Bytes copied to the output
    pub payload_size: u64,
    /// Bytes skipped after the payload (ECC/subchannel)
    pub trailer_skip: u64,
    /// Subchannel data is kept in the payload
    pub sub_channel: bool,
}

impl SectorGeometry {
    const fn new(sector_size: u64, header_skip: u64, payload_size: u64, trailer_skip: u64) -> Self {
        Self {
            sector_size,
            header_skip,
            payload_size,
            trailer_skip,
            sub_channel: false,
        }
    }

    /// MDF data sector kept whole apart from the subchannel
    pub const MDF_DATA_CUE: Self = Self::new(MDF_SECTOR_SIZE, 0, RAW_SECTOR_SIZE, SUBCHANNEL_SIZE);

    /// MDF data sector reduced to user data
    pub const MDF_DATA_ISO: Self = Self::new(
        MDF_SECTOR_SIZE,
        SECTOR_HEADER_SIZE,
        USER_DATA_SIZE,
        MDF_SECTOR_SIZE - SECTOR_HEADER_SIZE - USER_DATA_SIZE,
    );

    /// MDF data sector copied verbatim including subchannel
    pub const MDF_DATA_TOC: Self = Self {
        sub_channel: true,
        ..Self::new(MDF_SECTOR_SIZE, 0, MDF_SECTOR_SIZE, 0)
    };

    /// Raw sector copied verbatim
    pub const RAW_VERBATIM: Self = Self::new(RAW_SECTOR_SIZE, 0, RAW_SECTOR_SIZE, 0);

    /// Raw sector reduced to user data
    pub const RAW_ISO: Self = Self::new(
        RAW_SECTOR_SIZE,
        SECTOR_HEADER_SIZE,
        USER_DATA_SIZE,
        RAW_SECTOR_SIZE - SECTOR_HEADER_SIZE - USER_DATA_SIZE,
    );

    /// MDF audio sector demuxed to a 2352-byte frame
    pub const MDF_AUDIO: Self = Self::new(MDF_SECTOR_SIZE, 0, RAW_SECTOR_SIZE, SUBCHANNEL_SIZE);

    /// Whether the three regions exactly cover the sector
    pub fn is_consistent(&self) -> bool {
        self.header_skip + self.payload_size + self.trailer_skip == self.sector_size
    }

    /// Number of whole sectors in a source of `source_len` bytes
    pub fn sector_count(&self, source_len: u64) -> u64 {
        source_len / self.sector_size
    }

    /// Output length for `sectors` sectors
    pub fn output_len(&self, sectors: u64) -> u64 {
        sectors * self.payload_size
    }
}

/// The mode actually honoured for a layout
///
/// Audio tracks cannot be described by the MODE2 CUE sheet, so a CUE request
/// falls back to a plain image.
pub fn effective_mode(layout: SourceLayout, mode: OutputMode) -> OutputMode {
    match (layout, mode) {
        (SourceLayout::MdfAudio, OutputMode::Cue) => OutputMode::Iso,
        _ => mode,
    }
}

/// Resolve the sector geometry for a layout and output mode
pub fn resolve(layout: SourceLayout, mode: OutputMode) -> Result<SectorGeometry> {
    let geometry = match (layout, mode) {
        (SourceLayout::MdfData, OutputMode::Cue) => SectorGeometry::MDF_DATA_CUE,
        (SourceLayout::MdfData, OutputMode::Iso) => SectorGeometry::MDF_DATA_ISO,
        (SourceLayout::MdfData, OutputMode::Toc) => SectorGeometry::MDF_DATA_TOC,
        (SourceLayout::PlainRaw, OutputMode::Cue) => SectorGeometry::RAW_VERBATIM,
        (SourceLayout::PlainRaw, OutputMode::Iso) => SectorGeometry::RAW_ISO,
        (SourceLayout::PlainRaw, OutputMode::Toc) => SectorGeometry::RAW_VERBATIM,
        (SourceLayout::MdfAudio, _) => SectorGeometry::MDF_AUDIO,
        (SourceLayout::AlreadyIso9660, _) => return Err(Mdf2IsoError::AlreadyIso),
    };

    tracing::debug!(
        %layout,
        %mode,
        sector_size = geometry.sector_size,
        header_skip = geometry.header_skip,
        payload_size = geometry.payload_size,
        trailer_skip = geometry.trailer_skip,
        "resolved sector geometry"
    );
    Ok(geometry)
}

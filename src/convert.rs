/// End-to-end conversion of a source image file

use crate::error::{Mdf2IsoError, Result};
use crate::format::{detect_layout, effective_mode, resolve, OutputMode, SectorGeometry, SourceLayout};
use crate::io::{ConversionJob, DemuxStats};
use crate::progress::Progress;
use crate::sidecar::{self, Sidecar};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Options for a single conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    source: PathBuf,
    destination: Option<PathBuf>,
    mode: OutputMode,
}

impl ConvertOptions {
    /// Convert `source` to an ISO next to it
    pub fn new<P: Into<PathBuf>>(source: P) -> Self {
        Self {
            source: source.into(),
            destination: None,
            mode: OutputMode::Iso,
        }
    }

    /// Set the destination path
    pub fn destination<P: Into<PathBuf>>(mut self, destination: P) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Set the output mode
    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Requested output mode
    pub fn output_mode(&self) -> OutputMode {
        self.mode
    }

    /// Destination path, defaulting to the source with an `.iso` extension
    pub fn destination_path(&self) -> PathBuf {
        self.destination
            .clone()
            .unwrap_or_else(|| self.source.with_extension("iso"))
    }

    /// Check that writing the destination cannot clobber the source
    ///
    /// Paths are compared as written and, when the destination already
    /// exists, after resolving both to canonical form.
    pub fn validate(&self) -> Result<()> {
        let dest = self.destination_path();
        let same = dest == self.source
            || (dest.exists() && fs::canonicalize(&dest)? == fs::canonicalize(&self.source)?);

        if same {
            return Err(Mdf2IsoError::invalid_arguments(format!(
                "destination {} is the same file as the source",
                dest.display()
            )));
        }
        Ok(())
    }
}

/// Result of a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The source is already ISO-9660; nothing was written
    AlreadyIso,
    /// The source was converted
    Converted(ConversionReport),
}

/// Details of a completed conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Detected source layout
    pub layout: SourceLayout,
    /// Mode actually used
    pub mode: OutputMode,
    /// Geometry applied to every sector
    pub geometry: SectorGeometry,
    /// Demux totals
    pub stats: DemuxStats,
    /// Final location of the converted data
    pub output: PathBuf,
    /// CUE or TOC descriptor, if one was written
    pub sidecar: Option<Sidecar>,
    /// A CUE request was dropped because the source is audio
    pub cue_overridden: bool,
}

/// Convert the source described by `options`
///
/// The source is probed before anything else, so an ISO-9660 source is
/// reported as such whatever the destination. The destination is only
/// validated and created once the layout is known to be convertible. On a
/// demux failure the partial destination is left in place.
pub fn convert<P: Progress + ?Sized>(
    options: &ConvertOptions,
    progress: &mut P,
) -> Result<ConversionOutcome> {
    let mut source = BufReader::new(File::open(&options.source)?);
    let layout = detect_layout(&mut source)?;
    if !layout.is_convertible() {
        tracing::info!(source = %options.source.display(), "source is already ISO-9660");
        return Ok(ConversionOutcome::AlreadyIso);
    }

    let mode = effective_mode(layout, options.mode);
    let cue_overridden = mode != options.mode;
    if cue_overridden {
        tracing::warn!(%layout, "CUE sheets are not written for audio tracks, writing a plain image");
    }
    let geometry = resolve(layout, mode)?;

    options.validate()?;
    let dest = options.destination_path();
    tracing::info!(
        source = %options.source.display(),
        destination = %dest.display(),
        %layout,
        %mode,
        "converting"
    );

    let writer = BufWriter::new(File::create(&dest)?);
    // The demuxer seeks twice per sector, which would discard a read buffer
    let mut job = ConversionJob::new(source.into_inner(), writer, geometry)?;
    let stats = job.run(progress)?;

    // Close the destination before it is renamed
    let writer = job.finish()?;
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;

    let sidecar = match mode {
        OutputMode::Cue => Some(sidecar::write_cue(&dest)?),
        OutputMode::Toc => Some(sidecar::write_toc(&dest, geometry.sub_channel)?),
        OutputMode::Iso => None,
    };
    let output = sidecar
        .as_ref()
        .map(|s| s.data_file.clone())
        .unwrap_or(dest);

    Ok(ConversionOutcome::Converted(ConversionReport {
        layout,
        mode,
        geometry,
        stats,
        output,
        sidecar,
        cue_overridden,
    }))
}

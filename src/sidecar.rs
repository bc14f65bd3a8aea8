/// CUE and TOC descriptors for burning tools

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// A descriptor written next to its data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidecar {
    /// The `.cue` or `.toc` file
    pub descriptor: PathBuf,
    /// The renamed `.bin` or `.dat` file it points at
    pub data_file: PathBuf,
}

/// Render a single-track MODE2/2352 CUE sheet for `bin_name`
pub fn cue_sheet(bin_name: &str) -> String {
    format!(
        "FILE \"{}\" BINARY\n  TRACK 01 MODE2/2352\n    INDEX 01 00:00:00\n",
        bin_name
    )
}

/// Render a cdrdao TOC file for `dat_name`
///
/// `sub_channel` adds `RW_RAW` for data files that still carry the 96 bytes
/// of subchannel after each sector.
pub fn toc_file(dat_name: &str, sub_channel: bool) -> String {
    let mut toc = String::from("CD_ROM\n// Track 1\nTRACK MODE1_RAW");
    if sub_channel {
        toc.push_str(" RW_RAW");
    }
    toc.push('\n');
    toc.push_str("NO COPY\n");
    toc.push_str(&format!("DATAFILE \"{}\"\n", dat_name));
    toc
}

/// Write `<dest>.cue` and rename `dest` to `<dest>.bin`
pub fn write_cue<P: AsRef<Path>>(dest: P) -> Result<Sidecar> {
    let dest = dest.as_ref();
    let cue = dest.with_extension("cue");
    let bin = dest.with_extension("bin");

    fs::write(&cue, cue_sheet(&descriptor_name(&bin)))?;
    fs::rename(dest, &bin)?;

    tracing::info!(cue = %cue.display(), bin = %bin.display(), "wrote cue sheet");
    Ok(Sidecar {
        descriptor: cue,
        data_file: bin,
    })
}

/// Write `<dest>.toc` and rename `dest` to `<dest>.dat`
pub fn write_toc<P: AsRef<Path>>(dest: P, sub_channel: bool) -> Result<Sidecar> {
    let dest = dest.as_ref();
    let toc = dest.with_extension("toc");
    let dat = dest.with_extension("dat");

    fs::write(&toc, toc_file(&descriptor_name(&dat), sub_channel))?;
    fs::rename(dest, &dat)?;

    tracing::info!(toc = %toc.display(), dat = %dat.display(), sub_channel, "wrote toc file");
    Ok(Sidecar {
        descriptor: toc,
        data_file: dat,
    })
}

/// Data file path as written inside a descriptor, without a leading `./`
fn descriptor_name(path: &Path) -> String {
    let name = path.to_string_lossy();
    name.strip_prefix("./")
        .or_else(|| name.strip_prefix(".\\"))
        .unwrap_or(name.as_ref())
        .to_string()
}

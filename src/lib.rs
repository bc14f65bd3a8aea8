/*!
# mdf2iso

A Rust library for converting MDF and raw CD sector dumps into ISO-9660 images.

## Features

- Detect plain raw (2352), MDF data and MDF audio (2448) sector layouts from their sync patterns
- Strip sync, header, ECC and subchannel bytes down to 2048-byte user data
- Keep full raw sectors for burning, with a generated CUE sheet or cdrdao TOC file
- Idiomatic Rust API with comprehensive error handling

## Quick Start

```rust,no_run
use mdf2iso::{convert, ConversionOutcome, ConsoleProgress, ConvertOptions, OutputMode};

let options = ConvertOptions::new("game.mdf").mode(OutputMode::Cue);

match convert(&options, &mut ConsoleProgress::stdout())? {
    ConversionOutcome::AlreadyIso => println!("Nothing to do"),
    ConversionOutcome::Converted(report) => {
        println!("{} sectors from {} source", report.stats.sectors, report.layout);
    }
}
# Ok::<(), mdf2iso::Mdf2IsoError>(())
```

The lower level pieces can be used on any seekable stream:

```rust
use mdf2iso::{detect_layout, resolve, ConversionJob, NoProgress, OutputMode, SourceLayout};
use mdf2iso::format::{SYNC_HEADER, SYNC_HEADER_MDF};
use std::io::Cursor;

let mut image = vec![0u8; 2448 * 2];
image[..12].copy_from_slice(&SYNC_HEADER);
image[2352..2364].copy_from_slice(&SYNC_HEADER_MDF);

let mut source = Cursor::new(image);
let layout = detect_layout(&mut source)?;
assert_eq!(layout, SourceLayout::MdfData);

let geometry = resolve(layout, OutputMode::Iso)?;
let mut job = ConversionJob::new(source, Vec::new(), geometry)?;
job.run(&mut NoProgress)?;
assert_eq!(job.finish()?.len(), 2 * 2048);
# Ok::<(), mdf2iso::Mdf2IsoError>(())
```

## Modules

- `format`: sync patterns, layout detection and sector geometry
- `io`: the sector demuxer
- `progress`: progress reporting
- `sidecar`: CUE and TOC descriptors
- `convert`: file-level conversion pipeline
- `error`: Error types and Result alias
*/

#![warn(missing_docs)]

/// File-level conversion pipeline
pub mod convert;
/// Error types and Result alias
pub mod error;
/// Sync patterns, layout detection and sector geometry
pub mod format;
/// Streaming I/O for sector conversion
pub mod io;
/// Progress reporting
pub mod progress;
/// CUE and TOC descriptors
pub mod sidecar;

// Re-export common types
pub use convert::{convert, ConversionOutcome, ConversionReport, ConvertOptions};
pub use error::{Mdf2IsoError, Result};
pub use format::{
    classify_windows, detect_layout, effective_mode, resolve, OutputMode, SectorGeometry,
    SourceLayout,
};
pub use io::{ConversionJob, DemuxStats};
pub use progress::{progress_bar, ConsoleProgress, NoProgress, Progress, RecordedProgress};
pub use sidecar::{cue_sheet, toc_file, write_cue, write_toc, Sidecar};

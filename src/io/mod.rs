/// Streaming I/O for sector conversion

/// Sector demuxer
pub mod demux;

pub use demux::{ConversionJob, DemuxStats};

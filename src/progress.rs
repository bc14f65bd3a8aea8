/// Conversion progress reporting

use std::io::Write;

/// Number of columns in the progress bar
pub const BAR_WIDTH: u64 = 20;

/// Line written once the conversion completes
pub const FINISHED_LINE: &str = "100%[:====================:]";

/// Receiver of progress updates from the demuxer
pub trait Progress {
    /// Called when the completed percentage changes
    fn update(&mut self, percent: u64);

    /// Called once after the last sector
    fn finish(&mut self);
}

/// Render a progress line such as `45% [:========>            :]`
pub fn progress_bar(percent: u64) -> String {
    let percent = percent.min(100);
    let bars = (percent / 5) as usize;
    let mut line = format!("{}% [:", percent);
    line.push_str(&"=".repeat(bars));
    line.push('>');
    line.push_str(&" ".repeat(BAR_WIDTH as usize - bars));
    line.push_str(":]");
    line
}

/// Progress bar redrawn in place on a terminal
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    /// Create a progress bar writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleProgress<std::io::Stdout> {
    /// Progress bar on standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

// Write errors on the display are ignored
impl<W: Write> Progress for ConsoleProgress<W> {
    fn update(&mut self, percent: u64) {
        let _ = write!(self.out, "{}\r", progress_bar(percent));
        let _ = self.out.flush();
    }

    fn finish(&mut self) {
        let _ = writeln!(self.out, "{}", FINISHED_LINE);
        let _ = self.out.flush();
    }
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&mut self, _percent: u64) {}
    fn finish(&mut self) {}
}

/// Records every update, mostly useful in tests
#[derive(Debug, Default, Clone)]
pub struct RecordedProgress {
    /// Percentages in the order they were reported
    pub updates: Vec<u64>,
    /// Whether `finish` was called
    pub finished: bool,
}

impl Progress for RecordedProgress {
    fn update(&mut self, percent: u64) {
        self.updates.push(percent);
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

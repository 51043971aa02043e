use std::fmt::{Display, Formatter};
use std::num::{NonZero, NonZeroUsize};
use std::time::Duration;

mod extraction;
mod formats;
mod report;


pub use extraction::*;
pub use formats::{detect_type, ArchiveFormat, DetectedType, ExtractError, TarCompression};
pub use report::RunReport;

/// Default per-process limit for the external `7z` and `unrar` tools.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(60 * 60);

pub fn default_threads() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZero::new(1).unwrap())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExtractionOptions {
    pub threads: NonZeroUsize,
    pub command_timeout: Duration,
    /// Maximum number of levels scanned for archives, the first scan included.
    pub max_depth: Option<NonZeroUsize>,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            max_depth: None,
        }
    }
}

impl Display for ExtractionOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ExtractionOptions(threads={}, command_timeout={}s, max_depth={:?})",
            self.threads,
            self.command_timeout.as_secs(),
            self.max_depth
        )
    }
}

impl ExtractionOptions {
    /// Returns `None` once the depth budget is exhausted.
    #[inline(always)]
    pub fn descend(self) -> Option<Self> {
        match self.max_depth {
            None => Some(self),
            Some(depth) => {
                let max_depth = NonZeroUsize::new(depth.get() - 1)?;
                Some(Self {
                    max_depth: Some(max_depth),
                    ..self
                })
            }
        }
    }
}

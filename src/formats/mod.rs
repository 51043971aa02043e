use crate::ExtractionOptions;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

mod command;
mod detect;
mod rar;
mod sevenz;
mod tar;
mod zip;

pub use detect::{detect_type, DetectedType};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] ::zip::result::ZipError),
    #[error("rar error: {0}")]
    Rar(#[from] ::unrar::error::UnrarError),
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    ExitStatus {
        program: &'static str,
        status: std::process::ExitStatus,
    },
    #[error("{program} timed out after {}s", .timeout.as_secs())]
    Timeout {
        program: &'static str,
        timeout: Duration,
    },
    #[error("{primary}; fallback also failed: {fallback}")]
    Fallback {
        primary: Box<ExtractError>,
        fallback: Box<ExtractError>,
    },
    #[error("Could not determine file type: {0}")]
    Undetermined(std::io::Error),
    #[error("Unsupported file format {0}")]
    Unsupported(String),
}

/// Compression layer around a tar stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum TarCompression {
    #[strum(to_string = "none")]
    None,
    #[strum(to_string = "gzip")]
    Gzip,
    #[strum(to_string = "bzip2")]
    Bzip2,
    #[strum(to_string = "xz")]
    Xz,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum ArchiveFormat {
    #[strum(to_string = "7z")]
    SevenZip,
    #[strum(to_string = "zip")]
    Zip,
    /// Plain or compressed tar; the compression is sniffed at extraction time.
    #[strum(to_string = "tar")]
    Tar,
    #[strum(to_string = "rar")]
    Rar,
}

impl ArchiveFormat {
    #[tracing::instrument(skip(self, options), fields(format = %self))]
    pub fn extract(
        &self,
        source: &Path,
        dest: &Path,
        options: ExtractionOptions,
    ) -> Result<(), ExtractError> {
        debug!(?dest, "extracting");
        match self {
            ArchiveFormat::SevenZip => sevenz::extract(source, dest, options),
            ArchiveFormat::Zip => zip::extract(source, dest),
            ArchiveFormat::Tar => tar::extract(source, dest),
            ArchiveFormat::Rar => rar::extract(source, dest, options),
        }
    }
}

use crate::formats::ArchiveFormat;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::debug;

/// Reported when the content matches no known signature.
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Content-derived classification of a candidate archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedType {
    Archive(ArchiveFormat),
    /// Holds the MIME type that was sniffed.
    Unsupported(String),
}

impl DetectedType {
    pub fn from_mime(mime: &str) -> Self {
        let format = match mime {
            "application/x-7z-compressed" | "application/x-7z" => ArchiveFormat::SevenZip,
            "application/zip" => ArchiveFormat::Zip,
            "application/x-tar" | "application/gzip" | "application/x-bzip2"
            | "application/x-xz" => ArchiveFormat::Tar,
            "application/vnd.rar" | "application/x-rar" => ArchiveFormat::Rar,
            other => return DetectedType::Unsupported(other.to_string()),
        };
        DetectedType::Archive(format)
    }
}

impl Display for DetectedType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectedType::Archive(format) => write!(f, "{format}"),
            DetectedType::Unsupported(mime) => write!(f, "unsupported ({mime})"),
        }
    }
}

/// Sniffs the type of `path` from its leading bytes. The file name is never consulted.
///
/// An `Err` means the type could not be determined at all, e.g. the file is unreadable.
pub fn detect_type(path: &Path) -> std::io::Result<DetectedType> {
    let mime = infer::get_from_path(path)?
        .map(|kind| kind.mime_type())
        .unwrap_or(UNKNOWN_MIME);
    let detected = DetectedType::from_mime(mime);
    debug!(?path, mime, %detected, "detected type");
    Ok(detected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    fn write_temp(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(data)
            .unwrap();
        path
    }

    #[test]
    fn maps_known_mime_types() {
        for (mime, format) in [
            ("application/x-7z-compressed", ArchiveFormat::SevenZip),
            ("application/x-7z", ArchiveFormat::SevenZip),
            ("application/zip", ArchiveFormat::Zip),
            ("application/x-tar", ArchiveFormat::Tar),
            ("application/gzip", ArchiveFormat::Tar),
            ("application/x-bzip2", ArchiveFormat::Tar),
            ("application/x-xz", ArchiveFormat::Tar),
            ("application/vnd.rar", ArchiveFormat::Rar),
            ("application/x-rar", ArchiveFormat::Rar),
        ] {
            assert_eq!(DetectedType::from_mime(mime), DetectedType::Archive(format));
        }
    }

    #[test]
    fn mime_matching_is_case_sensitive() {
        assert_matches!(
            DetectedType::from_mime("Application/Zip"),
            DetectedType::Unsupported(_)
        );
        assert_matches!(
            DetectedType::from_mime("application/pdf"),
            DetectedType::Unsupported(m) if m == "application/pdf"
        );
    }

    #[test]
    fn ignores_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(dir.path(), "garbage.zip", b"definitely not a zip file");
        assert_eq!(
            detect_type(&path).unwrap(),
            DetectedType::Unsupported(UNKNOWN_MIME.to_string())
        );

        let gz = {
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(b"hello world").unwrap();
            encoder.finish().unwrap()
        };
        let path = write_temp(dir.path(), "misnamed.rar", &gz);
        assert_eq!(
            detect_type(&path).unwrap(),
            DetectedType::Archive(ArchiveFormat::Tar)
        );
    }

    #[test]
    fn missing_file_is_undetermined() {
        let dir = tempfile::tempdir().unwrap();
        assert!(detect_type(&dir.path().join("missing.zip")).is_err());
    }
}

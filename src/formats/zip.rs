use crate::formats::ExtractError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;
use zip::ZipArchive;

pub fn extract(source: &Path, dest: &Path) -> Result<(), ExtractError> {
    let reader = BufReader::with_capacity(1024 * 1024, File::open(source)?);
    let mut archive = ZipArchive::new(reader)?;
    trace!(entries = archive.len(), "opened zip");
    // Entries whose names escape `dest` are rejected by the zip crate.
    archive.extract(dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{p, write_file, zip_archive};
    use assert_matches::assert_matches;

    #[test]
    fn extracts_all_entries() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_file(
            dir.path(),
            "test.zip",
            zip_archive([(p("a.txt"), "first"), (p("nested/b.txt"), "second")]),
        );
        let dest = dir.path().join("test");
        extract(&source, &dest).unwrap();
        assert_eq!(std::fs::read(dest.join("a.txt")).unwrap(), b"first");
        assert_eq!(std::fs::read(dest.join("nested/b.txt")).unwrap(), b"second");
    }

    #[test]
    fn corrupt_header() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_file(dir.path(), "bad.zip", b"PK\x03\x04 this is not a zip");
        assert_matches!(
            extract(&source, &dir.path().join("bad")),
            Err(ExtractError::Zip(_))
        );
    }
}

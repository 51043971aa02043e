use crate::formats::{command, ExtractError};
use crate::ExtractionOptions;
use std::ffi::OsStr;
use std::path::Path;
use tracing::warn;
use unrar::Archive;

const FALLBACK_PROGRAM: &str = "unrar";

/// Extracts with the bundled unrar library, retrying with the `unrar` binary
/// before giving up.
pub fn extract(source: &Path, dest: &Path, options: ExtractionOptions) -> Result<(), ExtractError> {
    let primary = match extract_in_process(source, dest) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    warn!(?source, error = %primary, "rar library failed, falling back to {FALLBACK_PROGRAM}");
    extract_with_command(source, dest, options).map_err(|fallback| ExtractError::Fallback {
        primary: Box::new(primary),
        fallback: Box::new(fallback),
    })
}

fn extract_in_process(source: &Path, dest: &Path) -> Result<(), ExtractError> {
    let mut archive = Archive::new(source).open_for_processing()?;
    while let Some(header) = archive.read_header()? {
        archive = header.extract_with_base(dest)?;
    }
    Ok(())
}

fn extract_with_command(
    source: &Path,
    dest: &Path,
    options: ExtractionOptions,
) -> Result<(), ExtractError> {
    // unrar treats a destination without a trailing separator as a file name
    let mut dest = dest.as_os_str().to_owned();
    dest.push(std::path::MAIN_SEPARATOR_STR);
    let args = [
        OsStr::new("x"),
        OsStr::new("-o+"),
        OsStr::new("-y"),
        source.as_os_str(),
        dest.as_os_str(),
    ];
    command::run(FALLBACK_PROGRAM, &args, options.command_timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::write_file;
    use assert_matches::assert_matches;

    #[test]
    fn both_strategies_fail_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_file(dir.path(), "bad.rar", "definitely not a rar archive");
        let result = extract(
            &source,
            &dir.path().join("bad"),
            ExtractionOptions::default(),
        );
        assert_matches!(result, Err(ExtractError::Fallback { .. }));
    }
}

use crate::formats::ExtractError;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Suffixes that mark a file as a candidate archive. Longest first, so `x.tar.gz`
/// strips to `x` rather than `x.tar`.
pub const ARCHIVE_SUFFIXES: &[&str] = &[
    ".tar.bz2", ".tar.gz", ".tar.xz", ".tbz2", ".tgz", ".txz", ".tar", ".zip", ".rar", ".7z",
];

/// Returns the file name of `path` without its archive suffix, or `None` if the
/// name does not end in one of [ARCHIVE_SUFFIXES].
pub fn strip_archive_suffix(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    ARCHIVE_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
}

/// One archive to extract, and where to put its contents.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct ArchiveTask {
    #[new(into)]
    source: PathBuf,
    #[new(into)]
    dest: PathBuf,
}

impl ArchiveTask {
    /// Builds a task extracting `source` into a sibling directory named after it.
    pub fn for_archive(source: impl Into<PathBuf>) -> Option<Self> {
        let source = source.into();
        let stem = strip_archive_suffix(&source)?;
        let dest = source.with_file_name(stem);
        Some(Self { source, dest })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Fallback destination for when [Self::dest] is taken by a sibling archive:
    /// the full file name with dots replaced, e.g. `a.tar.gz` -> `a_tar_gz`,
    /// then `a_tar_gz_2` and so on.
    pub fn alternate_dest(&self, attempt: usize) -> PathBuf {
        let name = self
            .source
            .file_name()
            .map(|name| name.to_string_lossy().replace('.', "_"))
            .unwrap_or_default();
        let name = match attempt {
            0 | 1 => name,
            n => format!("{name}_{n}"),
        };
        self.source.with_file_name(name)
    }

    pub fn with_dest(self, dest: impl Into<PathBuf>) -> Self {
        Self {
            dest: dest.into(),
            ..self
        }
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }
}

impl Display for ArchiveTask {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source.display(), self.dest.display())
    }
}

#[derive(Debug)]
pub struct ExtractionOutcome {
    pub task: ArchiveTask,
    pub result: Result<(), ExtractError>,
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn source(&self) -> &Path {
        self.task.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_longest_suffix() {
        for (name, stem) in [
            ("a.zip", "a"),
            ("a.7z", "a"),
            ("a.rar", "a"),
            ("a.tar", "a"),
            ("a.tar.gz", "a"),
            ("a.tgz", "a"),
            ("a.tar.bz2", "a"),
            ("a.tbz2", "a"),
            ("a.tar.xz", "a"),
            ("a.txz", "a"),
            ("v1.2.zip", "v1.2"),
        ] {
            assert_eq!(strip_archive_suffix(Path::new(name)), Some(stem), "{name}");
        }
    }

    #[test]
    fn rejects_non_archives() {
        for name in ["a.txt", "a.gz", "a.ZIP", "zip", ".zip", "a.zip.txt"] {
            assert_eq!(strip_archive_suffix(Path::new(name)), None, "{name}");
        }
    }

    #[test]
    fn alternate_destinations() {
        let task = ArchiveTask::for_archive("/data/in/a.tar.gz").unwrap();
        assert_eq!(task.alternate_dest(1), Path::new("/data/in/a_tar_gz"));
        assert_eq!(task.alternate_dest(2), Path::new("/data/in/a_tar_gz_2"));
        let task = task.with_dest("/elsewhere");
        assert_eq!(task.dest(), Path::new("/elsewhere"));
        assert_eq!(task.source(), Path::new("/data/in/a.tar.gz"));
    }

    #[test]
    fn destination_is_sibling() {
        let task = ArchiveTask::for_archive("/data/in/x.tar.gz").unwrap();
        assert_eq!(task.source(), Path::new("/data/in/x.tar.gz"));
        assert_eq!(task.dest(), Path::new("/data/in/x"));
        assert!(ArchiveTask::for_archive("/data/in/readme.md").is_none());
    }
}

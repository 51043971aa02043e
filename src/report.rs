use crate::extraction::{ExtractionStats, FailedArchive};
use indicatif::HumanDuration;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Result of one top-level run.
#[derive(Debug, derive_new::new)]
pub struct RunReport {
    pub stats: ExtractionStats,
    pub failures: Vec<FailedArchive>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.stats.failed == 0 && self.failures.is_empty()
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rows = [
            ("Total files processed", self.stats.files),
            ("Total directories processed", self.stats.dirs),
            ("Successful extractions", self.stats.succeeded),
            ("Failed extractions", self.stats.failed),
        ];
        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        writeln!(f, "Extraction Summary")?;
        for (name, count) in rows {
            writeln!(f, "  {name:>width$} | {count}")?;
        }
        if !self.failures.is_empty() {
            writeln!(f, "Failed to extract the following files:")?;
            for (i, failure) in self.failures.iter().enumerate() {
                writeln!(f, "  {}. {failure}", i + 1)?;
            }
        }
        write!(f, "Extraction complete in {}.", HumanDuration(self.elapsed))
    }
}

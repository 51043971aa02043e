use crate::extraction::ExtractionOutcome;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ExtractionStats {
    pub files: usize,
    pub dirs: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ExtractionStats {
    pub fn record(&mut self, outcome: &ExtractionOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Archives that were attempted, whatever the result.
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for ExtractionStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            files: self.files + rhs.files,
            dirs: self.dirs + rhs.dirs,
            succeeded: self.succeeded + rhs.succeeded,
            failed: self.failed + rhs.failed,
        }
    }
}

impl AddAssign for ExtractionStats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ExtractionStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> FromIterator<&'a ExtractionOutcome> for ExtractionStats {
    fn from_iter<T: IntoIterator<Item = &'a ExtractionOutcome>>(iter: T) -> Self {
        let mut stats = Self::default();
        for outcome in iter {
            stats.record(outcome);
        }
        stats
    }
}

impl Display for ExtractionStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "files={} dirs={} succeeded={} failed={}",
            self.files, self.dirs, self.succeeded, self.failed
        )
    }
}

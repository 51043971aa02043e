use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct FailedArchive {
    pub path: PathBuf,
    pub reason: String,
}

impl Display for FailedArchive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Append-only record of archives that failed to extract during one run.
/// Safe to share between extraction workers.
#[derive(Debug, Default)]
pub struct FailedFiles {
    inner: Mutex<Vec<FailedArchive>>,
}

impl FailedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, failure: FailedArchive) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(failure);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> Vec<FailedArchive> {
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

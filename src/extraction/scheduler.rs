use crate::extraction::{extract_archive, ArchiveTask, ExtractionOutcome, FailedFiles};
use crate::ExtractionOptions;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Cooperative cancellation flag. Cancelling stops new extractions from being
/// started; ones already running are left to finish.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Runs the extractions of one directory level on a bounded worker pool.
#[derive(Debug)]
pub struct Scheduler {
    pool: rayon::ThreadPool,
    cancel: CancelHandle,
}

impl Scheduler {
    pub fn new(threads: NonZeroUsize) -> anyhow::Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.into())
            .thread_name(|i| format!("extract-{i}"))
            .build()?;
        Ok(Self {
            pool,
            cancel: CancelHandle::default(),
        })
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Extracts every task and returns once all of them have finished. Outcomes
    /// are in no particular order. Tasks not yet started when the run is
    /// cancelled produce no outcome.
    pub fn run(
        &self,
        tasks: Vec<ArchiveTask>,
        options: ExtractionOptions,
        failures: &FailedFiles,
    ) -> Vec<ExtractionOutcome> {
        trace!(tasks = tasks.len(), "scheduling");
        self.pool.install(|| {
            tasks
                .into_par_iter()
                .filter_map(|task| {
                    if self.cancel.is_cancelled() {
                        debug!(%task, "cancelled, skipping");
                        return None;
                    }
                    Some(extract_archive(task, options, failures))
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{p, tar_archive, write_file, zip_archive};
    use crate::ExtractionStats;

    #[test]
    fn every_task_completes() {
        let dir = tempfile::tempdir().unwrap();
        let mut tasks = vec![];
        for i in 0..16 {
            let data = if i % 2 == 0 {
                zip_archive([(p("file.txt"), format!("zip {i}"))])
            } else {
                tar_archive([(p("file.txt"), format!("tar {i}"))])
            };
            let name = if i % 2 == 0 { format!("{i}.zip") } else { format!("{i}.tar") };
            let source = write_file(dir.path(), &name, data);
            tasks.push(ArchiveTask::for_archive(source).unwrap());
        }
        write_file(dir.path(), "broken.zip", "garbage");
        tasks.push(ArchiveTask::for_archive(dir.path().join("broken.zip")).unwrap());

        let scheduler = Scheduler::new(NonZeroUsize::new(4).unwrap()).unwrap();
        let failures = FailedFiles::new();
        let outcomes = scheduler.run(tasks, ExtractionOptions::default(), &failures);

        let stats: ExtractionStats = outcomes.iter().collect();
        assert_eq!(stats.succeeded, 16);
        assert_eq!(stats.failed, 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("7/file.txt")).unwrap(),
            "tar 7"
        );
    }

    #[test]
    fn cancelled_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_file(dir.path(), "a.zip", zip_archive([(p("a.txt"), "a")]));
        let scheduler = Scheduler::new(NonZeroUsize::new(2).unwrap()).unwrap();
        scheduler.cancel_handle().cancel();
        let outcomes = scheduler.run(
            vec![ArchiveTask::for_archive(source).unwrap()],
            ExtractionOptions::default(),
            &FailedFiles::new(),
        );
        assert!(outcomes.is_empty());
        assert!(!dir.path().join("a").exists());
    }
}

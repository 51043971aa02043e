use crate::extraction::{
    strip_archive_suffix, ArchiveTask, CancelHandle, ExtractionOutcome, ExtractionStats,
    FailedFiles, Scheduler,
};
use crate::{ExtractionOptions, RunReport};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Invalid file path {0}")]
    NotAFile(PathBuf),
    #[error("Could not create output directory {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a single scan of a directory found: how many entries it visited and the
/// archives to extract.
#[derive(Debug, Default)]
pub struct LevelScan {
    pub stats: ExtractionStats,
    pub tasks: Vec<ArchiveTask>,
}

/// Lists everything below `dir` and picks out candidate archives by file name.
pub fn scan_level(dir: &Path) -> LevelScan {
    let mut scan = LevelScan::default();
    let entries = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error reading {}: {e}", e.path().unwrap_or(dir).display());
                continue;
            }
        };
        // Links are classified by their target but never descended into
        let (is_dir, is_file) = if entry.path_is_symlink() {
            (entry.path().is_dir(), entry.path().is_file())
        } else {
            (entry.file_type().is_dir(), entry.file_type().is_file())
        };
        if is_dir {
            scan.stats.dirs += 1;
        } else if is_file {
            scan.stats.files += 1;
            if let Some(task) = ArchiveTask::for_archive(entry.into_path()) {
                scan.tasks.push(task);
            }
        }
    }
    scan
}

/// Gives every task of one level its own destination. The first task claiming a
/// name keeps it, later ones get [ArchiveTask::alternate_dest].
fn assign_destinations(tasks: Vec<ArchiveTask>) -> Vec<ArchiveTask> {
    let mut claimed = HashSet::with_capacity(tasks.len());
    tasks
        .into_iter()
        .map(|task| {
            let mut dest = task.dest().to_path_buf();
            let mut attempt = 0;
            while !claimed.insert(dest.clone()) {
                attempt += 1;
                dest = task.alternate_dest(attempt);
            }
            if dest != task.dest() {
                debug!(%task, ?dest, "destination already claimed, renaming");
                task.with_dest(dest)
            } else {
                task
            }
        })
        .collect()
}

/// Creates the destination directory of every task, reusing existing ones.
/// Tasks whose destination cannot be created are dropped without being run.
fn prepare_destinations(tasks: Vec<ArchiveTask>) -> Vec<ArchiveTask> {
    tasks
        .into_iter()
        .filter(|task| match std::fs::create_dir_all(task.dest()) {
            Ok(()) => true,
            Err(e) => {
                error!("Skipping {task}, destination could not be created: {e}");
                false
            }
        })
        .collect()
}

fn remove_archive(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(?path, "removed archive"),
        Err(e) => error!("Error removing file {}: {e}", path.display()),
    }
}

/// Extracts archives beneath a directory, then the archives exposed by that
/// extraction, until none are left.
#[derive(Debug)]
pub struct Walker {
    scheduler: Scheduler,
    options: ExtractionOptions,
}

impl Display for Walker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Walker(options={})", self.options)
    }
}

impl Walker {
    pub fn new(options: ExtractionOptions) -> anyhow::Result<Self> {
        let scheduler = Scheduler::new(options.threads)?;
        Ok(Self { scheduler, options })
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.scheduler.cancel_handle()
    }

    /// Extracts `archive` into `output_root/<archive name without suffix>` and then
    /// everything nested inside it. The input archive itself is left in place.
    pub fn run(&self, archive: &Path, output_root: &Path) -> Result<RunReport, InputError> {
        if !archive.is_file() {
            return Err(InputError::NotAFile(archive.to_path_buf()));
        }
        let stem = strip_archive_suffix(archive)
            .map(ToOwned::to_owned)
            .or_else(|| {
                archive
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .ok_or_else(|| InputError::NotAFile(archive.to_path_buf()))?;
        let dest = output_root.join(stem);
        std::fs::create_dir_all(&dest).map_err(|source| InputError::Output {
            path: dest.clone(),
            source,
        })?;

        let start = Instant::now();
        let failures = FailedFiles::new();
        info!("Extracting main archive: {}", archive.display());
        let outcomes = self.scheduler.run(
            vec![ArchiveTask::new(archive, &dest)],
            self.options,
            &failures,
        );
        let mut stats: ExtractionStats = outcomes.iter().collect();
        if stats.succeeded == 1 {
            info!("Main archive extracted successfully.");
        } else {
            error!("Failed to extract main archive.");
        }
        let mut handled: HashSet<PathBuf> = outcomes
            .iter()
            .map(|outcome| outcome.source().to_path_buf())
            .collect();
        stats += self.walk_level(&dest, self.options, &failures, &mut handled);
        Ok(RunReport::new(stats, failures.into_inner(), start.elapsed()))
    }

    /// Extracts every archive beneath `root`, in place.
    pub fn extract_tree(&self, root: &Path) -> RunReport {
        let start = Instant::now();
        let failures = FailedFiles::new();
        let stats = self.walk_level(root, self.options, &failures, &mut HashSet::new());
        RunReport::new(stats, failures.into_inner(), start.elapsed())
    }

    /// `handled` holds every archive already dispatched during this run. A reused
    /// destination can hold archives that the parent level picked up, and those
    /// are not run again.
    #[tracing::instrument(skip(self, options, failures, handled), fields(%options))]
    fn walk_level(
        &self,
        dir: &Path,
        options: ExtractionOptions,
        failures: &FailedFiles,
        handled: &mut HashSet<PathBuf>,
    ) -> ExtractionStats {
        let LevelScan { mut stats, tasks } = scan_level(dir);
        let tasks: Vec<_> = tasks
            .into_iter()
            .filter(|task| !handled.contains(task.source()))
            .collect();
        if tasks.is_empty() {
            return stats;
        }
        debug!(archives = tasks.len(), "found archives");

        let tasks = prepare_destinations(assign_destinations(tasks));
        handled.extend(tasks.iter().map(|task| task.source().to_path_buf()));
        let outcomes = self.scheduler.run(tasks, options, failures);
        stats += outcomes.iter().collect::<ExtractionStats>();

        match options.descend() {
            Some(child_options) => {
                let mut visited = HashSet::with_capacity(outcomes.len());
                for dest in outcomes.iter().map(|outcome| outcome.task.dest()) {
                    if self.scheduler.is_cancelled() {
                        info!("Cancelled, not descending into {}", dest.display());
                        break;
                    }
                    if visited.insert(dest) {
                        stats += self.walk_level(dest, child_options, failures, handled);
                    }
                }
            }
            None => debug!("depth limit reached, not descending"),
        }

        outcomes
            .iter()
            .filter(|outcome| outcome.is_success())
            .map(ExtractionOutcome::source)
            .for_each(remove_archive);
        debug!(%stats, "level finished");
        stats
    }
}

use crate::extraction::{ArchiveTask, ExtractionOutcome, FailedArchive, FailedFiles};
use crate::formats::{detect_type, DetectedType, ExtractError};
use crate::ExtractionOptions;
use std::time::Instant;
use tracing::{error, info, warn};

/// Detects the type of `task`'s source and hands it to the matching extractor.
///
/// Never fails: errors become a failed [ExtractionOutcome], and the source is
/// recorded in `failures` exactly once.
pub fn extract_archive(
    task: ArchiveTask,
    options: ExtractionOptions,
    failures: &FailedFiles,
) -> ExtractionOutcome {
    let start = Instant::now();
    let result = dispatch(&task, options);
    let source = task.source();
    match &result {
        Ok(()) => info!("Extracted {} in {:.2?}", source.display(), start.elapsed()),
        Err(ExtractError::Unsupported(mime)) => {
            warn!("Unsupported file format: {} ({mime})", source.display())
        }
        Err(ExtractError::Undetermined(e)) => {
            error!("Could not determine the file type for {}: {e}", source.display())
        }
        Err(e) => error!("Error extracting {}: {e}", source.display()),
    }
    if let Err(e) = &result {
        failures.record(FailedArchive::new(source.to_path_buf(), e.to_string()));
    }
    ExtractionOutcome { task, result }
}

fn dispatch(task: &ArchiveTask, options: ExtractionOptions) -> Result<(), ExtractError> {
    match detect_type(task.source()).map_err(ExtractError::Undetermined)? {
        DetectedType::Archive(format) => format.extract(task.source(), task.dest(), options),
        DetectedType::Unsupported(mime) => Err(ExtractError::Unsupported(mime)),
    }
}

use crate::formats::ExtractError;
use std::ffi::OsStr;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, trace};
use wait_timeout::ChildExt;

/// Runs `program` to completion, killing it if it outlives `timeout`.
///
/// Only the exit status is inspected; stdio is not captured.
pub fn run(
    program: &'static str,
    args: &[&OsStr],
    timeout: Duration,
) -> Result<(), ExtractError> {
    trace!(program, ?args, "spawning");
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ExtractError::Spawn { program, source })?;

    match child.wait_timeout(timeout)? {
        Some(status) if status.success() => Ok(()),
        Some(status) => Err(ExtractError::ExitStatus { program, status }),
        None => {
            debug!(program, "timed out, killing");
            child.kill()?;
            child.wait()?;
            Err(ExtractError::Timeout { program, timeout })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn reports_exit_status() {
        assert_matches!(run("true", &[], Duration::from_secs(10)), Ok(()));
        assert_matches!(
            run("false", &[], Duration::from_secs(10)),
            Err(ExtractError::ExitStatus {
                program: "false",
                ..
            })
        );
    }

    #[test]
    fn kills_after_timeout() {
        let result = run("sleep", &[OsStr::new("5")], Duration::from_millis(100));
        assert_matches!(result, Err(ExtractError::Timeout { program: "sleep", .. }));
    }

    #[test]
    fn missing_program() {
        assert_matches!(
            run("definitely-not-a-real-binary", &[], Duration::from_secs(1)),
            Err(ExtractError::Spawn { .. })
        );
    }
}

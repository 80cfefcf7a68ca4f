//! External compiler invocation.
//!
//! One call = one process. The source snapshot is persisted to a scratch
//! `.ink` file, `inklecate -o <out.json> <in.ink>` is spawned with stdout and
//! stderr captured, and the exit status decides the outcome:
//!
//! - exit 0: the output file content is the compiled story JSON
//! - exit 0 but unreadable output: [`CompileError::Io`]
//! - non-zero exit: [`CompileError::Process`] carrying the captured
//!   diagnostics verbatim
//!
//! The spawned child is `kill_on_drop`, so aborting the owning task (a
//! superseded preview compile, or an elapsed timeout) reclaims the process.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::CompileError;
use crate::config::StudioConfig;

/// Process-wide scratch file sequence. Combined with the pid this keeps
/// concurrent invocations (exports for different documents) on distinct
/// temp paths.
static SCRATCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Scratch input/output pair for one invocation. Best-effort removed on
/// drop; leftovers are harmless since every call gets fresh paths.
struct Scratch {
    input: PathBuf,
    output: PathBuf,
}

impl Scratch {
    fn next() -> Self {
        let seq = SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed);
        let tag = format!("inkpot-{}-{}", std::process::id(), seq);
        let dir = std::env::temp_dir();
        Self {
            input: dir.join(format!("{tag}.ink")),
            output: dir.join(format!("{tag}.json")),
        }
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.input);
        let _ = std::fs::remove_file(&self.output);
    }
}

/// Compile `source` with the resolved compiler, honoring the configured
/// timeout. Short-circuits to `ToolMissing` when discovery found nothing.
pub async fn compile_source(source: &str, config: &StudioConfig) -> Result<String, CompileError> {
    let Some(exe) = super::locate() else {
        return Err(CompileError::ToolMissing);
    };
    let timeout = config.compiler.timeout_secs.map(Duration::from_secs);
    invoke(&exe, source, timeout).await
}

/// Run one compile against an explicit executable.
pub async fn invoke(
    exe: &Path,
    source: &str,
    timeout: Option<Duration>,
) -> Result<String, CompileError> {
    let scratch = Scratch::next();

    tokio::fs::write(&scratch.input, source)
        .await
        .map_err(|e| CompileError::Io(format!("failed to write scratch input: {e}")))?;

    let mut cmd = tokio::process::Command::new(exe);
    cmd.arg("-o")
        .arg(&scratch.output)
        .arg(&scratch.input)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // A non-runnable executable surfaces like any other compiler failure
    let child = cmd
        .spawn()
        .map_err(|e| CompileError::Process(format!("failed to run `{}`: {e}", exe.display())))?;

    let wait = child.wait_with_output();
    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, wait).await {
            Ok(result) => result,
            // Dropping the in-flight future kills the child (kill_on_drop)
            Err(_) => {
                return Err(CompileError::Process(format!(
                    "compiler timed out after {}s",
                    limit.as_secs()
                )));
            }
        },
        None => wait.await,
    }
    .map_err(|e| CompileError::Process(format!("failed to wait for compiler: {e}")))?;

    if !output.status.success() {
        return Err(CompileError::Process(combined_output(
            &output.stdout,
            &output.stderr,
            &output.status,
        )));
    }

    tokio::fs::read_to_string(&scratch.output)
        .await
        .map_err(|e| CompileError::Io(e.to_string()))
}

/// Combined stdout + stderr, verbatim; falls back to the exit status when
/// the compiler said nothing.
fn combined_output(
    stdout: &[u8],
    stderr: &[u8],
    status: &std::process::ExitStatus,
) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(stderr));
    if combined.is_empty() {
        format!("compiler exited with {status}")
    } else {
        combined
    }
}

//! External process invocation.
//!
//! [`CommandRunner`] is the seam between tree construction and the
//! operating system: given an argv it returns the combined
//! stdout/stderr text, or a [`RunError`] naming the attempted arguments.
//! [`SystemRunner`] is the real implementation; tests substitute scripted
//! runners.

use std::io::Read;
use std::process::{Command as Process, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;
use wait_timeout::ChildExt;

/// Invocation failure. Every variant carries the attempted argument list;
/// tree construction propagates these unchanged, without retry.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// An empty argument list was supplied.
    #[error("at least one argument is required")]
    EmptyArgs,

    /// The process could not be spawned (typically a missing binary).
    #[error("exec error for args ({}): {source}", .argv.join(", "))]
    Spawn {
        argv: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited abnormally. `output` is the best-effort
    /// captured combined text.
    #[error("exec error for args ({}): {status}", .argv.join(", "))]
    Exit {
        argv: Vec<String>,
        status: ExitStatus,
        output: String,
    },

    /// The process did not finish within the configured deadline.
    #[error("exec error for args ({}): timed out after {timeout:?}", .argv.join(", "))]
    Timeout { argv: Vec<String>, timeout: Duration },

    /// Waiting on the spawned process failed.
    #[error("exec error for args ({}): {source}", .argv.join(", "))]
    Wait {
        argv: Vec<String>,
        #[source]
        source: std::io::Error,
    },
}

/// Runs an argv to completion and captures its combined output.
pub trait CommandRunner {
    /// Invokes `argv[0]` with the remaining arguments and returns the
    /// combined stdout/stderr text. `argv` must have length >= 1.
    fn combined_output(&self, argv: &[String]) -> Result<String, RunError>;
}

/// [`CommandRunner`] backed by real process execution.
///
/// Stdout and stderr are piped and drained concurrently, and the combined
/// text is stdout followed by stderr, lossily decoded. A non-zero exit is
/// reported as [`RunError::Exit`] with the captured output attached. An
/// optional per-invocation deadline kills the child on expiry; without
/// one, a hung invocation hangs the whole build.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    /// A runner with no deadline.
    pub fn new() -> Self {
        SystemRunner { timeout: None }
    }

    /// A runner that kills each invocation after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        SystemRunner {
            timeout: Some(timeout),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn combined_output(&self, argv: &[String]) -> Result<String, RunError> {
        let (program, args) = argv.split_first().ok_or(RunError::EmptyArgs)?;

        let mut child = Process::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                argv: argv.to_vec(),
                source,
            })?;

        // Drain both pipes on background threads so the child cannot
        // block on a full pipe buffer before exiting.
        let stdout_thread = child.stdout.take().map(drain_pipe);
        let stderr_thread = child.stderr.take().map(drain_pipe);

        let status = match self.timeout {
            Some(timeout) => match child.wait_timeout(timeout) {
                Ok(Some(status)) => status,
                Ok(None) => {
                    debug!(command = ?argv, ?timeout, "help invocation timed out, killing process");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunError::Timeout {
                        argv: argv.to_vec(),
                        timeout,
                    });
                }
                Err(source) => {
                    return Err(RunError::Wait {
                        argv: argv.to_vec(),
                        source,
                    });
                }
            },
            None => child.wait().map_err(|source| RunError::Wait {
                argv: argv.to_vec(),
                source,
            })?,
        };

        let mut combined = String::new();
        for thread in [stdout_thread, stderr_thread] {
            if let Some(buffer) = thread.and_then(|handle| handle.join().ok()) {
                combined.push_str(&String::from_utf8_lossy(&buffer));
            }
        }

        if !status.success() {
            return Err(RunError::Exit {
                argv: argv.to_vec(),
                status,
                output: combined,
            });
        }

        Ok(combined)
    }
}

fn drain_pipe(mut pipe: impl Read + Send + 'static) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Err(error) = pipe.read_to_end(&mut buffer) {
            debug!(%error, "failed to drain child pipe");
        }
        buffer
    })
}

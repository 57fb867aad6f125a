//! Subprocess execution with live stderr forwarding

use crate::error::{SweepError, SweepResult};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

/// Exit status and captured stdout of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,

    /// Everything the process wrote to stdout
    pub stdout: String,
}

impl CommandOutput {
    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external programs to completion
///
/// Implementations call `on_stderr` once per stderr line while the process
/// is still running, and return only after it has exited. There is no
/// timeout.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        on_stderr: &(dyn Fn(String) + Send + Sync),
    ) -> SweepResult<CommandOutput>;
}

/// Runner backed by real OS processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        on_stderr: &(dyn Fn(String) + Send + Sync),
    ) -> SweepResult<CommandOutput> {
        let cmdline = command_line(program, args);
        debug!("Executing: {}", cmdline);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SweepError::command_failed(&cmdline, e))?;

        let stdout = stream_child_output(&mut child, on_stderr)
            .await
            .map_err(|e| SweepError::io(format!("reading output of {}", cmdline), e))?;

        let status = child
            .wait()
            .await
            .map_err(|e| SweepError::io(format!("waiting for {}", cmdline), e))?;

        debug!("{} exited with {:?}", cmdline, status.code());
        Ok(CommandOutput {
            code: status.code(),
            stdout,
        })
    }
}

/// Forward stderr lines to `on_stderr` while collecting stdout.
///
/// Both pipes are drained together so a chatty stderr cannot block a
/// process that is still writing its stdout.
async fn stream_child_output(
    child: &mut tokio::process::Child,
    on_stderr: &(dyn Fn(String) + Send + Sync),
) -> std::io::Result<String> {
    let stderr = child.stderr.take();
    let stdout = child.stdout.take();

    let forward = async {
        if let Some(stderr) = stderr {
            let mut reader = BufReader::new(stderr);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {
                        let line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
                        let line = line.strip_suffix(b"\r").unwrap_or(line);
                        on_stderr(String::from_utf8_lossy(line).into_owned());
                    }
                }
            }
        }
    };

    let collect = async {
        let mut buf = Vec::new();
        if let Some(mut stdout) = stdout {
            stdout.read_to_end(&mut buf).await?;
        }
        Ok::<_, std::io::Error>(buf)
    };

    let ((), buf) = tokio::join!(forward, collect);
    Ok(String::from_utf8_lossy(&buf?).into_owned())
}

/// Render a program and its arguments for logs and error messages
pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::Result;

/// Captured result of one child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an external program to completion, feeding `stdin` and draining its output.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[OsString], stdin: &str) -> Result<ProcessOutput>;
}

/// [`ProcessRunner`] backed by `tokio::process`.
///
/// The child is killed if the returned future is dropped before it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, program: &Path, args: &[OsString], stdin: &str) -> Result<ProcessOutput> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut pipe) = child.stdin.take() {
            let input = stdin.as_bytes().to_vec();
            // Write concurrently with draining stdout/stderr so a chatty child cannot deadlock us.
            let writer = async move {
                let result = pipe.write_all(&input).await;
                drop(pipe);
                result
            };
            let (written, output) = tokio::join!(writer, child.wait_with_output());
            let output = output?;
            if let Err(e) = written {
                // A child that exits without reading its input closes the pipe early.
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
            return Ok(to_output(output));
        }

        let output = child.wait_with_output().await?;
        Ok(to_output(output))
    }
}

fn to_output(output: std::process::Output) -> ProcessOutput {
    ProcessOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

//! Scripted stand-in for the Codex CLI used by unit tests.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::agent::process::{ProcessOutput, ProcessRunner};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Call {
    pub args: Vec<String>,
    pub stdin: String,
}

#[derive(Debug, Clone, Default)]
pub struct Reply {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
    /// Written to the `--output-last-message` path when set.
    pub message: Option<String>,
}

impl Reply {
    pub fn ok(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            ..Self::default()
        }
    }

    pub fn ok_with_message(message: &str, stdout: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::ok(stdout)
        }
    }

    pub fn fail(code: i32, stderr: &str) -> Self {
        Self {
            code,
            stderr: stderr.to_string(),
            ..Self::default()
        }
    }
}

type Responder = Box<dyn Fn(&Call) -> Reply + Send + Sync>;

pub struct FakeRunner {
    responder: Responder,
    calls: Mutex<Vec<Call>>,
}

impl FakeRunner {
    /// Answer calls with `replies` in order.
    pub fn new(replies: Vec<Reply>) -> Self {
        let queue = Mutex::new(VecDeque::from(replies));
        Self::from_fn(move |_| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted reply left")
        })
    }

    /// Answer each call by inspecting it.
    pub fn from_fn(f: impl Fn(&Call) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(f),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, _program: &Path, args: &[OsString], stdin: &str) -> Result<ProcessOutput> {
        let call = Call {
            args: args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
            stdin: stdin.to_string(),
        };
        self.calls.lock().unwrap().push(call.clone());

        let reply = (self.responder)(&call);
        if let (Some(message), Some(path)) =
            (&reply.message, arg_value(&call.args, "--output-last-message"))
        {
            std::fs::write(path, message)?;
        }

        Ok(ProcessOutput {
            code: Some(reply.code),
            stdout: reply.stdout,
            stderr: reply.stderr,
        })
    }
}

pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Value following `flag` in an argument list.
pub fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

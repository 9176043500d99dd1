//! Codex CLI executor.
//!
//! Runs `codex exec` once per attempt, capturing the final message through a
//! scratch file, and downgrades flags or the model when the installed CLI
//! rejects them.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::agent::process::{ProcessOutput, ProcessRunner, TokioProcessRunner};
use crate::config::CodexConfig;
use crate::error::{AppError, Result};

/// Returned when the CLI succeeds but says nothing.
pub const EMPTY_RESPONSE: &str = "(응답이 비어 있습니다.)";

const BYPASS_FLAG: &str = "--dangerously-bypass-approvals-and-sandbox";
const FULL_AUTO_FLAG: &str = "--full-auto";

const FULL_AUTO_REJECTED: &str = "unexpected argument '--full-auto'";
const MODEL_REJECTED: &[&str] = &["does not exist or you do not have access", "not supported"];

/// Approval/sandbox level passed to `codex exec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    Bypass,
    FullAuto,
    /// Neither flag; the CLI's own defaults apply.
    Restricted,
}

impl ExecMode {
    pub fn flag(self) -> Option<&'static str> {
        match self {
            ExecMode::Bypass => Some(BYPASS_FLAG),
            ExecMode::FullAuto => Some(FULL_AUTO_FLAG),
            ExecMode::Restricted => None,
        }
    }
}

/// One logical call: the prompt plus the caller's original settings.
#[derive(Debug, Clone, Copy)]
pub struct ExecRequest<'a> {
    pub prompt: &'a str,
    pub workspace: &'a Path,
    pub model: &'a str,
    pub bypass: bool,
    pub max_retries: u32,
}

/// Settings that may be downgraded between attempts of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttemptState {
    mode: ExecMode,
    model: String,
}

impl AttemptState {
    fn new(request: &ExecRequest<'_>) -> Self {
        Self {
            mode: if request.bypass {
                ExecMode::Bypass
            } else {
                ExecMode::FullAuto
            },
            model: request.model.to_string(),
        }
    }
}

/// What to do after a failed attempt.
#[derive(Debug, PartialEq, Eq)]
enum Recovery {
    DropFullAuto,
    FallbackModel,
    NeedsLogin,
    Backoff,
}

fn diagnose(stderr: &str, state: &AttemptState, fallback_model: &str) -> Recovery {
    let lowered = stderr.to_lowercase();

    if state.mode == ExecMode::FullAuto && stderr.contains(FULL_AUTO_REJECTED) {
        return Recovery::DropFullAuto;
    }
    if state.model != fallback_model && MODEL_REJECTED.iter().any(|m| lowered.contains(m)) {
        return Recovery::FallbackModel;
    }
    if stderr.contains("Not logged in") || lowered.contains("login") {
        return Recovery::NeedsLogin;
    }
    Recovery::Backoff
}

/// Drives `codex exec` with retry, flag downgrade and model fallback.
pub struct CodexExec<R = TokioProcessRunner> {
    runner: R,
    program: PathBuf,
    base_args: Vec<String>,
    fallback_model: String,
    backoff_unit: Duration,
}

impl CodexExec<TokioProcessRunner> {
    /// Build an executor from config, resolving the launcher on `PATH`.
    pub fn from_config(config: &CodexConfig) -> Result<Self> {
        let program = which::which(&config.program).map_err(|e| {
            AppError::ToolUnavailable(format!("{}을(를) 찾을 수 없습니다: {e}", config.program))
        })?;
        Ok(Self::with_runner(TokioProcessRunner, program, config))
    }
}

impl<R: ProcessRunner> CodexExec<R> {
    pub fn with_runner(runner: R, program: PathBuf, config: &CodexConfig) -> Self {
        Self {
            runner,
            program,
            base_args: config.args.clone(),
            fallback_model: config.fallback_model.clone(),
            backoff_unit: config.backoff_unit(),
        }
    }

    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Confirm the CLI starts at all by asking for its version.
    pub async fn check_available(&self) -> Result<()> {
        let mut args: Vec<OsString> = self.base_args.iter().map(OsString::from).collect();
        args.push("--version".into());

        let output = self
            .runner
            .run(&self.program, &args, "")
            .await
            .map_err(|e| AppError::ToolUnavailable(e.to_string()))?;

        if !output.success() {
            return Err(AppError::ToolUnavailable(format!(
                "stderr: {}",
                output.stderr.trim()
            )));
        }

        tracing::debug!(version = %output.stdout.trim(), "Codex CLI available");
        Ok(())
    }

    fn build_args(&self, state: &AttemptState, workspace: &Path, scratch: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.base_args.iter().map(OsString::from).collect();
        args.push("exec".into());
        if let Some(flag) = state.mode.flag() {
            args.push(flag.into());
        }
        args.extend([
            OsString::from("--model"),
            OsString::from(&state.model),
            OsString::from("--cd"),
            workspace.as_os_str().to_owned(),
            OsString::from("--skip-git-repo-check"),
            OsString::from("--output-last-message"),
            scratch.as_os_str().to_owned(),
            OsString::from("-"),
        ]);
        args
    }

    /// Run one prompt to completion and return the CLI's final message.
    pub async fn invoke(&self, request: &ExecRequest<'_>) -> Result<String> {
        let mut state = AttemptState::new(request);
        let mut last_error = String::new();

        for attempt in 1..=request.max_retries {
            // Removed on drop, whichever way this iteration ends.
            let scratch = tempfile::Builder::new()
                .prefix("codex-team-")
                .suffix(".txt")
                .tempfile()?
                .into_temp_path();

            let args = self.build_args(&state, request.workspace, &scratch);

            tracing::debug!(
                attempt,
                mode = ?state.mode,
                model = %state.model,
                "Running codex exec"
            );

            let output = self
                .runner
                .run(&self.program, &args, request.prompt)
                .await?;

            if output.success() {
                return Ok(read_final_message(&scratch, &output).await);
            }

            let stderr = output.stderr.trim();
            match diagnose(stderr, &state, &self.fallback_model) {
                Recovery::DropFullAuto => {
                    tracing::warn!(attempt, "Codex CLI rejected --full-auto, retrying without it");
                    state.mode = ExecMode::Restricted;
                    last_error = stderr.to_string();
                }
                Recovery::FallbackModel => {
                    tracing::warn!(
                        attempt,
                        model = %state.model,
                        fallback = %self.fallback_model,
                        "Model rejected, switching to fallback"
                    );
                    state.model = self.fallback_model.clone();
                    last_error = stderr.to_string();
                }
                Recovery::NeedsLogin => {
                    return Err(AppError::AuthenticationRequired(stderr.to_string()));
                }
                Recovery::Backoff => {
                    last_error = format_failure(&output);
                    tracing::warn!(attempt, code = ?output.code, "codex exec failed");
                    if attempt < request.max_retries {
                        let delay = self.backoff_unit * attempt;
                        tracing::info!(delay_ms = delay.as_millis() as u64, "Backing off before retry");
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(AppError::RetryExhausted {
            retries: request.max_retries,
            last_error,
        })
    }
}

async fn read_final_message(scratch: &Path, output: &ProcessOutput) -> String {
    if let Ok(bytes) = tokio::fs::read(scratch).await {
        let message = String::from_utf8_lossy(&bytes);
        let message = message.trim();
        if !message.is_empty() {
            return message.to_string();
        }
    }

    let stdout = output.stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }

    EMPTY_RESPONSE.to_string()
}

fn format_failure(output: &ProcessOutput) -> String {
    let code = output
        .code
        .map_or_else(|| "signal".to_string(), |c| c.to_string());
    format!(
        "exit={code}\nstdout:\n{}\n\nstderr:\n{}",
        output.stdout.trim(),
        output.stderr.trim()
    )
}

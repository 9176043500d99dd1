use std::path::Path;
use std::time::Instant;

use crate::agent::codex::{CodexExec, ExecRequest};
use crate::agent::process::{ProcessRunner, TokioProcessRunner};
use crate::agent::prompt::{build_prompt_with_limit, StepContext, HISTORY_CHAR_LIMIT};
use crate::error::{AppError, Result};
use crate::workflow::classify::classify;
use crate::workflow::types::{RunReport, StepResult};

/// Caller-supplied settings for one run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions<'a> {
    pub workspace: &'a Path,
    pub max_retries: u32,
    pub model: &'a str,
    pub bypass: bool,
}

/// Runs a task through its role sequence, one Codex call per step.
pub struct Orchestrator<R = TokioProcessRunner> {
    exec: CodexExec<R>,
    history_limit: usize,
}

impl<R: ProcessRunner> Orchestrator<R> {
    pub fn new(exec: CodexExec<R>) -> Self {
        Self {
            exec,
            history_limit: HISTORY_CHAR_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn exec(&self) -> &CodexExec<R> {
        &self.exec
    }

    /// Run `task` and return the final step's output.
    pub async fn run(&self, task: &str, options: &RunOptions<'_>) -> Result<String> {
        let report = self.run_detailed(task, options).await?;
        Ok(report.final_report().to_string())
    }

    /// Run `task` and keep every step's output.
    ///
    /// Steps run strictly in order; the first failing step aborts the run.
    pub async fn run_detailed(&self, task: &str, options: &RunOptions<'_>) -> Result<RunReport> {
        let decision = classify(task);
        let total = decision.order.len();

        tracing::info!(
            complex = decision.is_complex,
            reason = decision.reason,
            order = %decision.order_chain(),
            "Workflow selected"
        );

        let mut steps: Vec<StepResult> = Vec::with_capacity(total);

        for (i, &role) in decision.order.iter().enumerate() {
            let index = i + 1;
            let prompt = build_prompt_with_limit(
                &StepContext {
                    role,
                    task,
                    decision: &decision,
                    step_index: index,
                    total_steps: total,
                    prior_results: &steps,
                },
                self.history_limit,
            );

            tracing::info!(step = index, total, role = %role, "Starting step");
            let started = Instant::now();

            let content = self
                .exec
                .invoke(&ExecRequest {
                    prompt: &prompt,
                    workspace: options.workspace,
                    model: options.model,
                    bypass: options.bypass,
                    max_retries: options.max_retries,
                })
                .await
                .map_err(|e| {
                    tracing::error!(step = index, total, role = %role, error = %e, "Step failed");
                    AppError::Step {
                        index,
                        total,
                        role,
                        source: Box::new(e),
                    }
                })?;

            tracing::info!(
                step = index,
                role = %role,
                elapsed_ms = started.elapsed().as_millis() as u64,
                chars = content.chars().count(),
                "Step completed"
            );

            steps.push(StepResult { role, content });
        }

        Ok(RunReport { decision, steps })
    }
}

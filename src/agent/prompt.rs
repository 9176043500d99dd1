use crate::agent::context::trim_context;
use crate::agent::roles::RoleName;
use crate::workflow::types::{StepResult, WorkflowDecision};

/// Per-step ceiling for each prior result quoted in a prompt.
pub const HISTORY_CHAR_LIMIT: usize = 2500;

const NO_HISTORY: &str = "(이전 단계 없음)";

const DECOMPOSE_TASK: &str = "요청을 작업 단위로 분해하고, 바로 다음 담당자가 실행할 수 있는 handoff 지시를 작성하세요.
출력 형식:
1) 작업 분해
2) 우선순위
3) 다음 담당자 handoff 메모
";

const FINAL_REPORT_TASK: &str = "전체 결과를 최종 보고서로 통합하세요.
출력 형식:
1) 수행 내역 요약
2) 검증/테스트 결과
3) 남은 이슈 및 권장 다음 단계
";

const EXECUTE_TASK: &str = "현재 역할 지침에 따라 실제 작업을 수행하고, 결과를 간결하게 보고하세요.
출력 형식:
1) 실행한 일
2) 변경/근거
3) 다음 handoff 메모
";

/// Where a step sits in the run, and everything it has seen so far.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub role: RoleName,
    pub task: &'a str,
    pub decision: &'a WorkflowDecision,
    /// 1-based position of this step.
    pub step_index: usize,
    pub total_steps: usize,
    pub prior_results: &'a [StepResult],
}

fn render_history(prior_results: &[StepResult], limit: usize) -> String {
    if prior_results.is_empty() {
        return NO_HISTORY.to_string();
    }

    prior_results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "[{}] {} 결과\n{}",
                i + 1,
                r.role,
                trim_context(&r.content, limit)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn task_instruction(ctx: &StepContext<'_>) -> &'static str {
    match ctx.role {
        RoleName::Planner if ctx.step_index == 1 => DECOMPOSE_TASK,
        RoleName::Planner if ctx.step_index == ctx.total_steps => FINAL_REPORT_TASK,
        _ => EXECUTE_TASK,
    }
}

/// Build the prompt for one step, quoting each prior result up to `history_limit` characters.
pub fn build_prompt_with_limit(ctx: &StepContext<'_>, history_limit: usize) -> String {
    format!(
        r#"[역할]
{role}

[역할 지침]
{charter}

[사용자 원문 요청]
{task}

[오케스트레이션 규칙]
- 판정: {verdict} ({reason})
- 고정 순서: {order}
- 현재 단계: {index}/{total}
- 단계 완료 후 다음 담당자가 이해할 수 있게 산출물/근거를 남길 것

[이전 단계 산출물]
{history}

[작업]
{instruction}"#,
        role = ctx.role,
        charter = ctx.role.charter(),
        task = ctx.task,
        verdict = ctx.decision.verdict(),
        reason = ctx.decision.reason,
        order = ctx.decision.order_chain(),
        index = ctx.step_index,
        total = ctx.total_steps,
        history = render_history(ctx.prior_results, history_limit),
        instruction = task_instruction(ctx),
    )
}

/// Build the prompt for one step with the default history window.
pub fn build_prompt(ctx: &StepContext<'_>) -> String {
    build_prompt_with_limit(ctx, HISTORY_CHAR_LIMIT)
}

use crate::agent::roles::RoleName;

/// Returned when a run produced no steps at all.
pub const NO_RESULT: &str = "(실행 결과 없음)";

/// Which roles run for a task, in order, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDecision {
    pub is_complex: bool,
    pub order: Vec<RoleName>,
    pub reason: &'static str,
}

impl WorkflowDecision {
    /// Korean verdict word used in prompts.
    pub fn verdict(&self) -> &'static str {
        if self.is_complex {
            "복합"
        } else {
            "단순"
        }
    }

    /// Role order rendered as `A -> B -> C`.
    pub fn order_chain(&self) -> String {
        self.order
            .iter()
            .map(|role| role.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Output of one completed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub role: RoleName,
    pub content: String,
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub decision: WorkflowDecision,
    pub steps: Vec<StepResult>,
}

impl RunReport {
    /// Content of the last step, or [`NO_RESULT`] if nothing ran.
    pub fn final_report(&self) -> &str {
        self.steps
            .last()
            .map_or(NO_RESULT, |step| step.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_chain_joins_with_arrows() {
        let decision = WorkflowDecision {
            is_complex: false,
            order: vec![RoleName::Planner, RoleName::Reviewer, RoleName::Planner],
            reason: "리뷰 중심 단일 작업",
        };
        assert_eq!(decision.order_chain(), "Planner -> Reviewer -> Planner");
        assert_eq!(decision.verdict(), "단순");
    }

    #[test]
    fn test_final_report_uses_last_step() {
        let report = RunReport {
            decision: WorkflowDecision {
                is_complex: true,
                order: vec![RoleName::Planner, RoleName::Tester],
                reason: "복합 작업",
            },
            steps: vec![
                StepResult {
                    role: RoleName::Planner,
                    content: "plan".into(),
                },
                StepResult {
                    role: RoleName::Tester,
                    content: "tests pass".into(),
                },
            ],
        };
        assert_eq!(report.final_report(), "tests pass");
    }

    #[test]
    fn test_final_report_without_steps_is_sentinel() {
        let report = RunReport {
            decision: WorkflowDecision {
                is_complex: false,
                order: Vec::new(),
                reason: "",
            },
            steps: Vec::new(),
        };
        assert_eq!(report.final_report(), NO_RESULT);
    }
}

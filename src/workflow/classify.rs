use crate::agent::roles::RoleName::{self, Debugger, Implementer, Planner, Reviewer, Tester};
use crate::workflow::types::WorkflowDecision;

const COMPLEX_MIN_CHARS: usize = 80;
const COMPLEX_MIN_NEWLINES: usize = 2;
const COMPLEX_MIN_CONNECTORS: usize = 2;

const CONNECTORS: &[&str] = &["그리고", "또", "및", "먼저", "다음", "마지막"];

const DEBUG_KEYWORDS: &[&str] = &[
    "버그",
    "오류",
    "에러",
    "traceback",
    "예외",
    "크래시",
    "안됨",
    "실패",
    "디버그",
];
const REVIEW_KEYWORDS: &[&str] = &["리뷰", "검토", "품질", "보안", "성능 점검"];
const TEST_KEYWORDS: &[&str] = &["테스트", "검증", "pytest", "회귀", "유닛테스트"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn is_complex(text: &str) -> bool {
    text.chars().count() >= COMPLEX_MIN_CHARS
        || text.matches('\n').count() >= COMPLEX_MIN_NEWLINES
        || CONNECTORS
            .iter()
            .map(|c| text.matches(c).count())
            .sum::<usize>()
            >= COMPLEX_MIN_CONNECTORS
}

fn decision(is_complex: bool, order: &[RoleName], reason: &'static str) -> WorkflowDecision {
    WorkflowDecision {
        is_complex,
        order: order.to_vec(),
        reason,
    }
}

/// Pick the role order for a task.
///
/// Rules apply first-match-wins: debug keywords, then the complexity signal,
/// then review-only, then test-only, then the default. A short task that
/// mentions both review and test keywords lands on the default order.
pub fn classify(task: &str) -> WorkflowDecision {
    let text = task.trim();
    let lowered = text.to_lowercase();

    let complex = is_complex(text);
    let has_debug = contains_any(text, DEBUG_KEYWORDS) || contains_any(&lowered, DEBUG_KEYWORDS);
    let has_review = contains_any(text, REVIEW_KEYWORDS);
    let has_test = contains_any(text, TEST_KEYWORDS);

    if has_debug {
        return decision(true, &[Planner, Debugger, Tester, Planner], "디버그 성격 요청");
    }
    if complex {
        return decision(
            true,
            &[Planner, Implementer, Reviewer, Tester, Planner],
            "복합 작업",
        );
    }
    if has_review && !has_test {
        return decision(false, &[Planner, Reviewer, Planner], "리뷰 중심 단일 작업");
    }
    if has_test && !has_review {
        return decision(
            false,
            &[Planner, Implementer, Tester, Planner],
            "테스트 중심 단일 작업",
        );
    }
    decision(false, &[Planner, Implementer, Planner], "일반 단일 작업")
}

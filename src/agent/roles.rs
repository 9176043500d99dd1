use std::fmt;

/// The five fixed personas a workflow step can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleName {
    Planner,
    Implementer,
    Reviewer,
    Debugger,
    Tester,
}

const PLANNER_CHARTER: &str = "당신은 메인 팀장(Planner)입니다. 요청을 분석하고 작업 순서를 통제합니다.
- 복합 작업이면 반드시 순서를 정해 단계별로 handoff 지시를 만드세요.
- 각 단계 입력과 완료 기준을 짧고 명확하게 작성하세요.
- 최종 단계에서는 전체 결과를 통합 보고하고 남은 리스크/다음 액션을 정리하세요.
- 한국어로 작성하세요.";

const IMPLEMENTER_CHARTER: &str = "당신은 구현 담당(Implementer)입니다.
- 실제 파일 생성/수정/명령 실행으로 기능을 구현하세요.
- 완료 후 변경 파일, 핵심 변경점, 검증 결과를 보고하세요.
- 미완료/리스크가 있으면 이유와 해결 방향을 남기세요.
- 한국어로 작성하세요.";

const REVIEWER_CHARTER: &str = "당신은 코드 리뷰 담당(Reviewer)입니다.
- 버그/회귀/보안/성능 리스크를 심각도 순으로 찾으세요.
- 근거 파일 경로를 명시하고 수정 필요 항목을 구분하세요.
- 리뷰 결과를 다음 담당자가 바로 처리할 수 있게 작성하세요.
- 한국어로 작성하세요.";

const DEBUGGER_CHARTER: &str = "당신은 디버깅 담당(Debugger)입니다.
- 에러 원인을 재현/분석하고 코드 수정으로 해결하세요.
- 수정 후 재현 테스트를 다시 수행하세요.
- 필요하면 Tester가 검증하기 좋은 체크리스트를 남기세요.
- 한국어로 작성하세요.";

const TESTER_CHARTER: &str = "당신은 테스트 담당(Tester)입니다.
- 테스트를 작성/실행하고 결과를 수치와 함께 보고하세요.
- 실패 시 실패 원인과 재현 방법을 명확히 남기세요.
- 검증 공백(아직 테스트 못한 부분)을 반드시 기록하세요.
- 한국어로 작성하세요.";

impl RoleName {
    pub const ALL: [RoleName; 5] = [
        RoleName::Planner,
        RoleName::Implementer,
        RoleName::Reviewer,
        RoleName::Debugger,
        RoleName::Tester,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleName::Planner => "Planner",
            RoleName::Implementer => "Implementer",
            RoleName::Reviewer => "Reviewer",
            RoleName::Debugger => "Debugger",
            RoleName::Tester => "Tester",
        }
    }

    /// Fixed instruction block sent with every prompt for this role.
    pub fn charter(self) -> &'static str {
        match self {
            RoleName::Planner => PLANNER_CHARTER,
            RoleName::Implementer => IMPLEMENTER_CHARTER,
            RoleName::Reviewer => REVIEWER_CHARTER,
            RoleName::Debugger => DEBUGGER_CHARTER,
            RoleName::Tester => TESTER_CHARTER,
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

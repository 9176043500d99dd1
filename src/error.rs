use thiserror::Error;

use crate::agent::roles::RoleName;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("Codex CLI를 실행할 수 없습니다. npx/codex 설치 상태를 확인하세요.\n{0}")]
    ToolUnavailable(String),

    #[error("Codex 인증이 필요합니다. 먼저 `npx -y codex login`을 실행하세요.\n원문 오류: {0}")]
    AuthenticationRequired(String),

    #[error("codex exec 실행 실패 (재시도 {retries}회).\n{last_error}")]
    RetryExhausted { retries: u32, last_error: String },

    #[error("유효하지 않은 workspace 경로: {0}")]
    InvalidWorkspace(String),

    #[error("{index}/{total} 단계 ({role}) 실패: {source}")]
    Step {
        index: usize,
        total: usize,
        role: RoleName,
        #[source]
        source: Box<AppError>,
    },

    #[error("사용자 중단으로 실행을 취소했습니다.")]
    Interrupted,

    #[error("I/O 오류: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Innermost error, skipping any step wrappers.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::Step { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_error_names_role_and_keeps_root() {
        let err = AppError::Step {
            index: 2,
            total: 4,
            role: RoleName::Debugger,
            source: Box::new(AppError::AuthenticationRequired("Not logged in".into())),
        };

        let msg = err.to_string();
        assert!(msg.contains("2/4"));
        assert!(msg.contains("Debugger"));
        assert!(matches!(err.root(), AppError::AuthenticationRequired(_)));
    }

    #[test]
    fn test_retry_exhausted_mentions_count() {
        let err = AppError::RetryExhausted {
            retries: 3,
            last_error: "exit=1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("재시도 3회"));
        assert!(msg.contains("exit=1"));
    }
}

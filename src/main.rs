use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use codex_team::agent::codex::CodexExec;
use codex_team::config::AppConfig;
use codex_team::error::AppError;
use codex_team::repl::{run_repl, spawn_stdin_lines};
use codex_team::shutdown::{interruptible, wait_for_shutdown};
use codex_team::workflow::{Orchestrator, RunOptions};
use codex_team::workspace::resolve_workspace;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Parser)]
#[command(name = "codex-team", about = "Codex CLI 서브에이전트 오케스트레이터")]
struct Cli {
    /// 실행할 사용자 작업 지시 (비우면 대화형 모드)
    task: Vec<String>,

    /// 작업 루트 디렉터리
    #[arg(long, default_value = ".")]
    workspace: PathBuf,

    /// codex exec 실패 시 재시도 횟수
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_retries: Option<u32>,

    /// Codex 실행 모델
    #[arg(long, env = "CODEX_MODEL")]
    model: Option<String>,

    /// 안전 모드(--full-auto). 기본은 전권 모드(--dangerously-bypass-approvals-and-sandbox)
    #[arg(long)]
    safe: bool,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run_and_print(
    orchestrator: &Orchestrator,
    task: &str,
    options: &RunOptions<'_>,
) -> codex_team::error::Result<()> {
    let report = interruptible(orchestrator.run(task, options), wait_for_shutdown()).await?;
    println!("\n=== Planner 최종 보고 ===");
    println!("{report}");
    Ok(())
}

async fn app(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let workspace = resolve_workspace(&cli.workspace)?;

    let bypass = !cli.safe;
    if bypass {
        println!("[WARN] 전권 모드로 실행합니다: --dangerously-bypass-approvals-and-sandbox");
    } else {
        println!("[INFO] 안전 모드로 실행합니다: --full-auto");
    }

    let exec = CodexExec::from_config(&config.codex)?;
    exec.check_available().await?;

    let orchestrator =
        Orchestrator::new(exec).with_history_limit(config.workflow.history_char_limit);

    let model = cli.model.unwrap_or_else(|| config.codex.model.clone());
    let options = RunOptions {
        workspace: &workspace,
        max_retries: cli.max_retries.unwrap_or(config.codex.max_retries),
        model: &model,
        bypass,
    };

    tracing::info!(
        workspace = %workspace.display(),
        model = %model,
        max_retries = options.max_retries,
        bypass,
        "Starting codex-team"
    );

    let task = cli.task.join(" ").trim().to_string();
    if !task.is_empty() {
        run_and_print(&orchestrator, &task, &options).await?;
        return Ok(());
    }

    let orchestrator = &orchestrator;
    let options = &options;
    run_repl(spawn_stdin_lines(), wait_for_shutdown, |task| async move {
        run_and_print(orchestrator, &task, options).await
    })
    .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match app(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(app_err) = e.downcast_ref::<AppError>() {
                eprintln!("[ERROR] {app_err}");
            } else {
                eprintln!("[ERROR] 예기치 못한 오류: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

//! Line-by-line interactive mode.

use std::future::Future;
use std::io::{BufRead, Write};

use tokio::sync::mpsc;

use crate::error::Result;

const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// What a single input line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput {
    Task(String),
    Skip,
    Quit,
}

pub fn parse_line(line: &str) -> ReplInput {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Skip;
    }
    if EXIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w)) {
        return ReplInput::Quit;
    }
    ReplInput::Task(line.to_string())
}

/// Forward stdin lines from a dedicated OS thread.
///
/// The thread is detached so a read that never completes cannot hold up
/// runtime shutdown.
pub fn spawn_stdin_lines() -> mpsc::Receiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::channel(1);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Read tasks from `lines` until an exit word, end of input or `shutdown` fires.
///
/// Each task is handed to `on_task`; an error from it ends the loop.
pub async fn run_repl<S, SF, F, Fut>(
    mut lines: mpsc::Receiver<std::io::Result<String>>,
    mut shutdown: S,
    mut on_task: F,
) -> Result<()>
where
    S: FnMut() -> SF,
    SF: Future<Output = ()>,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    println!("작업 지시를 입력하세요. 종료하려면 exit 또는 quit 입력");

    loop {
        print!("\n지시> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.recv() => line.transpose()?,
            _ = shutdown() => None,
        };

        let Some(line) = line else {
            println!("\n종료합니다.");
            return Ok(());
        };

        match parse_line(&line) {
            ReplInput::Quit => return Ok(()),
            ReplInput::Skip => continue,
            ReplInput::Task(task) => on_task(task).await?,
        }
    }
}

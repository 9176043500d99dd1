pub mod codex;
pub mod context;
pub mod process;
pub mod prompt;
pub mod roles;

pub mod classify;
pub mod run;
pub mod types;

pub use classify::classify;
pub use run::{Orchestrator, RunOptions};
pub use types::{RunReport, StepResult, WorkflowDecision};

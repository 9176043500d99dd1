pub mod agent;
pub mod config;
pub mod error;
pub mod repl;
pub mod shutdown;
pub mod workflow;
pub mod workspace;

#[cfg(test)]
pub(crate) mod test_support;

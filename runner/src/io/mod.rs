//! Side-effecting operations: filesystem reads and process execution.

pub mod config;
pub mod executor;
pub mod process;
pub mod project;

//! Deterministic, pure logic for building a run.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! configuration trees and return deterministic outputs suitable for tests.

pub mod command;
pub mod defaults;
pub mod inspection;
pub mod merge;
pub mod plan;
pub mod value;

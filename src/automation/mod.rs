//! Deal-playing session loop.
//!
//! This module provides:
//! - External collaborator traits for solving and executing moves
//! - A background session runner with cooperative abort
//! - Progress counters for host surfaces

pub mod runner;

pub use runner::{
    completed_deals, is_session_running, request_abort, reset_abort_flag, run_deals,
    start_sessions, Move, MoveExecutor, Slot, Solver,
};

//! Clean Room TUI - terminal dashboard for a healthcare data clean room.
//!
//! Library crate backing the `cleanroom-tui` binary. The binary wires
//! up the terminal, logging, and the action channel; everything else
//! (state, input, rendering, side effects) lives here and is testable
//! without a terminal.

pub mod action;
pub mod app;
pub mod cli;
pub mod export;
pub mod input;
pub mod runtime;
pub mod ui;

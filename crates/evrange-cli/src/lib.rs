//! EV range planner CLI library.
//!
//! Provides the output formatting, terminal styling, and logging setup used by
//! the `evrange-cli` binary.

pub mod logging;
pub mod output;
pub mod terminal;

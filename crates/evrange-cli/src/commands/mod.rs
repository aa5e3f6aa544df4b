// Module exports for CLI subcommands.
//
// main.rs parses arguments and dispatches to the handlers defined here.

pub mod estimate;

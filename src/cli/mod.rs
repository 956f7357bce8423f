//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction};
pub use commands::{
    handle_config_action, print_usage, render_bubble_to, render_mono_to, run_dispatch, run_mono,
    run_say, LocalMessage, SayOptions,
};
pub use enums::MascotArg;

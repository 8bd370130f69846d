//! CLI commands

mod run;
mod style;

pub use run::{RunArgs, run_command};

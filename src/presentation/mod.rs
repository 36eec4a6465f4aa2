pub mod cli;
pub mod config;
pub mod terminal;

pub use cli::CliArgs;
pub use config::{Environment, ScaffoldConfig, Settings};
pub use terminal::{TerminalView, run_repl};

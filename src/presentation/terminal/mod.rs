mod commands;
mod repl;
mod terminal_view;

pub use commands::{Command, HELP_TEXT, parse_command};
pub use repl::run_repl;
pub use terminal_view::TerminalView;

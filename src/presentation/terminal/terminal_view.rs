use std::io::{IsTerminal, Write};
use std::sync::Mutex;

use crate::application::ports::SessionObserver;
use crate::application::services::SubmissionState;
use crate::domain::{Alignment, ChatTurn, DocumentStatus, Speaker, TextDirection, TurnView};

const RIGHT_TO_LEFT_ISOLATE: char = '\u{2067}';
const POP_DIRECTIONAL_ISOLATE: char = '\u{2069}';
const DEFAULT_WIDTH: usize = 80;

/// Prints the conversation to a terminal as it changes.
pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
    width: usize,
    hyperlinks: bool,
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        let stdout = std::io::stdout();
        let hyperlinks = stdout.is_terminal();
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_WIDTH);
        Self::new(stdout, width, hyperlinks)
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, width: usize, hyperlinks: bool) -> Self {
        Self {
            out: Mutex::new(out),
            width,
            hyperlinks,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn format_turn(&self, turn: &ChatTurn) -> String {
        let view = TurnView::from_turn(turn);
        let label = match view.speaker {
            Speaker::User => "You",
            Speaker::Assistant => "Assistant",
        };

        let mut block = format!("\n{label}:\n");
        for line in &view.body_lines {
            block.push_str(&self.format_line(line, view.direction, view.alignment));
            block.push('\n');
        }

        if view.has_sources() {
            block.push_str("Sources:\n");
            for numbered in &view.sources {
                let title = if self.hyperlinks {
                    format!(
                        "\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\",
                        numbered.source.uri, numbered.source.title
                    )
                } else {
                    numbered.source.title.clone()
                };
                block.push_str(&format!(
                    "  {}. {} <{}>\n",
                    numbered.number, title, numbered.source.uri
                ));
            }
        }

        block
    }

    fn format_line(&self, line: &str, direction: TextDirection, alignment: Alignment) -> String {
        let line = match direction {
            TextDirection::Ltr => line.to_string(),
            TextDirection::Rtl => {
                format!("{RIGHT_TO_LEFT_ISOLATE}{line}{POP_DIRECTIONAL_ISOLATE}")
            }
        };
        match alignment {
            Alignment::Left => format!("  {line}"),
            Alignment::Right => format!("{line:>width$}", width = self.width),
        }
    }

    fn write_block(&self, text: &str) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::error!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write + Send> SessionObserver for TerminalView<W> {
    fn turn_appended(&self, turn: &ChatTurn) {
        // The user's own line is already on screen.
        if turn.speaker == Speaker::User {
            return;
        }
        self.write_block(&self.format_turn(turn));
    }

    fn submission_state_changed(&self, state: SubmissionState) {
        if state == SubmissionState::Sending {
            self.write_block("  thinking…\n");
        }
    }

    fn document_status_changed(&self, status: &DocumentStatus) {
        let hint = if status.is_clearable() {
            " (type /clear to remove)"
        } else {
            ""
        };
        self.write_block(&format!("[file] {status}{hint}\n"));
    }

    fn scroll_to_bottom(&self) {
        self.write_block("");
    }
}

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::application::ports::{CompletionClient, FileLoader};
use crate::application::services::ChatSession;
use crate::infrastructure::rendering::render_transcript_html;

use super::commands::{Command, HELP_TEXT, parse_command};

const PROMPT: &str = "> ";

/// Reads lines until end of input or `/quit`, sending each non-command line.
pub async fn run_repl<C, F, R, W>(
    session: &mut ChatSession<C, F>,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    C: CompletionClient + ?Sized,
    F: FileLoader + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Chat ready. Type /help for commands.")?;
    let mut lines = input.lines();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Blank => {}
            Command::Quit => break,
            Command::Send(text) => {
                if session.can_send(&text) {
                    session.send(&text).await?;
                }
            }
            Command::AttachFile(selection) => {
                session.attach_file(&selection).await;
            }
            Command::ClearFile => session.clear_document(),
            Command::SetSystem(instruction) => {
                session.set_system_instruction(instruction);
                if session.system_instruction().is_empty() {
                    writeln!(out, "System instruction reset to default.")?;
                } else {
                    writeln!(out, "System instruction updated.")?;
                }
            }
            Command::Export(path) => {
                let html = render_transcript_html(session.transcript());
                match tokio::fs::write(&path, html).await {
                    Ok(()) => writeln!(out, "Transcript written to {}", path.display())?,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Transcript export failed");
                        writeln!(out, "Could not write {}: {e}", path.display())?;
                    }
                }
            }
            Command::Status => {
                writeln!(out, "[file] {}", session.document().status)?;
                match session.system_instruction() {
                    "" => writeln!(out, "[system] default")?,
                    custom => writeln!(out, "[system] {custom}")?,
                }
                writeln!(out, "[turns] {}", session.transcript().len())?;
            }
            Command::Help => writeln!(out, "{HELP_TEXT}")?,
            Command::Invalid(message) => writeln!(out, "{message}")?,
        }
    }

    Ok(())
}

use std::path::PathBuf;

use crate::domain::FileSelection;

pub const HELP_TEXT: &str = "\
Type a question and press Enter to send it.

Commands:
  /file PATH [--type MEDIA-TYPE]  attach a text or PDF document as context
  /clear                          remove the attached document
  /system [TEXT]                  set the system instruction (blank resets to default)
  /export PATH                    write the transcript as an HTML page
  /status                         show the attached document and system instruction
  /help                           show this help
  /quit                           leave the chat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    AttachFile(FileSelection),
    ClearFile,
    SetSystem(String),
    Export(PathBuf),
    Status,
    Help,
    Quit,
    Blank,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Blank;
    }
    if !line.starts_with('/') {
        return Command::Send(line.to_string());
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "/file" if rest.is_empty() => {
            Command::Invalid("usage: /file PATH [--type MEDIA-TYPE]".to_string())
        }
        "/file" => match rest.rsplit_once("--type") {
            Some((path, media_type)) if !media_type.trim().is_empty() => Command::AttachFile(
                FileSelection::new(PathBuf::from(path.trim()), media_type.trim()),
            ),
            _ => Command::AttachFile(FileSelection::from_path(rest)),
        },
        "/clear" => Command::ClearFile,
        "/system" => Command::SetSystem(rest.to_string()),
        "/export" if rest.is_empty() => Command::Invalid("usage: /export PATH".to_string()),
        "/export" => Command::Export(PathBuf::from(rest)),
        "/status" => Command::Status,
        "/help" | "/?" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command {other}; type /help")),
    }
}

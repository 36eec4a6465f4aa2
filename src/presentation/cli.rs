use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "docchat", version, about = "Chat with Gemini, optionally about a document")]
pub struct CliArgs {
    /// Text or PDF document to attach before the chat starts
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Media type of --file; guessed from the extension when omitted
    #[arg(long = "type", value_name = "MEDIA-TYPE", requires = "file")]
    pub media_type: Option<String>,

    /// Custom system instruction
    #[arg(long, value_name = "TEXT")]
    pub system: Option<String>,

    /// Directory holding base.toml and per-environment overlays
    #[arg(long, env = "DOCCHAT_CONFIG_DIR", default_value = "config")]
    pub config_dir: PathBuf,
}

mod html_renderer;

pub use html_renderer::{render_transcript_html, render_turn_html};

use crate::domain::{Alignment, ChatTurn, Speaker, Transcript, TurnView};

/// Renders one chat bubble. Line breaks become `<br>`; the message body is
/// otherwise emitted as-is. Source titles and links are escaped.
pub fn render_turn_html(turn: &ChatTurn) -> String {
    let view = TurnView::from_turn(turn);

    let (wrapper_align, bubble_class) = match view.speaker {
        Speaker::User => ("items-end", "chat-bubble-user"),
        Speaker::Assistant => ("items-start", "chat-bubble-ai"),
    };
    let text_align = match view.alignment {
        Alignment::Left => "text-left",
        Alignment::Right => "text-right",
    };

    let mut html = format!(
        "<div class=\"flex flex-col {wrapper_align}\">\
         <div class=\"chat-bubble {bubble_class} {text_align}\" dir=\"{dir}\">{body}</div>",
        dir = view.direction.as_attr(),
        body = view.body_lines.join("<br>"),
    );

    if view.has_sources() {
        html.push_str("<div class=\"sources\"><strong>Sources:</strong><ol>");
        for numbered in &view.sources {
            html.push_str(&format!(
                "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></li>",
                escape_html(&numbered.source.uri),
                escape_html(&numbered.source.title),
            ));
        }
        html.push_str("</ol></div>");
    }

    html.push_str("</div>");
    html
}

/// Standalone page holding every turn, newest last.
pub fn render_transcript_html(transcript: &Transcript) -> String {
    let body: String = transcript.turns().iter().map(render_turn_html).collect();

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Chat transcript</title>\n</head>\n<body>\n<div id=\"chat-history\">{body}</div>\n</body>\n</html>\n"
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

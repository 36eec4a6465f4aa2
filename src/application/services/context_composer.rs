pub const MAX_CONTEXT_CHARS: usize = 100_000;

const PREAMBLE: &str = "Based on the following context, please answer the user's question.";
const CONTEXT_START: &str = "--- CONTEXT START ---";
const CONTEXT_END: &str = "--- CONTEXT END ---";

pub fn has_document_context(document_text: &str) -> bool {
    !document_text.is_empty()
}

/// Wraps the question in the document context, if there is any.
pub fn compose_prompt(question: &str, document_text: &str, max_context_chars: usize) -> String {
    if !has_document_context(document_text) {
        return question.to_string();
    }

    let context = truncate_chars(document_text, max_context_chars);
    if context.len() < document_text.len() {
        tracing::warn!(
            original_chars = document_text.chars().count(),
            kept_chars = max_context_chars,
            "Document context truncated"
        );
    }

    format!(
        "{PREAMBLE}\n\n{CONTEXT_START}\n{context}\n{CONTEXT_END}\n\nQuestion: {question}"
    )
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

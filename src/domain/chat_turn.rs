use super::{Source, Speaker};

/// One bubble of the conversation. Never changed after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
    pub sources: Vec<Source>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text.into(), Vec::new())
    }

    pub fn assistant(text: impl Into<String>, sources: Vec<Source>) -> Self {
        Self::new(Speaker::Assistant, text.into(), sources)
    }

    pub fn new(speaker: Speaker, text: String, sources: Vec<Source>) -> Self {
        Self {
            speaker,
            text,
            sources,
        }
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}

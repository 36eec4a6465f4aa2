use std::fmt;

use super::Source;

/// One prompt exchange with the completion endpoint. Built fresh per send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    prompt: String,
    system_instruction: String,
    grounding_enabled: bool,
}

impl CompletionRequest {
    pub fn new(prompt: String, system_instruction: String, grounding_enabled: bool) -> Self {
        Self {
            prompt,
            system_instruction,
            grounding_enabled,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn grounding_enabled(&self) -> bool {
        self.grounding_enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Stop,
    Other(String),
}

impl StopReason {
    /// Missing reasons are treated as a normal stop.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Stop,
            Some(reason) if reason.eq_ignore_ascii_case("stop") => Self::Stop,
            Some(reason) => Self::Other(reason.to_string()),
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => write!(f, "STOP"),
            Self::Other(reason) => write!(f, "{}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub answer_text: String,
    pub sources: Vec<Source>,
    pub stop_reason: StopReason,
}

impl CompletionResult {
    pub fn new(answer_text: String, sources: Vec<Source>, stop_reason: StopReason) -> Self {
        Self {
            answer_text,
            sources,
            stop_reason,
        }
    }

    pub fn text(answer_text: impl Into<String>) -> Self {
        Self::new(answer_text.into(), Vec::new(), StopReason::Stop)
    }
}

use super::{Alignment, ChatTurn, Source, Speaker, TextDirection};

/// Visible conversation history, oldest turn first.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ChatTurn) -> &ChatTurn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedSource {
    pub number: usize,
    pub source: Source,
}

/// Render-ready form of a turn shared by every view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub speaker: Speaker,
    pub direction: TextDirection,
    pub alignment: Alignment,
    pub body_lines: Vec<String>,
    pub sources: Vec<NumberedSource>,
}

impl TurnView {
    pub fn from_turn(turn: &ChatTurn) -> Self {
        let direction = TextDirection::detect(&turn.text);
        Self {
            speaker: turn.speaker,
            direction,
            alignment: direction.alignment(),
            body_lines: turn.text.split('\n').map(str::to_string).collect(),
            sources: turn
                .sources
                .iter()
                .enumerate()
                .map(|(index, source)| NumberedSource {
                    number: index + 1,
                    source: source.clone(),
                })
                .collect(),
        }
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}

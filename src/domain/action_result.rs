use super::Action;

/// Extractive answer: a span copied out of the submitted context.
///
/// `start` and `end` are character offsets into that context.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub score: f32,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    Summary(String),
    Answer(Answer),
    Correction(String),
}

impl ActionResult {
    pub fn action(&self) -> Action {
        match self {
            Self::Summary(_) => Action::Summarize,
            Self::Answer(_) => Action::Ask,
            Self::Correction(_) => Action::FixGrammar,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Summary(text) | Self::Correction(text) => text,
            Self::Answer(answer) => &answer.text,
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

pub const SUMMARIZE_PREFIX: &str = "summarize: ";
pub const FIX_GRAMMAR_PREFIX: &str = "fix grammar: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Summarize,
    Ask,
    FixGrammar,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Ask => "ask",
            Self::FixGrammar => "fix_grammar",
        }
    }

    /// Instruction token prepended to the document text. Question answering
    /// takes the question and context separately and has none.
    pub fn instruction_prefix(&self) -> Option<&'static str> {
        match self {
            Self::Summarize => Some(SUMMARIZE_PREFIX),
            Self::Ask => None,
            Self::FixGrammar => Some(FIX_GRAMMAR_PREFIX),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub action: Action,
    pub question: Option<String>,
    pub text: String,
}

impl ActionRequest {
    pub fn summarize(text: impl Into<String>) -> Self {
        Self {
            action: Action::Summarize,
            question: None,
            text: text.into(),
        }
    }

    pub fn ask(question: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            action: Action::Ask,
            question: Some(question.into()),
            text: text.into(),
        }
    }

    pub fn fix_grammar(text: impl Into<String>) -> Self {
        Self {
            action: Action::FixGrammar,
            question: None,
            text: text.into(),
        }
    }

    /// The question to ask, or `None` when it is missing or empty.
    pub fn question(&self) -> Option<&str> {
        self.question.as_deref().filter(|q| !q.is_empty())
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::types::{ComponentConfig, ComponentKind};

// =============================================================================
// Intent Types (Router Output)
// =============================================================================

/// What the user wants done to the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Add,
    Modify,
    Remove,
    Move,
    Clear,
    Generate,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Modify => "MODIFY",
            Self::Remove => "REMOVE",
            Self::Move => "MOVE",
            Self::Clear => "CLEAR",
            Self::Generate => "GENERATE",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADD" => Ok(Self::Add),
            "MODIFY" => Ok(Self::Modify),
            "REMOVE" => Ok(Self::Remove),
            "MOVE" => Ok(Self::Move),
            "CLEAR" => Ok(Self::Clear),
            "GENERATE" => Ok(Self::Generate),
            _ => Err(Error::UnknownAction(s.to_string())),
        }
    }
}

/// First-stage classification: action, kind and count, no configuration yet.
///
/// Produced either by the coarse LLM call or by the rule-based classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentGuess {
    pub action: ActionKind,
    /// `None` is a legitimate "no component" answer.
    pub component_type: Option<ComponentKind>,
    pub count: Option<u32>,
    pub content_prompt: String,
    pub position_hint: Option<String>,
    pub confidence: f64,
}

/// Finalized intent handed to generation.
///
/// Carries at most one configuration; its kind is the intent's kind, so the
/// two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub action: ActionKind,
    pub component: Option<ComponentConfig>,
    pub count: Option<u32>,
    pub content_prompt: String,
    pub position_hint: Option<String>,
    pub confidence: f64,
}

impl Intent {
    /// An ADD intent for a fully resolved configuration.
    pub fn add(component: ComponentConfig, content_prompt: impl Into<String>) -> Self {
        Self {
            action: ActionKind::Add,
            component: Some(component),
            count: None,
            content_prompt: content_prompt.into(),
            position_hint: None,
            confidence: 1.0,
        }
    }

    /// Finalize a guess with the configuration resolved for its kind.
    pub fn from_guess(guess: IntentGuess, component: Option<ComponentConfig>) -> Self {
        Self {
            action: guess.action,
            component,
            count: guess.count,
            content_prompt: guess.content_prompt,
            position_hint: guess.position_hint,
            confidence: guess.confidence.clamp(0.0, 1.0),
        }
    }

    pub fn with_count(mut self, count: Option<u32>) -> Self {
        self.count = count;
        self
    }

    /// Kind of the carried configuration.
    pub fn component_type(&self) -> Option<ComponentKind> {
        self.component.as_ref().map(ComponentConfig::kind)
    }

    /// ADD with nothing to add: the caller must ask the user to clarify.
    pub fn needs_clarification(&self) -> bool {
        self.action == ActionKind::Add && self.component.is_none()
    }
}

/// Output of a specialized extraction: a partial configuration plus an
/// optional standalone instance count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction<P> {
    pub patch: P,
    pub count: Option<u32>,
}

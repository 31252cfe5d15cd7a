use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{GenerationRequest, IntentGuess};

/// Which route the router took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPath {
    /// Kind and configuration both supplied by the caller; no text analysis.
    DeterministicAdvancedConfig,
    /// Kind fixed by the caller; only configuration was extracted.
    DeterministicWithConfigExtraction,
    /// Coarse intent came from the LLM.
    LlmIntent,
    /// Coarse intent came from the keyword classifier.
    RuleBasedClassifier,
}

/// Where the configuration fields came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    Llm,
    HeuristicFallback,
    /// Extraction was not needed.
    Skipped,
}

/// Coarse intent as parsed, and whether it came from the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentSnapshot {
    #[serde(flatten)]
    pub guess: IntentGuess,
    pub used_fallback: bool,
}

/// Per-request account of how the intent was resolved. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugTrace {
    pub path: ResolutionPath,
    /// Raw text of the coarse intent call.
    pub raw_llm_response: Option<String>,
    /// Raw text of the specialized extraction call.
    pub raw_extraction_response: Option<String>,
    pub llm_parse_error: Option<String>,
    pub extraction: ExtractionSource,
    pub extraction_error: Option<String>,
    pub parsed_intent: Option<IntentSnapshot>,
    /// Non-null fields of the final configuration.
    pub extracted_params: Map<String, Value>,
    /// The payload a generation backend would receive.
    pub would_send: Option<GenerationRequest>,
}

impl DebugTrace {
    pub fn new(path: ResolutionPath) -> Self {
        Self {
            path,
            raw_llm_response: None,
            raw_extraction_response: None,
            llm_parse_error: None,
            extraction: ExtractionSource::Skipped,
            extraction_error: None,
            parsed_intent: None,
            extracted_params: Map::new(),
            would_send: None,
        }
    }
}

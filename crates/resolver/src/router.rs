//! Deterministic router: decides, per message, how much text analysis runs.
//!
//! 1. Caller fixed the kind. With a matching caller config the intent is
//!    built directly; without one, only configuration is extracted.
//! 2. Nothing fixed. Coarse intent (LLM, rule-based on failure), then
//!    specialized extraction for the resolved kind, then merge.

use async_trait::async_trait;

use slide_intent_core::{
    traits::IntentRouter,
    types::{
        ActionKind, ChartConfig, ComponentConfig, ComponentKind, ComponentSettings, ConfigPatch,
        DebugTrace, ExtractionSource, GenerationRequest, ImageConfig, Intent, IntentGuess,
        IntentRequest, IntentSnapshot, MetricsConfig, Resolution, ResolutionPath, TableConfig,
        TextBoxConfig,
    },
};

use crate::classifier;
use crate::extraction::LlmExtractor;
use crate::inference::Inferable;
use crate::merge;

/// Result of the specialized configuration step.
struct ConfigOutcome {
    config: ComponentConfig,
    count: Option<u32>,
    source: ExtractionSource,
    error: Option<String>,
    raw: Option<String>,
}

/// Router combining deterministic rules, LLM extraction and keyword fallbacks.
#[derive(Clone)]
pub struct DeterministicRouter {
    extractor: LlmExtractor,
}

impl DeterministicRouter {
    pub fn new(extractor: LlmExtractor) -> Self {
        Self { extractor }
    }

    /// A router that never calls an LLM.
    pub fn heuristic_only() -> Self {
        Self::new(LlmExtractor::disabled())
    }

    /// Path 1: the kind is fixed by the caller and never re-derived.
    async fn resolve_fixed(&self, request: &IntentRequest, kind: ComponentKind) -> (Intent, DebugTrace) {
        let caller_config = request.caller_config.as_ref();

        if let Some(patch) = caller_config.filter(|p| p.kind() == kind) {
            tracing::info!(
                trace_id = %request.trace_id,
                kind = %kind,
                "Caller supplied kind and configuration, skipping text analysis"
            );
            let intent = Intent::add(merge::complete_config(patch), request.raw_message.clone())
                .with_count(Some(request.caller_count.unwrap_or(1)));
            return (intent, DebugTrace::new(ResolutionPath::DeterministicAdvancedConfig));
        }

        if let Some(patch) = caller_config {
            tracing::warn!(
                trace_id = %request.trace_id,
                fixed_kind = %kind,
                config_kind = %patch.kind(),
                "Caller configuration does not match the fixed kind, ignoring it"
            );
        }

        let outcome = self.extract_for(kind, &request.raw_message, caller_config).await;
        let count = request.caller_count.or(outcome.count).unwrap_or(1);
        tracing::info!(
            trace_id = %request.trace_id,
            kind = %kind,
            count,
            source = ?outcome.source,
            "Resolved configuration for caller-fixed kind"
        );

        let mut trace = DebugTrace::new(ResolutionPath::DeterministicWithConfigExtraction);
        trace.raw_extraction_response = outcome.raw;
        trace.extraction = outcome.source;
        trace.extraction_error = outcome.error;

        let intent = Intent::add(outcome.config, request.raw_message.clone()).with_count(Some(count));
        (intent, trace)
    }

    /// Path 2: full classification, then specialized extraction.
    async fn resolve_open(&self, request: &IntentRequest) -> (Intent, DebugTrace) {
        let message = &request.raw_message;
        let attempt = self.extractor.coarse_intent(message).await;

        let (guess, mut trace): (IntentGuess, DebugTrace) = match attempt.outcome {
            Ok(guess) => {
                let mut trace = DebugTrace::new(ResolutionPath::LlmIntent);
                trace.raw_llm_response = attempt.raw;
                (guess, trace)
            }
            Err(e) => {
                tracing::warn!(
                    trace_id = %request.trace_id,
                    error = %e,
                    "LLM intent parsing failed, falling back to rule-based classifier"
                );
                let mut trace = DebugTrace::new(ResolutionPath::RuleBasedClassifier);
                trace.raw_llm_response = attempt.raw;
                trace.llm_parse_error = Some(e.to_string());
                (classifier::classify(message).guess, trace)
            }
        };

        trace.parsed_intent = Some(IntentSnapshot {
            guess: guess.clone(),
            used_fallback: trace.path == ResolutionPath::RuleBasedClassifier,
        });

        let Some(kind) = guess.component_type else {
            if guess.action == ActionKind::Add {
                tracing::info!(trace_id = %request.trace_id, "No component resolved, clarification needed");
            }
            let intent = Intent::from_guess(guess, None);
            return (intent, trace);
        };

        let outcome = self
            .extract_for(kind, message, request.caller_config.as_ref())
            .await;
        let count = request.caller_count.or(outcome.count).or(guess.count);

        tracing::info!(
            trace_id = %request.trace_id,
            action = %guess.action,
            kind = %kind,
            count = ?count,
            specialized_count = ?outcome.count,
            source = ?outcome.source,
            "Resolved intent"
        );

        trace.raw_extraction_response = outcome.raw;
        trace.extraction = outcome.source;
        trace.extraction_error = outcome.error;

        let intent = Intent::from_guess(guess, Some(outcome.config)).with_count(count);
        (intent, trace)
    }

    /// Specialized extraction for a resolved kind. Uses the caller's patch
    /// only when it belongs to that kind.
    async fn extract_for(&self, kind: ComponentKind, message: &str, user: Option<&ConfigPatch>) -> ConfigOutcome {
        match kind {
            ComponentKind::Metrics => {
                self.extract_config::<MetricsConfig>(message, user.and_then(MetricsConfig::patch_of))
                    .await
            }
            ComponentKind::Table => {
                self.extract_config::<TableConfig>(message, user.and_then(TableConfig::patch_of))
                    .await
            }
            ComponentKind::TextBox => {
                self.extract_config::<TextBoxConfig>(message, user.and_then(TextBoxConfig::patch_of))
                    .await
            }
            ComponentKind::Chart => {
                self.extract_config::<ChartConfig>(message, user.and_then(ChartConfig::patch_of))
                    .await
            }
            ComponentKind::Image => {
                self.extract_config::<ImageConfig>(message, user.and_then(ImageConfig::patch_of))
                    .await
            }
        }
    }

    async fn extract_config<C: Inferable>(&self, message: &str, user: Option<&C::Patch>) -> ConfigOutcome {
        let attempt = self.extractor.extract::<C>(message).await;

        match attempt.outcome {
            Ok(extraction) => {
                tracing::debug!(
                    kind = %C::KIND,
                    count = ?extraction.count,
                    "Specialized extraction succeeded"
                );
                let config = merge::merge::<C>(&extraction.patch, user).into_config();
                log_structure(&config);
                ConfigOutcome {
                    config,
                    count: extraction.count,
                    source: ExtractionSource::Llm,
                    error: None,
                    raw: attempt.raw,
                }
            }
            Err(e) => {
                tracing::warn!(
                    kind = %C::KIND,
                    error = %e,
                    "Specialized extraction failed, falling back to keywords"
                );
                let inferred = C::infer(&message.to_lowercase());
                ConfigOutcome {
                    config: merge::merge_onto(&inferred, user).into_config(),
                    count: None,
                    source: ExtractionSource::HeuristicFallback,
                    error: Some(e.to_string()),
                    raw: attempt.raw,
                }
            }
        }
    }
}

/// Structural dimensions are logged apart from the instance count.
fn log_structure(config: &ComponentConfig) {
    match config {
        ComponentConfig::Table(t) if t.rows.is_some() || t.columns.is_some() => {
            tracing::debug!(rows = ?t.rows, columns = ?t.columns, "Table structure (distinct from count)");
        }
        ComponentConfig::TextBox(t) if t.items_per_instance.is_some() => {
            tracing::debug!(
                items_per_instance = ?t.items_per_instance,
                "Text box items (distinct from count)"
            );
        }
        _ => {}
    }
}

#[async_trait]
impl IntentRouter for DeterministicRouter {
    async fn resolve(&self, request: &IntentRequest) -> Resolution {
        tracing::debug!(
            trace_id = %request.trace_id,
            message_length = request.raw_message.len(),
            fixed_kind = ?request.caller_fixed_kind,
            has_config = request.caller_config.is_some(),
            "Resolving intent"
        );

        let (intent, mut trace) = match request.caller_fixed_kind {
            Some(kind) => self.resolve_fixed(request, kind).await,
            None => self.resolve_open(request).await,
        };

        let debug = request.want_debug.then(|| {
            trace.extracted_params = intent
                .component
                .as_ref()
                .map(ComponentConfig::non_null_fields)
                .unwrap_or_default();
            trace.would_send = GenerationRequest::plan(&intent, request.placement.as_ref());
            trace
        });

        Resolution { intent, debug }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_intent_core::types::{ChartType, TablePatch};

    #[tokio::test]
    async fn test_fixed_kind_with_config_skips_analysis() {
        let router = DeterministicRouter::heuristic_only();
        let request = IntentRequest::text("make it a chart with 3 metrics")
            .with_kind(ComponentKind::Table)
            .with_config(ConfigPatch::Table(TablePatch {
                rows: Some(4),
                ..Default::default()
            }))
            .with_debug();

        let resolution = router.resolve(&request).await;
        let intent = resolution.intent;
        assert_eq!(intent.component_type(), Some(ComponentKind::Table));
        assert_eq!(intent.count, Some(1));
        assert_eq!(intent.confidence, 1.0);
        assert_eq!(intent.action, ActionKind::Add);
        assert_eq!(
            resolution.debug.map(|d| d.path),
            Some(ResolutionPath::DeterministicAdvancedConfig)
        );
    }

    #[tokio::test]
    async fn test_fixed_chart_heuristic_extraction() {
        let router = DeterministicRouter::heuristic_only();
        let request = IntentRequest::text("stacked bar chart with insights").with_kind(ComponentKind::Chart);

        let intent = router.resolve(&request).await.intent;
        match intent.component {
            Some(ComponentConfig::Chart(c)) => {
                assert_eq!(c.chart_type, ChartType::BarStacked);
                assert!(c.include_insights);
            }
            other => panic!("expected chart config, got {other:?}"),
        }
        assert_eq!(intent.count, Some(1));
    }

    #[tokio::test]
    async fn test_no_debug_unless_asked() {
        let router = DeterministicRouter::heuristic_only();
        let resolution = router.resolve(&IntentRequest::text("add 3 metrics")).await;
        assert!(resolution.debug.is_none());
        assert_eq!(resolution.intent.count, Some(3));
    }
}

//! Three-tier configuration merge: user fields over extracted fields over
//! schema defaults.

use serde::Serialize;
use serde_json::{Map, Value};

use slide_intent_core::types::{
    ChartConfig, ComponentConfig, ComponentSettings, ConfigPatch, ImageConfig, MetricsConfig,
    TableConfig, TextBoxConfig,
};
use slide_intent_core::Result;

/// Merge an extracted patch and an optional user patch into a complete
/// configuration.
///
/// Non-null extracted fields apply first, then non-null user fields; the
/// rest take schema defaults. The user patch is clamped like an extracted
/// one. If the result fails validation the user patch completed with
/// defaults is used, or the schema default if that fails too.
pub fn merge<C: ComponentSettings>(extracted: &C::Patch, user: Option<&C::Patch>) -> C {
    let user = sanitized::<C>(user);
    let mut fields = Map::new();
    overlay(&mut fields, extracted);
    if let Some(user) = &user {
        overlay(&mut fields, user);
    }
    build_or_recover(fields, user.as_ref(), C::default())
}

/// Apply a user patch over an already complete configuration, such as a
/// keyword-inferred one. Falls back to `base` itself on failure.
pub fn merge_onto<C: ComponentSettings>(base: &C, user: Option<&C::Patch>) -> C {
    let Some(user) = sanitized::<C>(user) else {
        return base.clone();
    };
    let mut fields = Map::new();
    overlay(&mut fields, base);
    overlay(&mut fields, &user);
    build_or_recover(fields, Some(&user), base.clone())
}

/// Complete a user patch with schema defaults.
pub fn complete<C: ComponentSettings>(user: &C::Patch) -> C {
    merge::<C>(&C::Patch::default(), Some(user))
}

/// Complete a caller-supplied patch of any kind.
pub fn complete_config(patch: &ConfigPatch) -> ComponentConfig {
    match patch {
        ConfigPatch::Metrics(p) => complete::<MetricsConfig>(p).into_config(),
        ConfigPatch::Table(p) => complete::<TableConfig>(p).into_config(),
        ConfigPatch::TextBox(p) => complete::<TextBoxConfig>(p).into_config(),
        ConfigPatch::Chart(p) => complete::<ChartConfig>(p).into_config(),
        ConfigPatch::Image(p) => complete::<ImageConfig>(p).into_config(),
    }
}

/// Caller patches are as untrusted as LLM ones: clamp a copy.
fn sanitized<C: ComponentSettings>(user: Option<&C::Patch>) -> Option<C::Patch> {
    user.map(|patch| {
        let mut patch = patch.clone();
        C::sanitize(&mut patch);
        patch
    })
}

fn build_or_recover<C: ComponentSettings>(fields: Map<String, Value>, user: Option<&C::Patch>, fallback: C) -> C {
    match build::<C>(fields) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                kind = %C::KIND,
                error = %e,
                "Merged configuration rejected, using best prior configuration"
            );
            user.and_then(|user| {
                let mut fields = Map::new();
                overlay(&mut fields, user);
                build::<C>(fields).ok()
            })
            .unwrap_or(fallback)
        }
    }
}

fn build<C: ComponentSettings>(fields: Map<String, Value>) -> Result<C> {
    let config: C = serde_json::from_value(Value::Object(fields))?;
    config.validate()?;
    Ok(config)
}

/// Copy every non-null top-level field of `layer` into `target`.
fn overlay(target: &mut Map<String, Value>, layer: &impl Serialize) {
    if let Ok(Value::Object(map)) = serde_json::to_value(layer) {
        target.extend(map.into_iter().filter(|(_, v)| !v.is_null()));
    }
}

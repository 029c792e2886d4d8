//! MCP Tool handlers
//!
//! Implementation of each MCP tool's functionality.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::fixes::ImprovementSynthesizer;
use crate::knowledge::{DocumentIndex, PracticeQuery};
use crate::models::ConfigurationBundle;
use crate::patterns::{PatternFilter, PatternRepository};
use crate::reporters::{format_suggestions, format_validation};
use crate::rules::ValidationEngine;

/// State shared across tool calls
pub struct HandlerState {
    pub engine: Arc<ValidationEngine>,
    pub synthesizer: ImprovementSynthesizer,
    pub patterns: PatternRepository,
    pub knowledge: DocumentIndex,
}

impl HandlerState {
    pub fn new(
        engine: Arc<ValidationEngine>,
        patterns: PatternRepository,
        knowledge: DocumentIndex,
    ) -> Self {
        Self {
            synthesizer: ImprovementSynthesizer::new(engine.clone()),
            engine,
            patterns,
            knowledge,
        }
    }
}

impl Default for HandlerState {
    fn default() -> Self {
        Self::new(
            Arc::new(ValidationEngine::new()),
            PatternRepository::with_defaults(),
            DocumentIndex::default(),
        )
    }
}

fn bundle_arg(args: &Value) -> Result<ConfigurationBundle> {
    let files = args.get("files").context("Missing required argument: files")?;
    Ok(ConfigurationBundle::from_json(files)?)
}

/// Handle ValidateConfiguration tool
pub fn handle_validate(state: &HandlerState, args: &Value) -> Result<Value> {
    let bundle = bundle_arg(args)?;
    let report = state.engine.validate(&bundle);
    Ok(json!({
        "issues": report.findings,
        "summary": report.summary,
        "formatted": format_validation(&report),
        "successful": report.successful(),
    }))
}

/// Handle SuggestImprovements tool
pub fn handle_suggest(state: &HandlerState, args: &Value) -> Result<Value> {
    let bundle = bundle_arg(args)?;
    let improvements = state.synthesizer.suggest(&bundle);
    Ok(json!({
        "formattedGuide": format_suggestions(&improvements),
        "improvements": improvements,
    }))
}

#[derive(Debug, Deserialize)]
struct PatternArgs {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    filter: PatternFilter,
}

/// Handle GetPatternTemplate tool
pub fn handle_get_pattern_template(state: &HandlerState, args: &Value) -> Result<Value> {
    let parsed: PatternArgs =
        serde_json::from_value(args.clone()).context("Invalid pattern query")?;

    if let Some(id) = parsed.id.filter(|id| !id.is_empty()) {
        let pattern = state.patterns.get(&id)?;
        return Ok(json!({ "patterns": [pattern] }));
    }

    let patterns = state.patterns.find(&parsed.filter);
    Ok(json!({
        "count": patterns.len(),
        "patterns": patterns,
    }))
}

/// Handle GetBestPractices tool
pub fn handle_get_best_practices(state: &HandlerState, args: &Value) -> Result<Value> {
    let query: PracticeQuery =
        serde_json::from_value(args.clone()).context("Invalid best practice query")?;
    let practices = state.knowledge.best_practices(&query);
    Ok(json!({
        "count": practices.len(),
        "practices": practices,
    }))
}

/// Handle GetModuleStructure tool
pub fn handle_get_module_structure(state: &HandlerState, args: &Value) -> Result<Value> {
    let structure_type = args.get("type").and_then(|v| v.as_str());
    let provider = args.get("provider").and_then(|v| v.as_str());
    let structures = state.knowledge.module_structures(structure_type, provider);
    Ok(json!({
        "count": structures.len(),
        "structures": structures,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_shape() {
        let state = HandlerState::default();
        let result = handle_validate(
            &state,
            &json!({"files": {"main.tf": "resource \"aws_instance\" \"web_server\" {\n  tags = {}\n}\n"}}),
        )
        .unwrap();
        assert_eq!(result["summary"]["fileCount"], 1);
        assert_eq!(result["summary"]["errorCount"], 0);
        assert_eq!(result["successful"], true);
        assert!(result["issues"].as_array().unwrap().len() >= 3);
        assert!(result["formatted"]
            .as_str()
            .unwrap()
            .starts_with("Validation summary: 1 files analyzed"));
    }

    #[test]
    fn test_validate_requires_files_object() {
        let state = HandlerState::default();
        assert!(handle_validate(&state, &json!({})).is_err());
        assert!(handle_validate(&state, &json!({"files": ["main.tf"]})).is_err());
    }

    #[test]
    fn test_suggest_shape() {
        let state = HandlerState::default();
        let result = handle_suggest(&state, &json!({"files": {}})).unwrap();
        assert_eq!(result["improvements"].as_object().unwrap().len(), 4);
        assert!(result["formattedGuide"]
            .as_str()
            .unwrap()
            .starts_with("Suggested improvements for 4 files:"));
    }

    #[test]
    fn test_pattern_by_id_and_filter() {
        let state = HandlerState::default();
        let by_id = handle_get_pattern_template(&state, &json!({"id": "gcp-vpc-basic"})).unwrap();
        assert_eq!(by_id["patterns"][0]["provider"], "gcp");

        let filtered =
            handle_get_pattern_template(&state, &json!({"provider": "aws", "tags": ["vpc"]}))
                .unwrap();
        assert_eq!(filtered["count"], 1);

        assert!(handle_get_pattern_template(&state, &json!({"id": "missing"})).is_err());
        assert!(handle_get_pattern_template(&state, &json!({"provider": "oracle"})).is_err());
    }

    #[test]
    fn test_best_practices_and_structures() {
        let state = HandlerState::default();
        let practices =
            handle_get_best_practices(&state, &json!({"category": "security"})).unwrap();
        assert_eq!(practices["count"], 1);

        let structures =
            handle_get_module_structure(&state, &json!({"type": "basic"})).unwrap();
        assert_eq!(structures["structures"][0]["type"], "basic");
    }
}

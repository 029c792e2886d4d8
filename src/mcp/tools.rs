//! MCP Tool definitions
//!
//! Defines the available tools and their JSON schemas for the MCP protocol.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const VALIDATE_CONFIGURATION: &str = "ValidateConfiguration";
pub const SUGGEST_IMPROVEMENTS: &str = "SuggestImprovements";
pub const GET_PATTERN_TEMPLATE: &str = "GetPatternTemplate";
pub const GET_BEST_PRACTICES: &str = "GetBestPractices";
pub const GET_MODULE_STRUCTURE: &str = "GetModuleStructure";

/// Tool definition for MCP
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: ToolSchema,
}

/// JSON Schema for tool input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ToolSchema {
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Some(BTreeMap::new()),
            required: None,
        }
    }

    pub fn with_property(mut self, name: &str, schema: Value) -> Self {
        if let Some(ref mut props) = self.properties {
            props.insert(name.to_string(), schema);
        }
        self
    }

    pub fn with_required(mut self, fields: Vec<&str>) -> Self {
        self.required = Some(fields.into_iter().map(String::from).collect());
        self
    }
}

fn files_property() -> Value {
    json!({
        "type": "object",
        "description": "Map of file name to file content, e.g. {\"main.tf\": \"...\"}",
        "additionalProperties": { "type": "string" }
    })
}

fn string_property(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn enum_property(description: &str, values: &[&str]) -> Value {
    json!({ "type": "string", "description": description, "enum": values })
}

fn string_list_property(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": { "type": "string" }
    })
}

/// Get all tools served over MCP
pub fn get_available_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: VALIDATE_CONFIGURATION.to_string(),
            description: "Validate Terraform configuration files against best practices. Returns findings with severity, category and a suggested fix.".to_string(),
            input_schema: ToolSchema::object()
                .with_property("files", files_property())
                .with_required(vec!["files"]),
        },
        Tool {
            name: SUGGEST_IMPROVEMENTS.to_string(),
            description: "Suggest file content that fixes best-practice gaps: scaffolds for missing standard files and TODO notes on files with problems.".to_string(),
            input_schema: ToolSchema::object()
                .with_property("files", files_property())
                .with_required(vec!["files"]),
        },
        Tool {
            name: GET_PATTERN_TEMPLATE.to_string(),
            description: "Look up Terraform pattern templates by id, or filter by category, provider, complexity, tags and free-text query.".to_string(),
            input_schema: ToolSchema::object()
                .with_property("id", string_property("Exact pattern id"))
                .with_property("category", enum_property(
                    "Pattern category",
                    &["compute", "networking", "storage", "database", "security", "application", "monitoring"],
                ))
                .with_property("provider", enum_property("Cloud provider", &["aws", "azure", "gcp", "generic"]))
                .with_property("complexity", enum_property("Complexity level", &["basic", "intermediate", "advanced"]))
                .with_property("tags", string_list_property("Match patterns carrying any of these tags"))
                .with_property("query", string_property("Substring of name, description or id")),
        },
        Tool {
            name: GET_BEST_PRACTICES.to_string(),
            description: "Search Terraform best-practice articles by topic, category, provider and keywords.".to_string(),
            input_schema: ToolSchema::object()
                .with_property("topic", string_property("Substring of title or description"))
                .with_property("category", string_property("Exact category, e.g. security"))
                .with_property("provider", string_property("Exact provider, e.g. aws"))
                .with_property("keywords", string_list_property("Match articles mentioning any keyword")),
        },
        Tool {
            name: GET_MODULE_STRUCTURE.to_string(),
            description: "Get recommended module layouts with the purpose and starter content of each file.".to_string(),
            input_schema: ToolSchema::object()
                .with_property("type", string_property("Structure type, e.g. basic or aws"))
                .with_property("provider", string_property("Provider, e.g. aws")),
        },
    ]
}

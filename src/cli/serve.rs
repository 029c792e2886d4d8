//! MCP server command handler

use anyhow::Result;
use std::sync::Arc;

use tfadvisor::knowledge::DocumentIndex;
use tfadvisor::mcp::{run_server, HandlerState};
use tfadvisor::patterns::PatternRepository;
use tfadvisor::rules::ValidationEngine;

/// Run the MCP server
pub fn run(
    engine: Arc<ValidationEngine>,
    patterns: PatternRepository,
    knowledge: DocumentIndex,
) -> Result<()> {
    run_server(HandlerState::new(engine, patterns, knowledge))
}

//! MCP (Model Context Protocol) Server
//!
//! Exposes validation, suggestions and the pattern and document corpora to
//! AI assistants via JSON-RPC over stdio.
//!
//! # Usage
//!
//! ```bash
//! tfadvisor serve
//! ```
//!
//! # Claude Desktop Configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "tfadvisor": {
//!       "command": "tfadvisor",
//!       "args": ["serve"]
//!     }
//!   }
//! }
//! ```
//!
//! # Tools
//!
//! - `ValidateConfiguration` - Run every rule over a file map
//! - `SuggestImprovements` - Scaffold missing files and annotate problem files
//! - `GetPatternTemplate` - Look up or filter pattern templates
//! - `GetBestPractices` - Search best-practice articles
//! - `GetModuleStructure` - Recommended module layouts
//!
//! Documents are also served as resources (`resources/list`, `resources/read`).

mod handlers;
mod server;
mod tools;

pub use handlers::HandlerState;
pub use server::{run_server, McpServer};
pub use tools::{get_available_tools, Tool, ToolSchema};

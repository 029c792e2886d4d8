//! CLI command definitions and handlers

mod bundle;
mod catalog;
mod serve;
mod suggest;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use tfadvisor::config::{load_config, ProjectConfig};
use tfadvisor::knowledge::DocumentIndex;
use tfadvisor::patterns::PatternRepository;
use tfadvisor::rules::ValidationEngine;

/// tfadvisor - Terraform best-practice validation
#[derive(Parser, Debug)]
#[command(name = "tfadvisor")]
#[command(
    version,
    about = "Validate Terraform configurations against best practices and suggest fixes",
    long_about = "tfadvisor runs a fixed set of best-practice rules over Terraform \
configuration files (structure, naming, security, documentation, module and \
resource hygiene) and synthesizes file content that fixes what it finds.\n\n\
It also serves the same checks, plus a pattern and best-practice corpus, to AI \
assistants over MCP (JSON-RPC on stdio).",
    after_help = "\
Examples:
  tfadvisor validate .                        Validate the module in the current directory
  tfadvisor validate infra/ --format json     JSON output for scripting
  tfadvisor validate . --fail-on-error        Exit code 1 on any error finding (CI mode)
  tfadvisor suggest . --output-dir fixes/     Write suggested files to fixes/
  tfadvisor patterns --provider aws           List AWS pattern templates
  tfadvisor serve                             Start MCP server for AI assistants"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); TFADVISOR_LOG overrides
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: tfadvisor.toml in the working directory)
    #[arg(long, global = true, env = "TFADVISOR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate Terraform files against the rule set
    #[command(after_help = "\
Examples:
  tfadvisor validate .                       Validate current directory
  tfadvisor validate main.tf                 Validate a single file
  tfadvisor validate . --format markdown     Markdown report")]
    Validate {
        /// Directory or single file to validate
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Exit with code 1 when any error finding is reported
        #[arg(long)]
        fail_on_error: bool,
    },

    /// Suggest file content that fixes best-practice gaps
    Suggest {
        /// Directory or single file to improve
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Write each suggested file under this directory instead of printing
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,
    },

    /// List the rule catalogue
    Rules,

    /// Search pattern templates
    Patterns {
        /// Exact pattern id (prints the full template)
        #[arg(long)]
        id: Option<String>,

        /// compute, networking, storage, database, security, application, monitoring
        #[arg(long)]
        category: Option<String>,

        /// aws, azure, gcp, generic
        #[arg(long)]
        provider: Option<String>,

        /// basic, intermediate, advanced
        #[arg(long)]
        complexity: Option<String>,

        /// Match any of these tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Substring of name, description or id
        #[arg(long)]
        query: Option<String>,

        /// Emit JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Search best-practice articles
    Practices {
        /// Substring of title or description
        #[arg(long)]
        topic: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        provider: Option<String>,

        /// Match any of these keywords (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,

        /// Emit JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Start MCP server for AI assistant integration
    Serve,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(Path::new("."), cli.config.as_deref())?;

    match cli.command {
        Commands::Validate {
            path,
            format,
            fail_on_error,
        } => {
            let format = format.unwrap_or_else(|| config.format().to_string());
            let fail_on_error = fail_on_error || config.fail_on_error();
            validate::run(&path, &format, fail_on_error, &build_engine(&config))
        }

        Commands::Suggest {
            path,
            format,
            output_dir,
        } => {
            let format = format.unwrap_or_else(|| config.format().to_string());
            suggest::run(
                &path,
                &format,
                output_dir.as_deref(),
                Arc::new(build_engine(&config)),
            )
        }

        Commands::Rules => catalog::rules(&build_engine(&config)),

        Commands::Patterns {
            id,
            category,
            provider,
            complexity,
            tags,
            query,
            json,
        } => catalog::patterns(
            &load_patterns(&config),
            catalog::PatternArgs {
                id,
                category,
                provider,
                complexity,
                tags,
                query,
            },
            json,
        ),

        Commands::Practices {
            topic,
            category,
            provider,
            keywords,
            json,
        } => {
            let query = tfadvisor::knowledge::PracticeQuery {
                topic,
                category,
                provider,
                keywords,
            };
            catalog::practices(&load_documents(&config), &query, json)
        }

        Commands::Serve => serve::run(
            Arc::new(build_engine(&config)),
            load_patterns(&config),
            load_documents(&config),
        ),
    }
}

fn build_engine(config: &ProjectConfig) -> ValidationEngine {
    ValidationEngine::builder()
        .parallel(config.parallel())
        .workers(config.workers())
        .build()
}

/// Pattern corpus from the configured index, or the built-in one
fn load_patterns(config: &ProjectConfig) -> PatternRepository {
    let Some(index) = config.pattern_index() else {
        return PatternRepository::with_defaults();
    };
    match PatternRepository::load_index(&index) {
        Ok(repo) => repo,
        Err(e) => {
            warn!(
                "Failed to load pattern index {}: {}; using built-in patterns",
                index.display(),
                e
            );
            PatternRepository::with_defaults()
        }
    }
}

fn load_documents(config: &ProjectConfig) -> DocumentIndex {
    DocumentIndex::with_defaults(config.authority_sources())
}

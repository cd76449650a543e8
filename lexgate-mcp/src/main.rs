// lexgate-mcp/src/main.rs
// ============================================================================
// Module: Lexgate MCP Binary
// Description: Server entry point for the stdio transport.
// Purpose: Load configuration, build the registry, and serve tool calls.
// Dependencies: lexgate-mcp, clap
// ============================================================================

//! Server binary: one JSON tool call per stdin line, one envelope per
//! stdout line, audit JSON lines on stderr or a file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use lexgate_mcp::AuditSink;
use lexgate_mcp::FileAuditSink;
use lexgate_mcp::NoopAuditSink;
use lexgate_mcp::NoopMetrics;
use lexgate_mcp::ServerConfig;
use lexgate_mcp::StderrAuditSink;
use lexgate_mcp::ToolRouter;
use lexgate_mcp::build_registry;
use lexgate_mcp::config::AuditMode;
use lexgate_mcp::serve_stdio;

/// Legal-research tool server over a local indexed corpus.
#[derive(Debug, Parser)]
#[command(name = "lexgate-mcp", version, about)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Corpus database path, overriding the config file.
    #[arg(long)]
    database: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => match ServerConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("lexgate-mcp: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => ServerConfig::default(),
    };
    if let Some(database) = cli.database {
        config.database.path = database;
    }

    let audit: Arc<dyn AuditSink> = match config.audit.mode {
        AuditMode::Stderr => Arc::new(StderrAuditSink),
        AuditMode::None => Arc::new(NoopAuditSink),
        AuditMode::File => {
            let Some(path) = &config.audit.path else {
                eprintln!("lexgate-mcp: audit.path required for file mode");
                return ExitCode::FAILURE;
            };
            match FileAuditSink::new(path) {
                Ok(sink) => Arc::new(sink),
                Err(err) => {
                    eprintln!("lexgate-mcp: audit log open failed: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    let registry = match build_registry(&config) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("lexgate-mcp: {err}");
            return ExitCode::FAILURE;
        }
    };
    let router = ToolRouter::new(registry, audit, Arc::new(NoopMetrics));

    match serve_stdio(&router, config.transport.max_line_bytes) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lexgate-mcp: {err}");
            ExitCode::FAILURE
        }
    }
}

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lsbridge_core::config::Config;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lsbridge",
    version,
    about = "MCP bridge to a language-server code-intelligence backend",
    long_about = "lsbridge exposes a code-intelligence HTTP backend (definitions, references,\n\
        workspace files, source ranges) as Model Context Protocol tools.\n\n\
        Quick start:\n  \
        lsbridge list-tools\n  \
        lsbridge serve-mcp --backend-url http://localhost:4444\n  \
        lsbridge call list_files --args '{\"glob\": \"**/*.py\"}'"
)]
struct Cli {
    /// Enable verbose logging (set log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (default: ~/.lsbridge/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Backend base URL, overriding config and environment
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server (stdio or HTTP JSON-RPC transport)
    ///
    /// Exposes definitions_in_file, find_definition, find_references,
    /// list_files and read_source_code to AI coding assistants.
    ///
    /// Examples:
    ///   lsbridge serve-mcp
    ///   lsbridge serve-mcp --transport http --port 9200
    ServeMcp {
        /// Transport mode: "stdio" (default) or "http"
        #[arg(long, default_value = "stdio")]
        transport: String,

        /// HTTP server port (only used with --transport http)
        #[arg(long, default_value_t = lsbridge_core::constants::DEFAULT_HTTP_PORT)]
        port: u16,

        /// HTTP server bind address (only used with --transport http)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
    /// Print the tool catalog as JSON
    ListTools,
    /// Invoke one tool and print its content
    ///
    /// Exits with status 1 when the tool returns an error block.
    ///
    /// Example: lsbridge call definitions_in_file --args '{"file_path": "src/main.py"}'
    Call {
        /// Tool name
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long)]
        args: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_file = cli.config.as_deref().map(std::path::Path::new);
    let mut config = Config::load(config_file).context("Failed to load configuration")?;
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
        config.validate().context("Invalid --backend-url")?;
    }

    // Set up tracing; stdout is reserved for protocol traffic and command output.
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Arc::new(config);

    match cli.command {
        Commands::ServeMcp {
            transport,
            port,
            bind,
        } => match transport.as_str() {
            "http" => commands::serve_mcp::run_http(config, &bind, port)?,
            "stdio" => commands::serve_mcp::run(config)?,
            other => anyhow::bail!("unknown transport '{}': expected stdio or http", other),
        },
        Commands::ListTools => commands::list_tools::run()?,
        Commands::Call { tool, args } => {
            let failed = commands::call::run(config, &tool, args.as_deref())?;
            if failed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

// # cfmcpd - Cloudflare MCP Server
//
// Thin integration layer. All Cloudflare logic lives in cfmcp-core; this
// binary only:
//
// 1. Reads configuration from environment variables
// 2. Initializes logging (stderr; stdout carries the protocol)
// 3. Wires `ToolService` to the reqwest transport
// 4. Serves MCP over stdio until the client disconnects
//
// ## Configuration
//
// - `CF_API_TOKEN`: API token (preferred)
// - `CF_API_KEY` + `CF_API_EMAIL`: global API key fallback
// - `CFMCP_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// Missing credentials do not stop the server: every tool call then answers
// with an error envelope naming the variables to set.
//
// ## Example
//
// ```bash
// export CF_API_TOKEN=your_token
// cfmcpd
// ```

mod server;

use anyhow::Result;
use cfmcp_core::{Credentials, ToolService};
use cfmcp_transport_http::HttpTransportFactory;
use rmcp::ServiceExt;
use server::CloudflareServer;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Client disconnected cleanly
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum CfmcpExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<CfmcpExitCode> for ExitCode {
    fn from(code: CfmcpExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    credentials: Credentials,
    log_level: String,
}

/// Read a variable, treating unset and blank alike
fn var(name: &str) -> String {
    env::var(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let log_level = env::var("CFMCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        Self {
            credentials: Credentials {
                api_token: var("CF_API_TOKEN"),
                api_key: var("CF_API_KEY"),
                api_email: var("CF_API_EMAIL"),
            },
            log_level,
        }
    }

    /// Validate the configuration
    ///
    /// Credentials are checked per call, not here.
    fn validate(&self) -> Result<()> {
        parse_level(&self.log_level)?;
        Ok(())
    }
}

fn parse_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "CFMCP_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

fn main() -> ExitCode {
    let config = Config::from_env();

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return CfmcpExitCode::ConfigError.into();
    }

    let log_level = parse_level(&config.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CfmcpExitCode::ConfigError.into();
    }

    info!("Starting cfmcpd");
    match config.credentials.resolve() {
        Ok(auth) => info!("Using {} credentials", auth.kind()),
        Err(_) => warn!("No Cloudflare credentials set; tool calls will return errors"),
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CfmcpExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_server(config).await {
            error!("Server error: {}", e);
            CfmcpExitCode::RuntimeError
        } else {
            CfmcpExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Serve MCP over stdio until the client goes away
async fn run_server(config: Config) -> Result<()> {
    let tools = ToolService::new(config.credentials, Arc::new(HttpTransportFactory::new()));
    let server = CloudflareServer::new(tools);
    let transport = (tokio::io::stdin(), tokio::io::stdout());

    let service = server
        .serve(transport)
        .await
        .map_err(|e| anyhow::anyhow!("MCP server initialization failed: {}", e))?;

    info!("Serving MCP over stdio");
    let reason = service
        .waiting()
        .await
        .map_err(|e| anyhow::anyhow!("MCP server error: {}", e))?;

    info!("MCP session ended: {:?}", reason);
    Ok(())
}

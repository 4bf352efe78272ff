// PS3MAPI MCP Server - console control via Model Context Protocol
//
// Exposes webMAN MOD's PS3MAPI web commands as LLM-friendly tools

use anyhow::{Context, Result};
use ps3mapi_client::{ClientConfig, HttpTransport, Ps3Mapi, Session};
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing::{debug, error, info};

mod handlers;
mod protocol;
mod session;
mod tools;

use handlers::RequestHandler;
use protocol::*;

// Optional console to preselect at startup
const HOST_ENV: &str = "PS3MAPI_HOST";
// HTTP timeout override, whole seconds
const TIMEOUT_ENV: &str = "PS3MAPI_TIMEOUT_SECS";

fn client_config() -> Result<ClientConfig> {
    let mut config = ClientConfig::default();

    if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
        let secs: u64 = raw
            .parse()
            .with_context(|| format!("{} must be a whole number of seconds, got {:?}", TIMEOUT_ENV, raw))?;
        config.timeout = if secs == 0 { None } else { Some(Duration::from_secs(secs)) };
    }

    Ok(config)
}

fn initial_session() -> Result<Session> {
    match std::env::var(HOST_ENV) {
        Ok(host) if !host.is_empty() => {
            info!("Using console host {} from {}", host, HOST_ENV);
            Session::with_host(&host).with_context(|| format!("Invalid {}", HOST_ENV))
        }
        _ => Ok(Session::new()),
    }
}

async fn write_response(stdout: &mut Stdout, response: &JsonRpcResponse) -> Result<()> {
    let response_str = serde_json::to_string(response)?;
    debug!("Sending: {}", response_str);
    stdout.write_all(response_str.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

async fn serve(handler: &RequestHandler<HttpTransport>) -> Result<()> {
    // Stdio transport - stdout carries nothing but JSON-RPC
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);

    info!("PS3MAPI MCP server ready, waiting for requests...");

    // Single-threaded message loop
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                info!("Client disconnected");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                debug!("Received: {}", line);

                // Parse as generic Value first
                let value = match serde_json::from_str::<Value>(line) {
                    Ok(value) => value,
                    Err(e) => {
                        error!("Parse error: {}", e);
                        let response = JsonRpcResponse::error(Value::Null, PARSE_ERROR, "Parse error");
                        write_response(&mut stdout, &response).await?;
                        continue;
                    }
                };

                // Discriminate by id field
                if value.get("id").is_some() {
                    let response = match serde_json::from_value::<JsonRpcRequest>(value) {
                        Ok(request) => handler.handle_request(request).await,
                        Err(e) => {
                            error!("Invalid request: {}", e);
                            JsonRpcResponse::error(Value::Null, INVALID_REQUEST, "Invalid request")
                        }
                    };
                    write_response(&mut stdout, &response).await?;
                } else {
                    match serde_json::from_value::<JsonRpcNotification>(value) {
                        Ok(notification) => handler.handle_notification(notification).await,
                        Err(e) => error!("Invalid notification: {}", e),
                    }
                }
            }
            Err(e) => {
                error!("Read error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Tracing to stderr only - stdout is reserved for JSON-RPC protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ps3mapi_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting PS3MAPI MCP Server...");

    // The blocking HTTP client must be built and dropped outside the runtime
    let client = Ps3Mapi::http(&client_config()?)?;
    let handler = RequestHandler::new(client, initial_session()?);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let served = runtime.block_on(serve(&handler));

    info!("PS3MAPI MCP server shutting down");
    served
}

// MCP request handlers
//
// Handles initialize, list tools, and console tool execution

use crate::protocol::*;
use crate::session::SessionManager;
use crate::tools;
use ps3mapi_client::{BuzzerMode, LightColor, LightMode, Ps3Mapi, Session, Transport};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct ConnectArgs {
    host: String,
}

#[derive(Debug, Deserialize)]
struct NotifyArgs {
    message: String,
}

#[derive(Debug, Deserialize)]
struct LightsArgs {
    color: LightColor,
    mode: LightMode,
}

#[derive(Debug, Deserialize)]
struct BuzzerArgs {
    #[serde(default = "default_buzzer")]
    mode: BuzzerMode,
}

fn default_buzzer() -> BuzzerMode {
    BuzzerMode::Single
}

#[derive(Debug, Deserialize)]
struct IdentityArgs {
    idps1: String,
    idps2: String,
    psid1: String,
    psid2: String,
}

#[derive(Debug, Deserialize)]
struct SetProcessArgs {
    process_id: i64,
}

#[derive(Debug, Deserialize)]
struct SetMemoryArgs {
    address: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct GetMemoryArgs {
    address: String,
    length: u32,
}

fn parse_args<A: DeserializeOwned>(tool: &str, args: serde_json::Value) -> Result<A, String> {
    // Tools without parameters may be called with no arguments at all
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments for {}: {}", tool, e))
}

fn describe(session: &Session) -> String {
    if !session.is_connected() {
        return "Not connected".to_string();
    }
    if session.is_attached() {
        format!("Connected to {}, attached to process {}", session.host(), session.process_id())
    } else {
        format!("Connected to {}, no process attached", session.host())
    }
}

pub struct RequestHandler<T> {
    session_manager: SessionManager<T>,
}

impl<T> RequestHandler<T>
where
    T: Transport + Send + Sync + 'static,
{
    pub fn new(client: Ps3Mapi<T>, session: Session) -> Self {
        Self {
            session_manager: SessionManager::new(client, session),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            "tools/list" => self.handle_list_tools(),
            "tools/call" => self.handle_call_tool(request.params).await,
            _ => Err(JsonRpcError {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {}", request.method),
                data: None,
            }),
        };

        match result {
            Ok(value) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id,
                result: Some(value),
                error: None,
            },
            Err(error) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id,
                result: None,
                error: Some(error),
            },
        }
    }

    pub async fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "notifications/initialized" => {
                info!("Client initialized");
            }
            "notifications/cancelled" => {
                debug!("Request cancelled");
            }
            _ => {
                warn!("Unknown notification: {}", notification.method);
            }
        }
    }

    fn handle_initialize(&self, params: Option<serde_json::Value>) -> Result<serde_json::Value, JsonRpcError> {
        let _params: InitializeParams = serde_json::from_value(params.unwrap_or(json!({})))
            .map_err(|e| JsonRpcError {
                code: INVALID_PARAMS,
                message: format!("Invalid initialize params: {}", e),
                data: None,
            })?;

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {},
            },
            server_info: ServerInfo {
                name: "ps3mapi-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "PS3MAPI console control server for webMAN MOD. \
                Start with ps3.connect, then ps3.attach before using \
                ps3.get_memory or ps3.set_memory."
                    .to_string(),
            ),
        };

        to_json(&result)
    }

    fn handle_list_tools(&self) -> Result<serde_json::Value, JsonRpcError> {
        let result = ListToolsResult {
            tools: tools::get_tools(),
        };

        to_json(&result)
    }

    async fn handle_call_tool(&self, params: Option<serde_json::Value>) -> Result<serde_json::Value, JsonRpcError> {
        let call_params: CallToolParams = serde_json::from_value(params.unwrap_or(json!({})))
            .map_err(|e| JsonRpcError {
                code: INVALID_PARAMS,
                message: format!("Invalid tool call params: {}", e),
                data: None,
            })?;

        let name = call_params.name.as_str();
        let args = call_params.arguments;

        // Route to appropriate handler based on tool name
        let result = match name {
            "ps3.connect" => self.handle_connect(args).await,
            "ps3.disconnect" => self.handle_disconnect(),
            "ps3.status" => self.handle_status(),
            "ps3.shutdown" => self.handle_shutdown().await,
            "ps3.reboot" => self.handle_reboot().await,
            "ps3.notify" => self.handle_notify(args).await,
            "ps3.set_lights" => self.handle_set_lights(args).await,
            "ps3.ring_buzzer" => self.handle_ring_buzzer(args).await,
            "ps3.set_identity" => self.handle_set_identity(args).await,
            "ps3.attach" => self.handle_attach().await,
            "ps3.list_processes" => self.handle_list_processes().await,
            "ps3.set_process" => self.handle_set_process(args),
            "ps3.set_memory" => self.handle_set_memory(args).await,
            "ps3.get_memory" => self.handle_get_memory(args).await,
            _ => Err(format!("Unknown tool: {}", name)),
        };

        let call_result = match result {
            Ok(content) => CallToolResult {
                content: vec![ContentBlock::Text { text: content }],
                is_error: None,
            },
            Err(error) => {
                debug!("{} failed: {}", name, error);
                CallToolResult {
                    content: vec![ContentBlock::Text { text: error }],
                    is_error: Some(true),
                }
            }
        };

        to_json(&call_result)
    }

    async fn handle_connect(&self, args: serde_json::Value) -> Result<String, String> {
        let args: ConnectArgs = parse_args("ps3.connect", args)?;
        let previous = self.session_manager.snapshot()?;

        self.session_manager
            .update(|session| session.set_host(&args.host))?
            .map_err(|e| format!("Failed to connect: {}", e))?;

        let connected = self.session_manager.run(|client, session| client.connect(session)).await;

        if let Err(e) = connected {
            // Fall back to whatever console was in use before
            self.session_manager.update(|session| *session = previous)?;
            return Err(format!("Failed to connect to {}: {}", args.host, e));
        }

        Ok(format!("Connected to console at {}", args.host))
    }

    fn handle_disconnect(&self) -> Result<String, String> {
        let host = self.session_manager.update(|session| {
            let host = session.host().to_string();
            session.disconnect();
            host
        })?;

        if host.is_empty() {
            Ok("No console was connected".to_string())
        } else {
            Ok(format!("Disconnected from {}", host))
        }
    }

    fn handle_status(&self) -> Result<String, String> {
        let session = self.session_manager.snapshot()?;
        Ok(describe(&session))
    }

    async fn handle_shutdown(&self) -> Result<String, String> {
        self.session_manager
            .run(|client, session| client.shutdown(session))
            .await
            .map_err(|e| format!("Failed to shut down: {}", e))?;

        Ok("Console is shutting down; session closed".to_string())
    }

    async fn handle_reboot(&self) -> Result<String, String> {
        self.session_manager
            .run(|client, session| client.reboot(session))
            .await
            .map_err(|e| format!("Failed to reboot: {}", e))?;

        Ok("Console is rebooting; session closed".to_string())
    }

    async fn handle_notify(&self, args: serde_json::Value) -> Result<String, String> {
        let args: NotifyArgs = parse_args("ps3.notify", args)?;

        self.session_manager
            .run(move |client, session| client.notify(session, &args.message))
            .await
            .map_err(|e| format!("Failed to notify: {}", e))?;

        Ok("Notification sent".to_string())
    }

    async fn handle_set_lights(&self, args: serde_json::Value) -> Result<String, String> {
        let args: LightsArgs = parse_args("ps3.set_lights", args)?;

        self.session_manager
            .run(move |client, session| client.set_lights(session, args.color, args.mode))
            .await
            .map_err(|e| format!("Failed to set lights: {}", e))?;

        Ok(format!("LED set: {:?} {:?}", args.color, args.mode))
    }

    async fn handle_ring_buzzer(&self, args: serde_json::Value) -> Result<String, String> {
        let args: BuzzerArgs = parse_args("ps3.ring_buzzer", args)?;

        self.session_manager
            .run(move |client, session| client.ring_buzzer(session, args.mode))
            .await
            .map_err(|e| format!("Failed to ring buzzer: {}", e))?;

        Ok(format!("Buzzer rang ({:?})", args.mode))
    }

    async fn handle_set_identity(&self, args: serde_json::Value) -> Result<String, String> {
        let args: IdentityArgs = parse_args("ps3.set_identity", args)?;

        self.session_manager
            .run(move |client, session| {
                client.set_identity(session, &args.idps1, &args.idps2, &args.psid1, &args.psid2)
            })
            .await
            .map_err(|e| format!("Failed to set IDPS/PSID: {}", e))?;

        Ok("IDPS and PSID updated".to_string())
    }

    async fn handle_attach(&self) -> Result<String, String> {
        let process_id = self
            .session_manager
            .run(|client, session| client.attach(session))
            .await
            .map_err(|e| format!("Failed to attach: {}", e))?;

        Ok(format!("Attached to process {}", process_id))
    }

    async fn handle_list_processes(&self) -> Result<String, String> {
        let processes = self
            .session_manager
            .run(|client, session| client.list_processes(session))
            .await
            .map_err(|e| format!("Failed to list processes: {}", e))?;

        if processes.is_empty() {
            return Ok("No processes reported".to_string());
        }

        let mut output = format!("{} process(es):\n", processes.len());
        for process in &processes {
            let marker = if process.is_eboot() { " [EBOOT]" } else { "" };
            output.push_str(&format!("  {}  {}{}\n", process.id, process.label, marker));
        }

        Ok(output)
    }

    fn handle_set_process(&self, args: serde_json::Value) -> Result<String, String> {
        let args: SetProcessArgs = parse_args("ps3.set_process", args)?;

        self.session_manager
            .update(|session| session.set_process_id(args.process_id))?;

        Ok(format!("Using process {}", args.process_id))
    }

    async fn handle_set_memory(&self, args: serde_json::Value) -> Result<String, String> {
        let args: SetMemoryArgs = parse_args("ps3.set_memory", args)?;
        let summary = format!("Wrote {} at {}", args.value, args.address);

        self.session_manager
            .run(move |client, session| client.set_memory(session, &args.address, &args.value))
            .await
            .map_err(|e| format!("Failed to write memory: {}", e))?;

        Ok(summary)
    }

    async fn handle_get_memory(&self, args: serde_json::Value) -> Result<String, String> {
        let args: GetMemoryArgs = parse_args("ps3.get_memory", args)?;
        let address = args.address.clone();

        let value = self
            .session_manager
            .run(move |client, session| client.get_memory(session, &args.address, args.length))
            .await
            .map_err(|e| format!("Failed to read memory: {}", e))?;

        Ok(format!("{}: {}", address, value))
    }
}

fn to_json<S: serde::Serialize>(value: &S) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError {
        code: INTERNAL_ERROR,
        message: format!("Failed to encode result: {}", e),
        data: None,
    })
}

// Console tools schema definitions
//
// MCP tools for PS3MAPI operations

use crate::protocol::Tool;
use serde_json::json;

fn no_args() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {}
    })
}

pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "ps3.connect".to_string(),
            description: "Connect to a console running webMAN MOD (shows a notification on screen)".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "host": {
                        "type": "string",
                        "description": "Console address (e.g., '192.168.1.20' or '192.168.1.20:8080')"
                    }
                },
                "required": ["host"]
            }),
        },
        Tool {
            name: "ps3.disconnect".to_string(),
            description: "Forget the current console and attached process".to_string(),
            input_schema: no_args(),
        },
        Tool {
            name: "ps3.status".to_string(),
            description: "Show the current console host and attached process".to_string(),
            input_schema: no_args(),
        },
        Tool {
            name: "ps3.shutdown".to_string(),
            description: "Power off the console (ends the session)".to_string(),
            input_schema: no_args(),
        },
        Tool {
            name: "ps3.reboot".to_string(),
            description: "Hard reboot the console (ends the session)".to_string(),
            input_schema: no_args(),
        },
        Tool {
            name: "ps3.notify".to_string(),
            description: "Display a notification message on the console".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "Text to display"
                    }
                },
                "required": ["message"]
            }),
        },
        Tool {
            name: "ps3.set_lights".to_string(),
            description: "Set a console LED color and mode".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "color": {
                        "type": "string",
                        "enum": ["red", "green", "yellow"]
                    },
                    "mode": {
                        "type": "string",
                        "enum": ["off", "on", "blink_fast", "blink_slow"]
                    }
                },
                "required": ["color", "mode"]
            }),
        },
        Tool {
            name: "ps3.ring_buzzer".to_string(),
            description: "Ring the console buzzer".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "mode": {
                        "type": "string",
                        "enum": ["single", "double", "triple"],
                        "default": "single"
                    }
                }
            }),
        },
        Tool {
            name: "ps3.set_identity".to_string(),
            description: "Spoof IDPS and PSID (each given as two 16-character hex halves)".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "idps1": { "type": "string", "description": "First 16 hex characters of the IDPS" },
                    "idps2": { "type": "string", "description": "Last 16 hex characters of the IDPS" },
                    "psid1": { "type": "string", "description": "First 16 hex characters of the PSID" },
                    "psid2": { "type": "string", "description": "Last 16 hex characters of the PSID" }
                },
                "required": ["idps1", "idps2", "psid1", "psid2"]
            }),
        },
        Tool {
            name: "ps3.attach".to_string(),
            description: "Attach to the running EBOOT process".to_string(),
            input_schema: no_args(),
        },
        Tool {
            name: "ps3.list_processes".to_string(),
            description: "List processes running on the console".to_string(),
            input_schema: no_args(),
        },
        Tool {
            name: "ps3.set_process".to_string(),
            description: "Manually select the process used for memory access".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "process_id": {
                        "type": "integer",
                        "description": "Process id from ps3.list_processes"
                    }
                },
                "required": ["process_id"]
            }),
        },
        Tool {
            name: "ps3.set_memory".to_string(),
            description: "Write bytes into the attached process".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "Hex address without 0x prefix (e.g., '10050000')"
                    },
                    "value": {
                        "type": "string",
                        "description": "Hex bytes to write (e.g., '3F800000')"
                    }
                },
                "required": ["address", "value"]
            }),
        },
        Tool {
            name: "ps3.get_memory".to_string(),
            description: "Read bytes from the attached process".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "Hex address without 0x prefix"
                    },
                    "length": {
                        "type": "integer",
                        "description": "Number of bytes to read",
                        "minimum": 1
                    }
                },
                "required": ["address", "length"]
            }),
        },
    ]
}

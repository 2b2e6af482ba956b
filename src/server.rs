//! Line-delimited JSON-RPC request handling for the browser.
//!
//! Exposes search, species detail and type matchups as MCP-style tools. Each
//! request is one JSON object per line; each response is written as one line.

use crate::detail::species_detail;
use crate::repository::DataRepository;
use crate::search::SearchSession;
use crate::type_matchups::resolve_codes;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const PARSE_ERROR: i64 = -32700;

pub struct PokedexServer<'a> {
    repo: &'a DataRepository,
    session: SearchSession,
    search_limit: usize,
}

fn text_content(text: String) -> Value {
    json!({
        "content": [{"type": "text", "text": text}]
    })
}

fn error_content(text: String) -> Value {
    json!({
        "content": [{"type": "text", "text": text}],
        "isError": true
    })
}

impl<'a> PokedexServer<'a> {
    pub fn new(repo: &'a DataRepository, search_limit: usize) -> Self {
        Self {
            repo,
            session: SearchSession::new(),
            search_limit,
        }
    }

    /// Dispatch one JSON-RPC method. `Err` carries a JSON-RPC error object.
    pub fn handle_request(&self, method: &str, params: &Value) -> Result<Value, Value> {
        match method {
            "initialize" => Ok(json!({
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "pokedex-browser",
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
            "tools/list" => Ok(json!({
                "tools": [
                    {
                        "name": "search_species",
                        "description": "Search species by the start of their name",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "query": {
                                    "type": "string",
                                    "description": "Beginning of a species or form name"
                                },
                                "seq": {
                                    "type": "number",
                                    "description": "Increasing client sequence number; older responses are marked stale"
                                },
                                "limit": {
                                    "type": "number",
                                    "description": "Maximum number of results"
                                }
                            },
                            "required": ["query"]
                        }
                    },
                    {
                        "name": "species_detail",
                        "description": "Stats, abilities, moves, type matchups and evolution chains of a species",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "id": {
                                    "type": "number",
                                    "description": "Species id"
                                },
                                "format": {
                                    "type": "string",
                                    "description": "'text' (default) or 'json'"
                                }
                            },
                            "required": ["id"]
                        }
                    },
                    {
                        "name": "type_matchups",
                        "description": "Weaknesses, resistances and immunities of a one- or two-type combination",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "types": {
                                    "type": "array",
                                    "items": {"type": "string"},
                                    "description": "Defending type codes, e.g. [\"water\", \"ground\"]"
                                }
                            },
                            "required": ["types"]
                        }
                    }
                ]
            })),
            "tools/call" => {
                let tool_name = params["name"].as_str().unwrap_or("");
                let args = &params["arguments"];
                Ok(self.handle_tool_call(tool_name, args))
            }
            _ => Err(json!({
                "code": METHOD_NOT_FOUND,
                "message": format!("Method not found: {}", method)
            })),
        }
    }

    fn handle_tool_call(&self, tool_name: &str, args: &Value) -> Value {
        debug!(tool = tool_name, "tool call");
        match tool_name {
            "search_species" => self.search_species(args),
            "species_detail" => self.species_detail(args),
            "type_matchups" => self.type_matchups(args),
            _ => error_content(format!("Unknown tool: {}", tool_name)),
        }
    }

    fn search_species(&self, args: &Value) -> Value {
        let query = args["query"].as_str().unwrap_or("");
        let limit = args["limit"]
            .as_u64()
            .map(|l| l as usize)
            .unwrap_or(self.search_limit);

        let seq = args["seq"].as_u64();
        // Untagged requests are always current
        let stale = seq.is_some_and(|seq| !self.session.admit(seq));
        let hits = if stale {
            debug!(?seq, latest = self.session.latest(), "skipping stale search");
            Vec::new()
        } else {
            self.repo.search(query, limit)
        };

        let body = json!({
            "seq": seq,
            "stale": stale,
            "results": hits,
        });
        text_content(body.to_string())
    }

    fn species_detail(&self, args: &Value) -> Value {
        let Some(id) = args["id"].as_u64().and_then(|id| u32::try_from(id).ok()) else {
            return error_content("Error: 'id' must be a species number".to_string());
        };

        match species_detail(self.repo, id) {
            Ok(detail) => match args["format"].as_str() {
                Some("json") => match serde_json::to_string(&detail) {
                    Ok(text) => text_content(text),
                    Err(e) => error_content(format!("Error: {}", e)),
                },
                _ => text_content(detail.to_string()),
            },
            Err(e) => error_content(format!("Error: {}", e)),
        }
    }

    fn type_matchups(&self, args: &Value) -> Value {
        let codes: Vec<&str> = args["types"]
            .as_array()
            .map(|types| types.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        match resolve_codes(&codes) {
            Ok(result) => text_content(json!(result).to_string()),
            Err(e) => error_content(format!("Error: {}", e)),
        }
    }

    /// Handle one request line. Blank lines and notifications produce no response.
    pub fn handle_line(&self, line: &str) -> Option<Value> {
        if line.trim().is_empty() {
            return None;
        }

        let request: Value = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                return Some(json!({
                    "jsonrpc": "2.0",
                    "id": Value::Null,
                    "error": {"code": PARSE_ERROR, "message": "Parse error"}
                }));
            }
        };

        if !request.is_object() {
            warn!("request is not a JSON object");
            return Some(json!({
                "jsonrpc": "2.0",
                "id": Value::Null,
                "error": {"code": INVALID_REQUEST, "message": "Invalid Request"}
            }));
        }

        let id = request.get("id").cloned()?;
        let method = request["method"].as_str().unwrap_or("");
        let params = &request["params"];

        Some(match self.handle_request(method, params) {
            Ok(result) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": result
            }),
            Err(error) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": error
            }),
        })
    }

    pub fn run<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            if let Some(response) = self.handle_line(&line) {
                writeln!(writer, "{}", response)?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}

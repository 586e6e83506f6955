use std::sync::Arc;

use recur_core::{ProblemSize, Session, expand_size};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

/// Largest `n` that `recur_expand` accepts: every integer up to 2^53 is exact
/// as an f64, so the derivation echoes `n` as given.
const MAX_EXACT_N: u64 = 1 << 53;

const DEFAULT_INSTRUCTIONS: &str = "Expands T(n) = 2T(n/2) + O(n) by the substitution method.\n\n\
     - recur_solve takes the raw text a user typed, validates it as a positive integer and \
       returns the session record {input, solution, error}. A rejected input is reported in \
       `error`, with `solution` cleared.\n\
     - recur_reset clears the session record.\n\
     - recur_state returns the current record without changing it.\n\
     - recur_expand returns the derivation for an integer 1 <= n <= 2^53 without touching the session.";

#[derive(Clone)]
pub struct RecurServer {
    /// One session per server process, shared by all tool calls.
    state: Arc<Mutex<Session>>,
    instructions: Option<String>,
    tool_router: ToolRouter<Self>,
}

impl RecurServer {
    pub fn new(instructions: Option<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(Session::new())),
            instructions,
            tool_router: Self::tool_router(),
        }
    }

    fn session_result(session: &Session) -> CallToolResult {
        CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(session).unwrap_or_default(),
        )])
    }
}

// --- Tool parameter types ---

#[derive(Debug, Deserialize, JsonSchema)]
struct SolveRequest {
    /// Raw input text, exactly as the user typed it (e.g. "8")
    input: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ExpandRequest {
    /// Problem size; must be between 1 and 2^53 (9007199254740992)
    n: u64,
}

#[tool_router]
impl RecurServer {
    #[tool(
        description = "Solve T(n) = 2T(n/2) + O(n) for the given input text. Returns the session record: on success `solution` holds the two-line substitution derivation and `error` is empty; on invalid input `error` holds the message and `solution` is empty."
    )]
    async fn recur_solve(
        &self,
        Parameters(req): Parameters<SolveRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut state = self.state.lock().await;
        let (next, outcome) = std::mem::take(&mut *state).edit(req.input).try_solve();
        match outcome {
            Ok(_) => tracing::info!(input = %next.input, "solved"),
            Err(e) => {
                tracing::info!(input = %next.input, reason = e.rejection().as_str(), "rejected input")
            }
        }
        *state = next;
        Ok(Self::session_result(&state))
    }

    #[tool(description = "Clear the input, solution and error of the session.")]
    async fn recur_reset(&self) -> Result<CallToolResult, McpError> {
        let mut state = self.state.lock().await;
        *state = std::mem::take(&mut *state).reset();
        Ok(Self::session_result(&state))
    }

    #[tool(description = "Return the current session record without changing it.")]
    async fn recur_state(&self) -> Result<CallToolResult, McpError> {
        let state = self.state.lock().await;
        Ok(Self::session_result(&state))
    }

    #[tool(
        description = "Return the substitution derivation of T(n) for an integer 1 <= n <= 2^53 as plain text. Does not touch the session."
    )]
    async fn recur_expand(
        &self,
        Parameters(req): Parameters<ExpandRequest>,
    ) -> Result<CallToolResult, McpError> {
        if req.n > MAX_EXACT_N {
            return Err(McpError::invalid_params(
                format!("n must be at most {MAX_EXACT_N}"),
                None,
            ));
        }
        let size = ProblemSize::new(req.n as f64)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(expand_size(
            size,
        ))]))
    }
}

#[tool_handler]
impl ServerHandler for RecurServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                self.instructions
                    .clone()
                    .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.into()),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

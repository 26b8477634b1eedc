//! Telemetry initialization and registry request span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use crate::lib::errors::{RegistryError, RegistryOperation};

/// Initialize `tracing` and format developer logs.
///
/// Logs go to stderr; stdout is reserved for MCP frames in stdio mode.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of a single registry tool call.
pub struct RequestSpan {
    span: Span,
    started_at: Instant,
    request_id: Uuid,
    operation: RegistryOperation,
}

impl RequestSpan {
    /// Start a request span.
    pub fn start(operation: RegistryOperation) -> Self {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            target: "mcp_registry::registry",
            "registry_request",
            %request_id,
            operation = operation.as_str()
        );
        Self {
            span,
            started_at: Instant::now(),
            request_id,
            operation,
        }
    }

    /// Span to attach to the outbound request future.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span after a successful call.
    pub fn succeed(self, server_count: usize) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "mcp_registry::registry",
            request_id = %self.request_id,
            operation = self.operation.as_str(),
            server_count,
            elapsed_ms,
            "Completed registry request"
        );
    }

    /// Close the span after a failed call.
    pub fn fail(self, err: &RegistryError) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        tracing::warn!(
            target: "mcp_registry::registry",
            request_id = %self.request_id,
            operation = self.operation.as_str(),
            kind = err.kind().as_str(),
            status = err.status(),
            error = %err,
            elapsed_ms,
            "Registry request failed"
        );
    }
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct RuntimeModeTelemetry<'a> {
    pub transport: &'a str,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub config_path: Option<&'a str>,
    pub registry_base_url: &'a str,
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_runtime_mode(telemetry: &RuntimeModeTelemetry<'_>) {
    info!(
        target: "mcp_registry::runtime",
        transport = telemetry.transport,
        host = telemetry.host.unwrap_or(""),
        port = telemetry.port.unwrap_or_default(),
        config_path = telemetry.config_path.unwrap_or("<defaults>"),
        registry_base_url = telemetry.registry_base_url,
        launch_args = ?telemetry.launch_args,
        "Started MCP server"
    );
}

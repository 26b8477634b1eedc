use std::{io, path::PathBuf, pin::Pin, process::Stdio, task, time::Duration};

use anyhow::{Context, Result};
use rmcp::{model::ClientInfo, serve_client};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadBuf},
    process::{ChildStdin, ChildStdout, Command},
    time::timeout,
};

use crate::common::BINARY_PATH;

fn fixture(relative: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(relative)
        .display()
        .to_string()
}

struct ChildIoBridge {
    stdout: ChildStdout,
    stdin: ChildStdin,
}

impl AsyncRead for ChildIoBridge {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut task::Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> task::Poll<io::Result<()>> {
        Pin::new(&mut self.stdout).poll_read(cx, buf)
    }
}

impl AsyncWrite for ChildIoBridge {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut task::Context<'_>,
        data: &[u8],
    ) -> task::Poll<io::Result<usize>> {
        Pin::new(&mut self.stdin).poll_write(cx, data)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> task::Poll<io::Result<()>> {
        Pin::new(&mut self.stdin).poll_flush(cx)
    }

    fn poll_shutdown(
        mut self: Pin<&mut Self>,
        cx: &mut task::Context<'_>,
    ) -> task::Poll<io::Result<()>> {
        Pin::new(&mut self.stdin).poll_shutdown(cx)
    }
}

#[tokio::test]
async fn stdio_spawn_lists_registry_tools() -> Result<()> {
    let mut child = Command::new(BINARY_PATH)
        .env("MCP_CONFIG_PATH", fixture("tests/fixtures/config_valid.toml"))
        .env("RUST_LOG", "info")
        .stdout(Stdio::piped())
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to spawn server process")?;
    let bridge = ChildIoBridge {
        stdout: child.stdout.take().context("child stdout")?,
        stdin: child.stdin.take().context("child stdin")?,
    };
    let stderr_task = child.stderr.take().map(|mut stderr| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
            String::from_utf8_lossy(&buf).into_owned()
        })
    });

    let client = serve_client(ClientInfo::default(), bridge).await?;
    let info = client
        .peer_info()
        .context("server info after initialize")?
        .clone();
    assert_eq!(info.server_info.name, "MCP Registry Client");
    assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    let list = client.list_tools(None).await?;
    let names: Vec<_> = list.tools.iter().map(|tool| tool.name.to_string()).collect();
    assert!(
        names.iter().any(|name| name == "ListMCPServers"),
        "list_tools should include ListMCPServers: {names:?}"
    );
    assert!(
        names.iter().any(|name| name == "GetMCPServer"),
        "list_tools should include GetMCPServer: {names:?}"
    );
    let get_tool = list
        .tools
        .iter()
        .find(|tool| tool.name.as_ref() == "GetMCPServer")
        .context("GetMCPServer tool")?;
    let required = get_tool.input_schema.get("required").cloned();
    assert_eq!(required, Some(serde_json::json!(["server_id"])));
    assert!(
        info.instructions
            .as_deref()
            .is_some_and(|text| text.contains("ListMCPServers")),
        "instructions should point at the tools: {:?}",
        info.instructions
    );

    client.cancel().await?;
    let status = timeout(Duration::from_secs(5), child.wait()).await??;
    assert!(
        status.success(),
        "server should exit cleanly but exit status was {status:?}"
    );
    if let Some(handle) = stderr_task {
        let logs = handle.await?;
        assert!(
            logs.contains("Started MCP server"),
            "startup should be logged to stderr: {logs}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn missing_explicit_config_fails_startup() -> Result<()> {
    let output = Command::new(BINARY_PATH)
        .args(["--config", "/nonexistent/mcp-registry/config.toml"])
        .stdin(Stdio::null())
        .output()
        .await
        .context("failed to run server process")?;

    assert!(!output.status.success(), "startup must fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to read configuration file"),
        "stderr: {stderr}"
    );
    Ok(())
}

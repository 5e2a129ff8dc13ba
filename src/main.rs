use anyhow::Context;
use devrev_mcp::config::ApiConfig;
use devrev_mcp::http::HttpDevRevClient;
use devrev_mcp::server::McpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries JSON-RPC frames, so every log line goes to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = ApiConfig::from_env().context("failed to load DevRev API configuration")?;
    tracing::info!(base_url = %config.base_url, "starting DevRev MCP server");

    let client = HttpDevRevClient::new(config);
    let server = McpServer::new(Box::new(client));
    server.run().await.context("server loop failed")?;

    tracing::info!("server stopped");
    Ok(())
}

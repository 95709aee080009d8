//! Tool Host serving stub tools over stdio.

#[path = "../common/stub_tools.rs"]
mod stub_tools;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let host = aws_mcp_server::ToolHost::new(stub_tools::stub_registry())
        .with_identity("stub-tool-host", "0.0.0");
    aws_mcp_server::serve_stdio(host).await?;
    Ok(())
}

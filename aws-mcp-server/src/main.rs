use clap::Parser;

use aws_mcp_server::HostConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is the protocol channel in stdio mode
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = HostConfig::parse();
    tracing::info!(transport = ?config.transport, "aws-mcp-server starting");

    aws_mcp_server::run(config).await?;
    Ok(())
}

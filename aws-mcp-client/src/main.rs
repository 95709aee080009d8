use clap::Parser;

use aws_mcp_client::{call_and_print, ClientArgs};
use aws_mcp_core::mcp::McpClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = ClientArgs::parse();
    let config = args.server_config().await?;
    tracing::info!(server = %config.name, target = %config.target(), "starting session");

    let client = McpClient::new(config);
    let mut stdout = std::io::stdout();

    let outcome = match &args.call {
        Some(tool) => {
            let arguments = args.call_args.clone().unwrap_or_else(|| serde_json::json!({}));
            call_and_print(&client, tool, arguments, &mut stdout)
                .await
                .map(|_| ())
        }
        None => args.walkthrough().run(&client, &mut stdout).await,
    };

    if let Err(e) = client.disconnect().await {
        tracing::warn!(error = %e, "disconnect failed");
    }

    outcome?;
    Ok(())
}

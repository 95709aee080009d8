//! The demo sequence: handshake, tool listing, then one call per tool.

use std::io::Write;

use aws_mcp_core::mcp::{McpClient, McpError, ToolOutput};
use serde_json::{json, Value};

use crate::error::ClientResult;

/// Optional steps of the walkthrough
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Walkthrough {
    /// `(bucket, key)` for `get_s3_object`
    pub object: Option<(String, String)>,
    /// `(table, key name, key value)` for `query_dynamodb`
    pub item: Option<(String, String, String)>,
}

impl Walkthrough {
    /// Run every step, writing a readable report to `out`.
    ///
    /// A tool that fails, or rejects its arguments, is reported and the walkthrough
    /// moves on. Losing the session ends it with the error.
    pub async fn run<W: Write>(&self, client: &McpClient, out: &mut W) -> ClientResult<()> {
        writeln!(out, "1. Connecting to {}...", client.config().target())?;
        client.connect().await?;
        let info = client.server_info().await?;
        writeln!(
            out,
            "   Connected to: {} {} (protocol {})",
            info.name, info.version, info.protocol_version
        )?;

        writeln!(out, "\n2. Listing available tools...")?;
        for tool in client.list_tools().await? {
            writeln!(out, "   - {}: {}", tool.name, tool.description)?;
        }

        writeln!(out, "\n3. Testing: list_s3_buckets")?;
        report(out, client.call_tool("list_s3_buckets", json!({})).await)?;

        writeln!(out, "\n4. Testing: get_s3_object")?;
        match &self.object {
            Some((bucket, key)) => {
                let args = json!({"bucket": bucket, "key": key});
                report(out, client.call_tool("get_s3_object", args).await)?;
            }
            None => writeln!(out, "   Skipped (pass --bucket and --key)")?,
        }

        writeln!(out, "\n5. Testing: query_dynamodb")?;
        match &self.item {
            Some((table, key, value)) => {
                let args = json!({"table_name": table, "key": key, "value": value});
                report(out, client.call_tool("query_dynamodb", args).await)?;
            }
            None => writeln!(out, "   Skipped (pass --table, --key-name and --key-value)")?,
        }

        Ok(())
    }
}

/// Call one tool and write its text. Fails when the call or the tool fails.
pub async fn call_and_print<W: Write>(
    client: &McpClient,
    tool: &str,
    arguments: Value,
    out: &mut W,
) -> ClientResult<String> {
    let output = client.call_tool(tool, arguments).await?;
    writeln!(out, "{}", output.text)?;
    Ok(output.into_result()?)
}

fn report<W: Write>(out: &mut W, result: Result<ToolOutput, McpError>) -> ClientResult<()> {
    match result {
        Ok(output) => {
            let label = if output.is_error { "Failed" } else { "Result" };
            writeln!(out, "   {}:", label)?;
            for line in output.text.lines() {
                writeln!(out, "   {}", line)?;
            }
            Ok(())
        }
        Err(e) if e.is_invocation_error() => {
            writeln!(out, "   Rejected: {}", e)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

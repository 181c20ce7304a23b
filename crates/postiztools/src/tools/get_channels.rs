use futures::future::BoxFuture;
use serde_json::{json, Value};

use super::ToolOutput;
use crate::postiz::PostizClient;
use postiztools_core::schema::{CliSpec, ToolSpec};

pub const SPEC: ToolSpec = ToolSpec {
    name: "postiz-get-channels",
    description: "Get list of available social media channels/integrations in Postiz",
    params: &[],
    cli: CliSpec {
        group: None,
        command: "channels",
    },
};

pub fn run(client: PostizClient, arguments: Value) -> BoxFuture<'static, ToolOutput> {
    Box::pin(async move { execute(client, arguments).await })
}

async fn execute(client: PostizClient, _arguments: Value) -> ToolOutput {
    match client.get_channels().await {
        Ok(channels) => {
            let count = channels.len();
            ToolOutput::success(json!({
                "channels": channels,
                "count": count,
            }))
        }
        Err(error) => ToolOutput::remote_failure(error),
    }
}

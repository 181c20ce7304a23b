use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, ToolOutput};
use crate::postiz::PostizClient;
use postiztools_core::posts::validate_delete_post;
use postiztools_core::schema::{CliSpec, ParamKind, ParamSpec, ToolSpec};

pub const SPEC: ToolSpec = ToolSpec {
    name: "postiz-delete-post",
    description: "Delete a post from Postiz",
    params: &[ParamSpec {
        name: "id",
        kind: ParamKind::String,
        required: true,
        description: "The ID of the post to delete",
    }],
    cli: CliSpec {
        group: Some("posts"),
        command: "delete",
    },
};

#[derive(Debug, Deserialize)]
struct Args {
    id: String,
}

pub fn run(client: PostizClient, arguments: Value) -> BoxFuture<'static, ToolOutput> {
    Box::pin(async move { execute(client, arguments).await })
}

async fn execute(client: PostizClient, arguments: Value) -> ToolOutput {
    let args: Args = match parse_args(arguments) {
        Ok(args) => args,
        Err(output) => return *output,
    };

    if let Err(error) = validate_delete_post(&args.id) {
        return ToolOutput::invalid(error);
    }

    match client.delete_post(&args.id).await {
        Ok(()) => ToolOutput::success(json!({
            "message": format!("Post {} deleted successfully", args.id),
        })),
        Err(error) => ToolOutput::remote_failure(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postiz::PostizConfig;

    fn test_client() -> PostizClient {
        let config = PostizConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        };
        PostizClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_blank_id_is_enveloped() {
        let output = execute(test_client(), json!({"id": ""})).await;

        assert!(output.is_error);
        assert_eq!(output.payload["success"], json!(false));
        assert_eq!(output.payload["error"], json!("Post ID is required"));
    }

    #[tokio::test]
    async fn test_missing_id_argument_is_enveloped() {
        let output = execute(test_client(), json!({})).await;

        assert!(output.is_error);
        assert!(output.payload["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid arguments:"));
    }
}

use chrono::Utc;
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, ToolOutput};
use crate::postiz::PostizClient;
use postiztools_core::posts::{validate_update_post, UpdatePostParams};
use postiztools_core::schema::{CliSpec, ParamKind, ParamSpec, ToolSpec};
use postiztools_core::status::PostStatus;

pub const SPEC: ToolSpec = ToolSpec {
    name: "postiz-update-post",
    description: "Update an existing post in Postiz",
    params: &[
        ParamSpec {
            name: "id",
            kind: ParamKind::String,
            required: true,
            description: "The ID of the post to update",
        },
        ParamSpec {
            name: "content",
            kind: ParamKind::String,
            required: false,
            description: "New text content for the post",
        },
        ParamSpec {
            name: "integrations",
            kind: ParamKind::StringArray,
            required: true,
            description: "Array of channel/integration IDs (required for updates)",
        },
        ParamSpec {
            name: "status",
            kind: ParamKind::Enum(&["draft", "scheduled", "now"]),
            required: false,
            description: "New post status",
        },
        ParamSpec {
            name: "scheduledDate",
            kind: ParamKind::String,
            required: false,
            description: "ISO 8601 date string for scheduling. IMPORTANT: Always include timezone offset (e.g., \"2024-01-15T17:15:00+01:00\" for CET). Without timezone specification, the system defaults to UTC which may cause incorrect scheduling.",
        },
        ParamSpec {
            name: "images",
            kind: ParamKind::StringArray,
            required: false,
            description: "New array of image URLs or file IDs",
        },
    ],
    cli: CliSpec {
        group: Some("posts"),
        command: "update",
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Args {
    id: String,
    content: Option<String>,
    integrations: Vec<String>,
    status: Option<PostStatus>,
    scheduled_date: Option<String>,
    images: Option<Vec<String>>,
}

pub fn run(client: PostizClient, arguments: Value) -> BoxFuture<'static, ToolOutput> {
    Box::pin(async move { execute(client, arguments).await })
}

async fn execute(client: PostizClient, arguments: Value) -> ToolOutput {
    let args: Args = match parse_args(arguments) {
        Ok(args) => args,
        Err(output) => return *output,
    };

    let params = UpdatePostParams {
        content: args.content,
        integrations: args.integrations,
        status: args.status,
        scheduled_date: args.scheduled_date,
        images: args.images,
    };

    if let Err(error) = validate_update_post(&args.id, &params, Utc::now()) {
        return ToolOutput::invalid(error);
    }

    match client.update_post(&args.id, &params).await {
        Ok(post) => ToolOutput::success(json!({
            "post": post,
            "message": format!("Post {} updated successfully", args.id),
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
    async fn test_empty_integrations_is_enveloped() {
        let output = execute(
            test_client(),
            json!({"id": "post-1", "integrations": [], "content": "hi"}),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(
            output.payload["error"],
            json!("At least one integration/channel ID is required")
        );
    }

    #[tokio::test]
    async fn test_blank_id_is_enveloped() {
        let output = execute(
            test_client(),
            json!({"id": "  ", "integrations": ["ch1"], "content": "hi"}),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(output.payload["error"], json!("Post ID is required"));
    }

    #[tokio::test]
    async fn test_update_without_mutable_fields_is_enveloped() {
        let output = execute(
            test_client(),
            json!({"id": "post-1", "integrations": ["ch1"]}),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(
            output.payload["error"],
            json!("At least one field must be provided for update")
        );
    }

    #[tokio::test]
    async fn test_scheduled_in_the_past_is_enveloped() {
        let output = execute(
            test_client(),
            json!({
                "id": "post-1",
                "integrations": ["ch1"],
                "status": "scheduled",
                "scheduledDate": "2020-01-01T00:00:00Z",
            }),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(
            output.payload["error"],
            json!("scheduledDate must be in the future")
        );
    }

    #[test]
    fn test_spec_requires_id_and_integrations() {
        assert_eq!(SPEC.input_schema()["required"], json!(["id", "integrations"]));
    }
}

use chrono::Utc;
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, ToolOutput};
use crate::postiz::{group_token, PostizClient};
use postiztools_core::posts::{build_create_request, validate_create_post, CreatePostParams};
use postiztools_core::schema::{CliSpec, ParamKind, ParamSpec, ToolSpec};
use postiztools_core::status::PostStatus;

pub const SPEC: ToolSpec = ToolSpec {
    name: "postiz-create-post",
    description: "Create a new post in Postiz (draft, scheduled, or immediate)",
    params: &[
        ParamSpec {
            name: "content",
            kind: ParamKind::StringArray,
            required: true,
            description: "Array of text content for posts (one item = single post, multiple items = thread/multiple posts). IMPORTANT: If user wants to add comments to posts, each comment is a separate post in this array.",
        },
        ParamSpec {
            name: "integrations",
            kind: ParamKind::StringArray,
            required: true,
            description: "Array of channel/integration IDs to post to",
        },
        ParamSpec {
            name: "status",
            kind: ParamKind::Enum(&["draft", "scheduled", "now"]),
            required: false,
            description: "Post status: draft (save as draft), scheduled (schedule for later), or now (publish immediately)",
        },
        ParamSpec {
            name: "scheduledDate",
            kind: ParamKind::String,
            required: false,
            description: "ISO 8601 date string for when to schedule the post (required if status is \"scheduled\"). IMPORTANT: Use local timezone format like \"2024-01-15T15:00:00\" - the system will handle timezone conversion. Do NOT use UTC format.",
        },
        ParamSpec {
            name: "images",
            kind: ParamKind::StringArray,
            required: false,
            description: "Array of image PUBLIC URLs (not IDs) to include with the first post. IMPORTANT: When uploading images via postiz-upload-file, use the returned public URL, not the file ID.",
        },
    ],
    cli: CliSpec {
        group: Some("posts"),
        command: "create",
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Args {
    content: Vec<String>,
    integrations: Vec<String>,
    status: Option<PostStatus>,
    scheduled_date: Option<String>,
    images: Option<Vec<String>>,
}

pub fn run(client: PostizClient, arguments: Value) -> BoxFuture<'static, ToolOutput> {
    Box::pin(async move { execute(client, arguments).await })
}

fn status_message(status: Option<PostStatus>) -> &'static str {
    match status {
        Some(PostStatus::Now) => "Post published successfully",
        Some(PostStatus::Scheduled) => "Post scheduled successfully",
        Some(PostStatus::Draft) | None => "Post saved as draft successfully",
    }
}

async fn execute(client: PostizClient, arguments: Value) -> ToolOutput {
    let args: Args = match parse_args(arguments) {
        Ok(args) => args,
        Err(output) => return *output,
    };

    let params = CreatePostParams {
        content: args.content,
        integrations: args.integrations,
        status: args.status,
        scheduled_date: args.scheduled_date,
        images: args.images,
    };

    if let Err(error) = validate_create_post(&params, Utc::now()) {
        return ToolOutput::invalid(error);
    }

    let request = build_create_request(&params, &group_token());

    match client.create_post(&request).await {
        Ok(post) => ToolOutput::success(json!({
            "post": post,
            "message": status_message(params.status),
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

    #[test]
    fn test_status_messages() {
        assert_eq!(status_message(None), "Post saved as draft successfully");
        assert_eq!(
            status_message(Some(PostStatus::Scheduled)),
            "Post scheduled successfully"
        );
        assert_eq!(
            status_message(Some(PostStatus::Now)),
            "Post published successfully"
        );
    }

    #[tokio::test]
    async fn test_scheduled_without_date_is_enveloped() {
        let output = execute(
            test_client(),
            json!({
                "content": ["hello"],
                "integrations": ["ch1"],
                "status": "scheduled",
            }),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(
            output.payload["error"],
            json!("scheduledDate is required when status is \"scheduled\"")
        );
    }

    #[tokio::test]
    async fn test_empty_content_is_enveloped() {
        let output = execute(
            test_client(),
            json!({"content": [], "integrations": ["ch1"]}),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(output.payload["error"], json!("Content array cannot be empty"));
    }

    #[tokio::test]
    async fn test_empty_integrations_is_enveloped() {
        let output = execute(
            test_client(),
            json!({"content": ["hello"], "integrations": []}),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(
            output.payload["error"],
            json!("At least one integration/channel ID is required")
        );
    }

    #[tokio::test]
    async fn test_valid_draft_reaches_the_network_layer() {
        // Everything local passes; the unroutable base URL fails the
        // create, which still comes back as an envelope.
        let output = execute(
            test_client(),
            json!({"content": ["hello"], "integrations": ["ch1"]}),
        )
        .await;

        assert!(output.is_error);
        assert!(output.payload["error"]
            .as_str()
            .unwrap()
            .starts_with("Network error:"));
    }

    #[test]
    fn test_spec_requires_content_and_integrations() {
        assert_eq!(
            SPEC.input_schema()["required"],
            json!(["content", "integrations"])
        );
    }
}

use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, ToolOutput};
use crate::postiz::PostizClient;
use postiztools_core::envelope::ValidationError;
use postiztools_core::schema::{CliSpec, ParamKind, ParamSpec, ToolSpec};
use postiztools_core::video::{validate_generate_video, GenerateVideoRequest, Slide};

pub const SPEC: ToolSpec = ToolSpec {
    name: "postiz-generate-video",
    description: "Generate an AI video using Postiz (Beta feature)",
    params: &[
        ParamSpec {
            name: "slides",
            kind: ParamKind::String,
            required: false,
            description: "JSON array of slide objects, each with an \"image\" (URL or file ID) and optional \"text\" overlay, e.g. [{\"image\": \"https://...\", \"text\": \"Intro\"}]",
        },
        ParamSpec {
            name: "prompt",
            kind: ParamKind::String,
            required: false,
            description: "Text prompt for AI video generation",
        },
        ParamSpec {
            name: "voice",
            kind: ParamKind::String,
            required: false,
            description: "Voice setting for the video (if supported)",
        },
        ParamSpec {
            name: "duration",
            kind: ParamKind::Number,
            required: false,
            description: "Duration of the video in seconds",
        },
    ],
    cli: CliSpec {
        group: None,
        command: "generate-video",
    },
};

#[derive(Debug, Deserialize)]
struct Args {
    slides: Option<String>,
    prompt: Option<String>,
    voice: Option<String>,
    duration: Option<u64>,
}

pub fn run(client: PostizClient, arguments: Value) -> BoxFuture<'static, ToolOutput> {
    Box::pin(async move { execute(client, arguments).await })
}

async fn execute(client: PostizClient, arguments: Value) -> ToolOutput {
    let args: Args = match parse_args(arguments) {
        Ok(args) => args,
        Err(output) => return *output,
    };

    let slides: Option<Vec<Slide>> = match args.slides.as_deref() {
        Some(raw) => match serde_json::from_str(raw) {
            Ok(slides) => Some(slides),
            Err(_) => return ToolOutput::invalid(ValidationError::InvalidSlides),
        },
        None => None,
    };

    let request = GenerateVideoRequest {
        slides,
        prompt: args.prompt,
        voice: args.voice,
        duration: args.duration,
    };

    if let Err(error) = validate_generate_video(&request) {
        return ToolOutput::invalid(error);
    }

    match client.generate_video(&request).await {
        Ok(video) => ToolOutput::success(json!({
            "video": video,
            "message": "Video generation request submitted successfully",
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
    async fn test_no_input_mode_is_enveloped() {
        let output = execute(test_client(), json!({})).await;

        assert!(output.is_error);
        assert_eq!(
            output.payload["error"],
            json!("Either slides or prompt must be provided for video generation")
        );
    }

    #[tokio::test]
    async fn test_malformed_slides_json_is_enveloped() {
        let output = execute(test_client(), json!({"slides": "not json"})).await;

        assert!(output.is_error);
        assert_eq!(
            output.payload["error"],
            json!("Invalid slides. Expected a JSON array of {\"image\", \"text\"} objects")
        );
    }

    #[tokio::test]
    async fn test_slide_without_image_is_enveloped() {
        let output = execute(
            test_client(),
            json!({"slides": "[{\"image\": \"\"}]"}),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(output.payload["error"], json!("Slide 1 must have an image"));
    }

    #[tokio::test]
    async fn test_prompt_alone_reaches_the_network_layer() {
        let output = execute(test_client(), json!({"prompt": "a product demo"})).await;

        assert!(output.is_error);
        assert!(output.payload["error"]
            .as_str()
            .unwrap()
            .starts_with("Network error:"));
    }
}

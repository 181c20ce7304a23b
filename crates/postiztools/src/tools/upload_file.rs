use std::path::Path;

use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, ToolOutput};
use crate::postiz::PostizClient;
use postiztools_core::envelope::ValidationError;
use postiztools_core::schema::{CliSpec, ParamKind, ParamSpec, ToolSpec};

pub const SPEC: ToolSpec = ToolSpec {
    name: "postiz-upload-file",
    description: "Upload a file to Postiz for use in posts (images, videos, etc.)",
    params: &[
        ParamSpec {
            name: "filePath",
            kind: ParamKind::String,
            required: true,
            description: "Path to the file to upload",
        },
        ParamSpec {
            name: "filename",
            kind: ParamKind::String,
            required: false,
            description: "Custom filename (optional, will use original filename if not provided). IMPORTANT: The response will include a public URL that should be used in postiz-create-post images parameter, NOT the file ID.",
        },
    ],
    cli: CliSpec {
        group: None,
        command: "upload",
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Args {
    file_path: String,
    filename: Option<String>,
}

pub fn run(client: PostizClient, arguments: Value) -> BoxFuture<'static, ToolOutput> {
    Box::pin(async move { execute(client, arguments).await })
}

/// Filename to send when the caller did not supply one: the last path
/// segment of the source path.
fn default_filename(file_path: &str) -> String {
    Path::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("uploaded-file")
        .to_string()
}

async fn execute(client: PostizClient, arguments: Value) -> ToolOutput {
    let args: Args = match parse_args(arguments) {
        Ok(args) => args,
        Err(output) => return *output,
    };

    if !Path::new(&args.file_path).exists() {
        return ToolOutput::invalid(ValidationError::FileNotFound(args.file_path));
    }

    let bytes = match std::fs::read(&args.file_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return ToolOutput::invalid(ValidationError::FileNotFound(format!(
                "{} ({e})",
                args.file_path
            )))
        }
    };

    let filename = args
        .filename
        .unwrap_or_else(|| default_filename(&args.file_path));

    match client.upload_file(bytes, filename.clone()).await {
        Ok(file) => ToolOutput::success(json!({
            "file": file,
            "message": format!("File \"{filename}\" uploaded successfully"),
        })),
        Err(error) => ToolOutput::remote_failure(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postiz::PostizConfig;
    use std::io::Write;

    fn test_client() -> PostizClient {
        let config = PostizConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        };
        PostizClient::new(&config).unwrap()
    }

    #[test]
    fn test_default_filename_takes_last_segment() {
        assert_eq!(default_filename("/tmp/images/banner.png"), "banner.png");
        assert_eq!(default_filename("banner.png"), "banner.png");
    }

    #[tokio::test]
    async fn test_missing_file_is_reported_in_envelope() {
        let output = execute(
            test_client(),
            json!({"filePath": "/definitely/not/here.png"}),
        )
        .await;

        assert!(output.is_error);
        assert_eq!(
            output.payload["error"],
            json!("File not found: /definitely/not/here.png")
        );
        assert!(output.payload.get("statusCode").is_none());
    }

    #[tokio::test]
    async fn test_missing_file_path_argument_is_enveloped() {
        let output = execute(test_client(), json!({})).await;
        assert!(output.is_error);
        assert!(output.payload["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid arguments:"));
    }

    #[tokio::test]
    async fn test_existing_file_reaches_the_network_layer() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not really a png").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        // The file check passes; the unroutable base URL then fails the
        // upload, which must still come back as an envelope.
        let output = execute(test_client(), json!({"filePath": path})).await;
        assert!(output.is_error);
        assert!(output.payload["error"]
            .as_str()
            .unwrap()
            .starts_with("Network error:"));
    }
}

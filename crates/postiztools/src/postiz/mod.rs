use std::collections::HashMap;

use chrono::Utc;
use serde::Deserialize;

use crate::prelude::*;
use postiztools_core::posts::{
    build_update_request, CreatePostRequest, PostizChannel, PostizPost, UpdatePostParams,
    UploadFileResponse,
};
use postiztools_core::video::GenerateVideoRequest;

/// Postiz configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct PostizConfig {
    pub api_key: String,
    pub base_url: String,
}

impl PostizConfig {
    /// Default public API base URL
    pub const DEFAULT_BASE_URL: &'static str = "https://api.postiz.com/public/v1";

    /// Resolve configuration from explicit overrides with environment
    /// fallbacks. The API key is mandatory; its absence is fatal.
    pub fn resolve(api_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        let api_key = api_key
            .or_else(|| std::env::var("POSTIZ_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                eyre!("POSTIZ_API_KEY is required. Provide it via --api-key or environment variable.")
            })?;

        let base_url = base_url
            .or_else(|| std::env::var("POSTIZ_BASE_URL").ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }
}

/// Grouping token for create/update submissions. The remote only uses it to
/// tie the per-channel entries of one submission together.
pub fn group_token() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Error body shape the Postiz API uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Typed adapter over the Postiz REST API.
///
/// One method per remote capability. Methods shape the request, invoke the
/// service, and decode the response; failures propagate as [`PostizError`]
/// for the tool layer to fold into its result envelope.
#[derive(Debug, Clone)]
pub struct PostizClient {
    http: reqwest::Client,
    base_url: String,
}

impl PostizClient {
    pub fn new(config: &PostizConfig) -> Result<Self> {
        use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

        // The public API wants the raw key in the Authorization header,
        // not a Bearer token.
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&config.api_key)
                .map_err(|e| eyre!("Invalid API key header value: {}", e))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// List the configured channels (`GET /integrations`).
    pub async fn get_channels(&self) -> Result<Vec<PostizChannel>, PostizError> {
        let response = self
            .http
            .get(self.url("/integrations"))
            .send()
            .await
            .map_err(request_error)?;
        decode_json(response).await
    }

    /// Upload a file for use in posts (`POST /upload`, multipart).
    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        filename: String,
    ) -> Result<UploadFileResponse, PostizError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;
        decode_json(response).await
    }

    /// List posts in a date range (`GET /posts`). Dates are already
    /// normalized by the tool layer.
    pub async fn list_posts(
        &self,
        start_date: &str,
        end_date: &str,
        customer: Option<&str>,
    ) -> Result<Vec<PostizPost>, PostizError> {
        let mut query = vec![("startDate", start_date), ("endDate", end_date)];
        if let Some(customer) = customer {
            query.push(("customer", customer));
        }

        let response = self
            .http
            .get(self.url("/posts"))
            .query(&query)
            .send()
            .await
            .map_err(request_error)?;
        decode_json(response).await
    }

    /// Create a post (`POST /posts`). The request is already in the remote
    /// envelope shape.
    pub async fn create_post(
        &self,
        request: &CreatePostRequest,
    ) -> Result<PostizPost, PostizError> {
        let response = self
            .http
            .post(self.url("/posts"))
            .json(request)
            .send()
            .await
            .map_err(request_error)?;
        decode_json(response).await
    }

    /// Update a post by re-submitting a create-shaped request.
    ///
    /// The remote service has no in-place update endpoint: a create
    /// submission whose value blocks carry an existing post id replaces
    /// that post. Channel providers are resolved first so video channels
    /// get the settings the remote requires on every submission.
    pub async fn update_post(
        &self,
        id: &str,
        params: &UpdatePostParams,
    ) -> Result<PostizPost, PostizError> {
        let channels = self.get_channels().await?;
        let providers: HashMap<String, String> = channels
            .into_iter()
            .map(|channel| (channel.id, channel.provider))
            .collect();

        let request = build_update_request(id, params, &providers, &group_token());
        self.create_post(&request).await
    }

    /// Delete a post (`DELETE /posts/{id}`).
    pub async fn delete_post(&self, id: &str) -> Result<(), PostizError> {
        let response = self
            .http
            .delete(self.url(&format!("/posts/{id}")))
            .send()
            .await
            .map_err(request_error)?;
        expect_success(response).await
    }

    /// Submit a video generation request (`POST /generate-video`, beta).
    pub async fn generate_video(
        &self,
        request: &GenerateVideoRequest,
    ) -> Result<serde_json::Value, PostizError> {
        let response = self
            .http
            .post(self.url("/generate-video"))
            .json(request)
            .send()
            .await
            .map_err(request_error)?;
        decode_json(response).await
    }
}

fn request_error(err: reqwest::Error) -> PostizError {
    PostizError::Network(err.to_string())
}

fn content_type_of(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Fold a response into either the remote error (non-2xx), a distinct
/// unexpected-shape error (2xx but not JSON), or the decoded body.
async fn decode_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, PostizError> {
    let status = response.status();
    let content_type = content_type_of(&response);
    let body = response.text().await.map_err(request_error)?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body));
    }

    if !content_type.starts_with("application/json") {
        return Err(PostizError::UnexpectedResponseShape {
            status: status.as_u16(),
            content_type,
        });
    }

    serde_json::from_str(&body).map_err(|e| PostizError::Decode(e.to_string()))
}

/// Like [`decode_json`] but for endpoints whose success response carries no
/// body worth decoding.
async fn expect_success(response: reqwest::Response) -> Result<(), PostizError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.map_err(request_error)?;
        return Err(api_error(status.as_u16(), &body));
    }
    Ok(())
}

fn api_error(status: u16, body: &str) -> PostizError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| format!("HTTP {status}"));
    PostizError::Api { status, message }
}

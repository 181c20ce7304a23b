use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::dates::parse_datetime;
use crate::envelope::ValidationError;
use crate::markup::format_content;
use crate::status::{map_status_to_api_type, resolve_post_date, ApiPostType, PostStatus};

/// Provider identifier whose channels need title/visibility settings on
/// every submission.
pub const VIDEO_PROVIDER: &str = "youtube";

const MAX_VIDEO_TITLE_LEN: usize = 100;
const DEFAULT_VIDEO_TITLE: &str = "Video";

/// A configured social media channel (Postiz calls these integrations).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostizChannel {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ChannelProfile>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChannelProfile {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Post lifecycle state as reported by the remote service.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostState {
    Draft,
    Scheduled,
    Published,
    Failed,
}

/// A post as returned by the Postiz API.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostizPost {
    pub id: String,
    pub content: String,
    pub status: PostState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default)]
    pub integrations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Create/update submission in the shape the `/posts` endpoint expects.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(rename = "type")]
    pub post_type: ApiPostType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub short_link: bool,
    pub tags: Vec<String>,
    pub posts: Vec<PostEntry>,
}

/// One per-channel entry of a submission.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostEntry {
    pub integration: IntegrationRef,
    pub value: Vec<PostValue>,
    pub group: String,
    pub settings: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IntegrationRef {
    pub id: String,
}

/// One content block of a per-channel entry. Updates carry the id of the
/// post being replaced; creates leave it absent.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    pub image: Vec<ImageRef>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageRef {
    pub id: String,
    pub path: String,
}

/// Response of the multipart `/upload` endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadFileResponse {
    pub id: String,
    pub path: String,
    pub url: String,
    pub filename: String,
    pub size: u64,
}

/// Validated input of the create-post tool.
#[derive(Debug, Clone, Default)]
pub struct CreatePostParams {
    pub content: Vec<String>,
    pub integrations: Vec<String>,
    pub status: Option<PostStatus>,
    pub scheduled_date: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Validated input of the update-post tool. Integrations are required even
/// though this is conceptually a partial update: the synthesized replace
/// request needs the full target list.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostParams {
    pub content: Option<String>,
    pub integrations: Vec<String>,
    pub status: Option<PostStatus>,
    pub scheduled_date: Option<String>,
    pub images: Option<Vec<String>>,
}

fn validate_scheduled_date(
    scheduled_date: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    let raw = scheduled_date.ok_or(ValidationError::MissingScheduledDate)?;
    let parsed = parse_datetime(raw).ok_or(ValidationError::InvalidScheduledDate)?;
    if parsed <= now {
        return Err(ValidationError::ScheduledDateNotFuture);
    }
    Ok(())
}

/// Semantic validation for create-post. `now` is the reference instant for
/// the strictly-in-the-future check.
pub fn validate_create_post(
    params: &CreatePostParams,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if params.content.is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    if params.content.iter().any(|item| item.trim().is_empty()) {
        return Err(ValidationError::BlankContentItem);
    }
    if params.integrations.is_empty() {
        return Err(ValidationError::NoIntegrations);
    }
    if params.status == Some(PostStatus::Scheduled) {
        validate_scheduled_date(params.scheduled_date.as_deref(), now)?;
    }
    Ok(())
}

/// Semantic validation for update-post.
pub fn validate_update_post(
    id: &str,
    params: &UpdatePostParams,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::MissingPostId);
    }
    if params.integrations.is_empty() {
        return Err(ValidationError::NoIntegrations);
    }
    if let Some(content) = &params.content {
        if content.trim().is_empty() {
            return Err(ValidationError::BlankContent);
        }
    }
    if params.status == Some(PostStatus::Scheduled) {
        validate_scheduled_date(params.scheduled_date.as_deref(), now)?;
    }
    if params.content.is_none()
        && params.status.is_none()
        && params.scheduled_date.is_none()
        && params.images.is_none()
    {
        return Err(ValidationError::NoUpdateFields);
    }
    Ok(())
}

pub fn validate_delete_post(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::MissingPostId);
    }
    Ok(())
}

/// Build the value blocks of one per-channel entry: one block per content
/// item, images on the first block only, the replaced post's id on every
/// block when updating.
fn build_post_values(
    content: &[String],
    images: Option<&[String]>,
    inject_id: Option<&str>,
) -> Vec<PostValue> {
    content
        .iter()
        .enumerate()
        .map(|(index, item)| PostValue {
            id: inject_id.map(|id| id.to_string()),
            content: format_content(item),
            image: match images {
                Some(urls) if index == 0 => urls
                    .iter()
                    .map(|url| ImageRef {
                        id: url.clone(),
                        path: url.clone(),
                    })
                    .collect(),
                _ => Vec::new(),
            },
        })
        .collect()
}

/// Translate validated create-post input into the remote request shape.
///
/// One entry per target channel, each carrying the same value blocks and
/// the caller-supplied grouping token.
pub fn build_create_request(params: &CreatePostParams, group: &str) -> CreatePostRequest {
    let api_type = map_status_to_api_type(params.status);
    let date = resolve_post_date(api_type, params.scheduled_date.as_deref());

    CreatePostRequest {
        post_type: api_type,
        date,
        short_link: false,
        tags: Vec::new(),
        posts: params
            .integrations
            .iter()
            .map(|channel_id| PostEntry {
                integration: IntegrationRef {
                    id: channel_id.clone(),
                },
                value: build_post_values(&params.content, params.images.as_deref(), None),
                group: group.to_string(),
                settings: Map::new(),
            })
            .collect(),
    }
}

/// Translate validated update-post input into a create-shaped replace.
///
/// The remote service has no in-place update: re-submitting a create
/// request whose value blocks carry the existing post id makes it replace
/// the post instead of creating a new one. `providers` maps channel ids to
/// their platform so video channels get the settings the remote requires
/// on every submission.
pub fn build_update_request(
    post_id: &str,
    params: &UpdatePostParams,
    providers: &HashMap<String, String>,
    group: &str,
) -> CreatePostRequest {
    let api_type = map_status_to_api_type(params.status);
    let date = resolve_post_date(api_type, params.scheduled_date.as_deref());

    // A replace always needs a value block, even when only schedule,
    // status, or images changed; the injected id keys the merge remotely.
    let content_items = match &params.content {
        Some(content) => vec![content.clone()],
        None => vec![String::new()],
    };

    CreatePostRequest {
        post_type: api_type,
        date,
        short_link: false,
        tags: Vec::new(),
        posts: params
            .integrations
            .iter()
            .map(|channel_id| {
                let mut settings = Map::new();
                if providers.get(channel_id).map(String::as_str) == Some(VIDEO_PROVIDER) {
                    let title = derive_video_title(params.content.as_deref().unwrap_or(""));
                    settings.insert("title".to_string(), json!(title));
                    settings.insert("visibility".to_string(), json!("public"));
                }
                PostEntry {
                    integration: IntegrationRef {
                        id: channel_id.clone(),
                    },
                    value: build_post_values(&content_items, params.images.as_deref(), Some(post_id)),
                    group: group.to_string(),
                    settings,
                }
            })
            .collect(),
    }
}

/// Derive a video title from post content: the first sentence, capped at
/// 100 characters, `"Video"` when there is nothing to derive from.
pub fn derive_video_title(content: &str) -> String {
    let text = content.trim();
    let end = text
        .find(&['.', '!', '?', '\n'][..])
        .unwrap_or(text.len());
    let sentence = text[..end].trim();
    if sentence.is_empty() {
        return DEFAULT_VIDEO_TITLE.to_string();
    }
    sentence.chars().take(MAX_VIDEO_TITLE_LEN).collect()
}

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// User-facing publication status accepted by the post tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Now,
}

/// Post type vocabulary of the Postiz API (`type` tag on the create request).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiPostType {
    Draft,
    Schedule,
    Now,
}

/// Map a publication status onto the API's post type vocabulary.
///
/// An absent status means draft. Total function, no failure case.
pub fn map_status_to_api_type(status: Option<PostStatus>) -> ApiPostType {
    match status {
        Some(PostStatus::Scheduled) => ApiPostType::Schedule,
        Some(PostStatus::Now) => ApiPostType::Now,
        Some(PostStatus::Draft) | None => ApiPostType::Draft,
    }
}

/// Resolve the date that accompanies a post type.
///
/// Scheduled posts carry the caller-validated date unchanged, immediate
/// posts carry the current instant, drafts carry no date at all.
pub fn resolve_post_date(api_type: ApiPostType, scheduled_date: Option<&str>) -> Option<String> {
    match api_type {
        ApiPostType::Schedule => scheduled_date.map(|d| d.to_string()),
        ApiPostType::Now => Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        ApiPostType::Draft => None,
    }
}

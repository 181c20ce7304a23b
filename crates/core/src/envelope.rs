use serde_json::{json, Map, Value};

/// Input validation failure, caught at the tool boundary and reported
/// in-envelope. The display strings are part of the tool contract — both
/// front-ends surface them verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Content array cannot be empty")]
    EmptyContent,

    #[error("Post content items cannot be empty")]
    BlankContentItem,

    #[error("Post content cannot be empty")]
    BlankContent,

    #[error("At least one integration/channel ID is required")]
    NoIntegrations,

    #[error("Post ID is required")]
    MissingPostId,

    #[error("scheduledDate is required when status is \"scheduled\"")]
    MissingScheduledDate,

    #[error("Invalid scheduledDate format. Use ISO 8601 format (e.g., \"2024-01-15T10:00:00Z\")")]
    InvalidScheduledDate,

    #[error("scheduledDate must be in the future")]
    ScheduledDateNotFuture,

    #[error("At least one field must be provided for update")]
    NoUpdateFields,

    #[error("Invalid startDate. Use YYYY-MM-DD or ISO 8601 datetime")]
    InvalidStartDate,

    #[error("Invalid endDate. Use YYYY-MM-DD or ISO 8601 datetime")]
    InvalidEndDate,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Either slides or prompt must be provided for video generation")]
    MissingVideoInput,

    #[error("If providing slides, at least one slide is required")]
    EmptySlides,

    #[error("Invalid slides. Expected a JSON array of {{\"image\", \"text\"}} objects")]
    InvalidSlides,

    #[error("Slide {0} must have an image")]
    SlideMissingImage(usize),

    #[error("Duration must be greater than 0")]
    NonPositiveDuration,
}

/// Build a success envelope by merging `"success": true` into the payload.
///
/// Non-object payloads are tucked under a `data` key so the envelope shape
/// stays uniform.
pub fn success(payload: Value) -> Value {
    let mut map = match payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    map.insert("success".to_string(), Value::Bool(true));
    Value::Object(map)
}

/// Build a failure envelope. The status code is included only when the
/// failure came back from the remote service with one.
pub fn failure(message: impl Into<String>, status_code: Option<u16>) -> Value {
    let mut envelope = json!({
        "success": false,
        "error": message.into(),
    });
    if let Some(code) = status_code {
        envelope["statusCode"] = json!(code);
    }
    envelope
}

/// Failure taxonomy of the remote API adapter.
///
/// Every variant carries what the tool layer needs to build a failure
/// envelope; the HTTP status is preserved whenever the remote produced one.
#[derive(thiserror::Error, Debug)]
pub enum PostizError {
    /// Non-2xx response; the message is the remote's own when the body
    /// carried one.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 2xx response whose body is not JSON. The Postiz frontend answers
    /// unauthenticated API calls with its login page, so this usually
    /// means the API key was not accepted.
    #[error("Unexpected {content_type} response (HTTP {status}) - expected JSON; authentication likely failed")]
    UnexpectedResponseShape { status: u16, content_type: String },

    /// JSON body that does not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Transport-level failure before any response arrived.
    #[error("Network error: {0}")]
    Network(String),
}

impl PostizError {
    /// HTTP status associated with the failure, when one exists.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PostizError::Api { status, .. } => Some(*status),
            PostizError::UnexpectedResponseShape { status, .. } => Some(*status),
            PostizError::Decode(_) | PostizError::Network(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_remote_message() {
        let err = PostizError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "Unauthorized");
        assert_eq!(err.status_code(), Some(401));
    }

    #[test]
    fn test_unexpected_shape_mentions_authentication() {
        let err = PostizError::UnexpectedResponseShape {
            status: 200,
            content_type: "text/html".to_string(),
        };
        assert!(err.to_string().contains("authentication likely failed"));
        assert_eq!(err.status_code(), Some(200));
    }

    #[test]
    fn test_network_error_has_no_status() {
        assert_eq!(
            PostizError::Network("connection refused".to_string()).status_code(),
            None
        );
    }
}

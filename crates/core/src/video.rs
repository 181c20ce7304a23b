use serde::{Deserialize, Serialize};

use crate::envelope::ValidationError;

/// Request body of the experimental `/generate-video` endpoint. Passed
/// through as-is; the remote owns the actual generation semantics.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GenerateVideoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slides: Option<Vec<Slide>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Slide {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Validate a generation request: one of the two input modes must be
/// present, slides must be usable, duration positive.
pub fn validate_generate_video(request: &GenerateVideoRequest) -> Result<(), ValidationError> {
    if request.slides.is_none() && request.prompt.is_none() {
        return Err(ValidationError::MissingVideoInput);
    }

    if let Some(slides) = &request.slides {
        if slides.is_empty() {
            return Err(ValidationError::EmptySlides);
        }
        for (index, slide) in slides.iter().enumerate() {
            if slide.image.trim().is_empty() {
                return Err(ValidationError::SlideMissingImage(index + 1));
            }
        }
    }

    if request.duration == Some(0) {
        return Err(ValidationError::NonPositiveDuration);
    }

    Ok(())
}

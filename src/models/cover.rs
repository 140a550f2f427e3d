use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Host marker every accepted article link must contain.
pub const ARTICLE_HOST: &str = "mp.weixin.qq.com";

// ============================================================================
// Request
// ============================================================================

/// Body of `POST /api/parse`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ParseRequest {
    #[serde(default)]
    #[validate(required, custom(function = "validate_article_url"))]
    pub url: Option<String>,
}

impl ParseRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

fn validate_article_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::new("missing_url"));
    }
    if !url.contains(ARTICLE_HOST) {
        return Err(ValidationError::new("invalid_domain"));
    }
    Ok(())
}

// ============================================================================
// Response
// ============================================================================

/// Successful parse. `cover_url` is either a `data:` URI or, when the image
/// could not be downloaded, the bare remote URL with `warning` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub success: bool,
    pub cover_url: String,
    pub original_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

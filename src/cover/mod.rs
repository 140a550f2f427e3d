pub mod extract;
pub mod normalize;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};
use crate::fetch::{CoverFetcher, FetchedImage};
use crate::models::{ParseRequest, ParseResult};

pub use extract::extract_cover_url;
pub use normalize::normalize_cover_url;

pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
pub const DEGRADED_WARNING: &str = "Image loading may be restricted, try downloading it directly";

/// Outcome of the best-effort image download.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverImage {
    /// Bytes were fetched and embedded.
    Inline { data_uri: String, image_url: String },
    /// Download failed; the caller gets the remote URL instead.
    Remote { image_url: String, warning: String },
}

impl ParseResult {
    pub fn from_cover(original_url: &str, image: CoverImage) -> Self {
        match image {
            CoverImage::Inline {
                data_uri,
                image_url,
            } => ParseResult {
                success: true,
                cover_url: data_uri,
                original_url: original_url.to_string(),
                image_url: Some(image_url),
                warning: None,
            },
            CoverImage::Remote { image_url, warning } => ParseResult {
                success: true,
                cover_url: image_url,
                original_url: original_url.to_string(),
                image_url: None,
                warning: Some(warning),
            },
        }
    }
}

/// Validate, fetch, extract, normalize, then try to inline the cover.
///
/// Everything up to normalization is terminal on failure. The image download
/// never fails the request: see [`download_cover`].
pub async fn parse_cover(
    fetcher: &dyn CoverFetcher,
    request: &ParseRequest,
) -> AppResult<ParseResult> {
    let url = validate_request(request)?;

    info!(url, "Fetching article");
    let html = fetcher.fetch_article(url).await.map_err(|e| {
        warn!(error = %e, url, "Article fetch failed");
        AppError::from(e)
    })?;

    let candidate = extract_cover_url(&html).ok_or_else(|| {
        warn!(url, "No cover URL found in article");
        AppError::CoverNotFound
    })?;

    let image_url = normalize_cover_url(&candidate);
    info!(cover_url = %image_url, "Cover URL resolved");

    let image = download_cover(fetcher, image_url).await;
    Ok(ParseResult::from_cover(url, image))
}

fn validate_request(request: &ParseRequest) -> AppResult<&str> {
    request.validate().map_err(|e| classify_validation(&e))?;
    request.url.as_deref().ok_or(AppError::MissingUrl)
}

fn classify_validation(errors: &ValidationErrors) -> AppError {
    let missing = errors
        .field_errors()
        .values()
        .flat_map(|v| v.iter())
        .any(|e| e.code == "required" || e.code == "missing_url");

    if missing {
        AppError::MissingUrl
    } else {
        AppError::InvalidDomain
    }
}

/// Fetch the cover bytes and embed them, degrading to the bare URL on any
/// failure.
pub async fn download_cover(fetcher: &dyn CoverFetcher, image_url: String) -> CoverImage {
    match fetcher.fetch_image(&image_url).await {
        Ok(image) => {
            info!(bytes = image.bytes.len(), "Cover image downloaded");
            CoverImage::Inline {
                data_uri: to_data_uri(&image),
                image_url,
            }
        }
        Err(e) => {
            warn!(error = %e, url = %image_url, "Cover image download failed");
            CoverImage::Remote {
                image_url,
                warning: DEGRADED_WARNING.to_string(),
            }
        }
    }
}

pub fn to_data_uri(image: &FetchedImage) -> String {
    let mime = image.content_type.as_deref().unwrap_or(DEFAULT_IMAGE_MIME);
    format!("data:{};base64,{}", mime, BASE64.encode(&image.bytes))
}

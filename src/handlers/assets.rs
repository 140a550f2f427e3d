use std::path::Path;

use axum::{
    http::{header, HeaderValue},
    response::Response,
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};

const LONG_LIVED: &str = "public, max-age=31536000, immutable";
const SHORT_LIVED: &str = "public, max-age=3600";

/// Static pages plus the file-system fallback, with cache headers applied.
///
/// Meant to be merged into the API router; it owns the fallback.
pub fn router<S>(dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route_service("/api/docs", static_page(dir, "api-docs.html"))
        .route_service("/tutorial", static_page(dir, "tutorial.html"))
        .fallback_service(static_files(dir))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            cache_control_for,
        ))
}

/// Static site files, with `index.html` served for `/`.
pub fn static_files(dir: &Path) -> ServeDir {
    ServeDir::new(dir)
}

/// A single page from the static directory, e.g. `/tutorial`.
pub fn static_page(dir: &Path, file: &str) -> ServeFile {
    ServeFile::new(dir.join(file))
}

/// Cache policy keyed on the response content type. Responses of any other
/// type, including API JSON, get no `Cache-Control` header.
pub fn cache_control_for(response: &Response) -> Option<HeaderValue> {
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)?
        .to_str()
        .ok()?
        .split(';')
        .next()?
        .trim()
        .to_ascii_lowercase();

    if content_type.starts_with("image/")
        || content_type == "text/css"
        || content_type == "text/javascript"
        || content_type == "application/javascript"
    {
        Some(HeaderValue::from_static(LONG_LIVED))
    } else if content_type == "text/html" {
        Some(HeaderValue::from_static(SHORT_LIVED))
    } else {
        None
    }
}

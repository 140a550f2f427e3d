use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    cover,
    error::{AppError, AppResult},
    models::{ParseRequest, ParseResult},
    state::AppState,
};

/// POST /api/parse
///
/// Resolves the cover image of a WeChat article. A missing or malformed JSON
/// body is reported the same way as a missing `url` field.
pub async fn parse_article_cover(
    State(state): State<AppState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> AppResult<Json<ParseResult>> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected parse request body");
        AppError::MissingUrl
    })?;

    let result = cover::parse_cover(state.fetcher.as_ref(), &request).await?;
    Ok(Json(result))
}

use crate::article::ContentExtractor;

use super::models::{ArticleQuery, ArticleResponse};
use super::state::ServerState;
use super::translate::ServerError;

/// Fetches the page and runs it through the content extractor. Unlike the
/// translate endpoint, collaborator failures here surface as 500s.
pub(crate) async fn article_request(
    state: &ServerState,
    query: ArticleQuery,
) -> Result<ArticleResponse, ServerError> {
    let url = query
        .url
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ServerError::bad_request("url is required"))?;

    let response = state
        .http
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|err| ServerError::internal(format!("failed to fetch page: {}", err)))?;
    let html = response
        .text()
        .await
        .map_err(|err| ServerError::internal(format!("failed to read page body: {}", err)))?;

    let article = state
        .extractor
        .extract(&html, url)
        .map_err(|err| ServerError::internal(format!("failed to extract article: {}", err)))?;

    Ok(ArticleResponse {
        title: article.title,
        content: article.content,
    })
}

//! Encyclopedia page summaries used to enrich landmarks.

use serde::Serialize;

use super::{endpoint, Gateway};
use crate::errors::AppError;
use crate::models::PageSummaryResponse;

/// Longest extract shown before it is cut with an ellipsis.
pub const SUMMARY_MAX_CHARS: usize = 150;

/// What a page summary contributes to a landmark.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Cut an extract to [`SUMMARY_MAX_CHARS`] characters plus `...`.
pub fn truncate_extract(extract: &str) -> String {
    if extract.chars().count() > SUMMARY_MAX_CHARS {
        let head: String = extract.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        extract.to_string()
    }
}

impl Gateway {
    /// Summary for a page title; any failure means "no enrichment".
    pub async fn fetch_summary(&self, title: &str) -> Option<Summary> {
        match self.try_fetch_summary(title).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(
                    "{}",
                    AppError::Enrichment(format!("summary for {:?}: {}", title, e))
                );
                None
            }
        }
    }

    async fn try_fetch_summary(&self, title: &str) -> Result<Summary, reqwest::Error> {
        let path = format!("api/rest_v1/page/summary/{}", urlencoding::encode(title));
        let url = endpoint(&self.config.wikipedia_url, &path);
        let page: PageSummaryResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Summary {
            description: page
                .extract
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(truncate_extract),
            thumbnail_url: page.thumbnail.map(|t| t.source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_extract_is_untouched() {
        assert_eq!(truncate_extract("A museum."), "A museum.");
        let exact = "x".repeat(SUMMARY_MAX_CHARS);
        assert_eq!(truncate_extract(&exact), exact);
    }

    #[test]
    fn test_long_extract_is_cut_on_characters() {
        let long = "é".repeat(200);
        let cut = truncate_extract(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), SUMMARY_MAX_CHARS + 3);
    }
}

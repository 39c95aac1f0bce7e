//! Body rendering per configured content source mode

use super::{normalize_whitespace, ContentFetcher, ContentSourceError, Reachability};
use crate::config::ContentSourceMode;
use metrics::counter;
use std::sync::Arc;

/// Produces the email body for one delivery
pub struct ContentSource {
    mode: ContentSourceMode,
    value: String,
    fetcher: Arc<dyn ContentFetcher>,
}

impl ContentSource {
    pub fn new(
        mode: ContentSourceMode,
        value: impl Into<String>,
        fetcher: Arc<dyn ContentFetcher>,
    ) -> Self {
        Self {
            mode,
            value: value.into(),
            fetcher,
        }
    }

    /// Render the body text.
    ///
    /// `INLINE` returns the literal unchanged and performs no I/O. `FILE_BASED`
    /// probes the URL first: an unreachable document renders as an empty body
    /// and is not fetched. Only a failing fetch is an error.
    pub async fn render(&self) -> Result<String, ContentSourceError> {
        match self.mode {
            ContentSourceMode::Inline => Ok(self.value.clone()),
            ContentSourceMode::FileBased => {
                let reachability = self.fetcher.probe(&self.value).await;
                tracing::debug!(url = %self.value, result = %reachability, "Content probe");

                match reachability {
                    Reachability::Reachable => {
                        counter!("otp_mail_content_probe_total", "result" => "reachable")
                            .increment(1);
                        let body = self.fetcher.fetch(&self.value).await.map_err(|e| {
                            tracing::warn!(url = %self.value, error = %e, "Content fetch failure");
                            e
                        })?;
                        Ok(normalize_whitespace(&body))
                    }
                    // TODO: decide with product whether an unreachable template should fail the send
                    Reachability::Unreachable { .. } => {
                        counter!("otp_mail_content_probe_total", "result" => "unreachable")
                            .increment(1);
                        Ok(String::new())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MockContentFetcher;
    use mockall::predicate::*;
    use pretty_assertions::assert_eq;

    const URL: &str = "https://cdn.example.com/otp.html";

    #[tokio::test]
    async fn test_inline_returns_literal_without_io() {
        let mut fetcher = MockContentFetcher::new();
        fetcher.expect_probe().never();
        fetcher.expect_fetch().never();

        let source = ContentSource::new(
            ContentSourceMode::Inline,
            "  Your code:\n",
            Arc::new(fetcher),
        );
        assert_eq!(source.render().await.unwrap(), "  Your code:\n");
    }

    #[tokio::test]
    async fn test_file_based_reachable_fetches_and_normalizes() {
        let mut fetcher = MockContentFetcher::new();
        fetcher
            .expect_probe()
            .with(eq(URL))
            .times(1)
            .returning(|_| Reachability::Reachable);
        fetcher
            .expect_fetch()
            .with(eq(URL))
            .times(1)
            .returning(|_| Ok("<html>\n  <body>Hello\tthere</body>\n</html>\n".to_string()));

        let source = ContentSource::new(ContentSourceMode::FileBased, URL, Arc::new(fetcher));
        assert_eq!(
            source.render().await.unwrap(),
            "<html> <body>Hello there</body> </html> "
        );
    }

    #[tokio::test]
    async fn test_file_based_unreachable_renders_empty_without_fetch() {
        let mut fetcher = MockContentFetcher::new();
        fetcher
            .expect_probe()
            .times(1)
            .returning(|_| Reachability::unreachable("operation timed out"));
        fetcher.expect_fetch().never();

        let source = ContentSource::new(ContentSourceMode::FileBased, URL, Arc::new(fetcher));
        assert_eq!(source.render().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_file_based_fetch_failure_propagates() {
        let mut fetcher = MockContentFetcher::new();
        fetcher.expect_probe().returning(|_| Reachability::Reachable);
        fetcher
            .expect_fetch()
            .returning(|_| Err(ContentSourceError::Transport("connection reset".to_string())));

        let source = ContentSource::new(ContentSourceMode::FileBased, URL, Arc::new(fetcher));
        let err = source.render().await.unwrap_err();
        assert!(matches!(err, ContentSourceError::Transport(_)));
    }
}

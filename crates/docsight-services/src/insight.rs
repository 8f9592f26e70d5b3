//! Insight derivation: one summary attempt, keyword analysis otherwise.

use crate::summarizer::{Summarizer, SummaryOutcome};
use docsight_core::Insight;
use docsight_processing::KeywordAnalyzer;
use std::sync::Arc;

#[derive(Clone)]
pub struct InsightResolver {
    summarizer: Arc<dyn Summarizer>,
    analyzer: KeywordAnalyzer,
}

impl InsightResolver {
    pub fn new(summarizer: Arc<dyn Summarizer>, analyzer: KeywordAnalyzer) -> Self {
        Self {
            summarizer,
            analyzer,
        }
    }

    pub fn summarizer(&self) -> &Arc<dyn Summarizer> {
        &self.summarizer
    }

    /// Always produces an insight for extracted text.
    pub async fn resolve(&self, text: &str) -> Insight {
        match self.summarizer.summarize(text).await {
            SummaryOutcome::Summary(summary) if !summary.trim().is_empty() => {
                Insight::Summary(summary.trim().to_string())
            }
            SummaryOutcome::Summary(_) => {
                tracing::warn!("Summary was blank, falling back to keyword analysis");
                self.keywords(text)
            }
            SummaryOutcome::Unavailable(reason) => {
                tracing::warn!(reason = %reason, "AI summary unavailable, falling back to keyword analysis");
                self.keywords(text)
            }
        }
    }

    fn keywords(&self, text: &str) -> Insight {
        let keywords = self.analyzer.analyze(text);
        tracing::info!(keyword_count = keywords.len(), "Keyword analysis complete");
        Insight::Keywords(keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::SummaryFailure;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSummarizer {
        outcome: SummaryOutcome,
        calls: AtomicUsize,
    }

    impl FixedSummarizer {
        fn new(outcome: SummaryOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _text: &str) -> SummaryOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    const TEXT: &str = "cat cat dog dog dog bird";

    #[tokio::test]
    async fn test_summary_wins() {
        let summarizer = FixedSummarizer::new(SummaryOutcome::Summary("Summary X".into()));
        let resolver = InsightResolver::new(summarizer.clone(), KeywordAnalyzer::default());

        let insight = resolver.resolve(TEXT).await;
        assert_eq!(insight, Insight::Summary("Summary X".into()));
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_every_failure_falls_back_once() {
        let failures = [
            SummaryFailure::NotConfigured,
            SummaryFailure::Timeout,
            SummaryFailure::Network("connection refused".into()),
            SummaryFailure::Status {
                status: 500,
                body: "boom".into(),
            },
            SummaryFailure::Misconfigured("invalid auth header name".into()),
            SummaryFailure::Malformed("missing field `choices`".into()),
            SummaryFailure::Empty,
        ];

        for failure in failures {
            let summarizer = FixedSummarizer::new(SummaryOutcome::Unavailable(failure));
            let resolver = InsightResolver::new(summarizer.clone(), KeywordAnalyzer::default());

            let insight = resolver.resolve(TEXT).await;
            assert_eq!(
                insight,
                Insight::Keywords(vec!["dog".into(), "cat".into(), "bird".into()])
            );
            // No retry
            assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_blank_summary_falls_back() {
        let summarizer = FixedSummarizer::new(SummaryOutcome::Summary(" \n\t".into()));
        let resolver = InsightResolver::new(summarizer, KeywordAnalyzer::default());

        let insight = resolver.resolve(TEXT).await;
        assert_eq!(insight.provenance(), docsight_core::Provenance::Keyword);
    }

    #[tokio::test]
    async fn test_fallback_uses_configured_count() {
        let summarizer = FixedSummarizer::new(SummaryOutcome::Unavailable(SummaryFailure::Timeout));
        let resolver = InsightResolver::new(summarizer, KeywordAnalyzer::new(1));

        let insight = resolver.resolve(TEXT).await;
        assert_eq!(insight, Insight::Keywords(vec!["dog".into()]));
    }
}

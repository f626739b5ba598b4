//! Prompt risk classification.

use std::sync::Arc;

use aletheia_core::{Classification, PromptRequest};
use aletheia_patterns::{PatternCatalog, PatternCategory, PatternRule};

/// Maps free text to a [`Classification`].
///
/// Pure: no I/O, no hidden state. High-risk markers take precedence over
/// low-risk ones so ambiguous prompts get more scrutiny, not less.
#[derive(Debug, Clone)]
pub struct Classifier {
    catalog: Arc<PatternCatalog>,
}

impl Classifier {
    /// Create a classifier over a shared catalog.
    #[must_use]
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }

    /// The catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &Arc<PatternCatalog> {
        &self.catalog
    }

    /// Classify a prompt.
    #[must_use]
    pub fn classify(&self, prompt: &PromptRequest) -> Classification {
        self.explain(prompt).0
    }

    /// Classify a prompt and report which topic rule decided the tier.
    ///
    /// The rule is `None` when the prompt fell through to the medium default.
    #[must_use]
    pub fn explain(&self, prompt: &PromptRequest) -> (Classification, Option<&PatternRule>) {
        let text = prompt.text.to_lowercase();

        if let Some(rule) = self
            .catalog
            .first_match(&text, PatternCategory::HighRiskTopic)
        {
            return (Classification::high(), Some(rule));
        }
        if let Some(rule) = self.catalog.first_match(&text, PatternCategory::LowRiskTopic) {
            return (Classification::low(), Some(rule));
        }
        (Classification::medium(), None)
    }
}

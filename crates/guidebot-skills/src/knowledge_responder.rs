//! Knowledge responder: answers session turns with the domain classifier.

use crate::doc_search::DocSearch;
use async_trait::async_trait;
use guidebot_core::{
    CoreConfig, Domain, KnowledgeStore, QueryClassifier, Responder, SubmissionError,
};
use std::sync::Arc;
use std::time::Duration;

/// Classifier for `domain` with the documentation search attached per `config`.
pub fn build_classifier(
    domain: Domain,
    knowledge: Arc<KnowledgeStore>,
    config: &CoreConfig,
) -> QueryClassifier {
    let search = DocSearch::new(domain).with_timeout(config.remote_timeout());
    QueryClassifier::new(domain, knowledge).with_remote(Arc::new(search))
}

/// Session collaborator that turns one user message into one reply.
#[derive(Clone)]
pub struct KnowledgeResponder {
    classifier: QueryClassifier,
    allow_remote: bool,
    deadline: Option<Duration>,
}

impl KnowledgeResponder {
    pub fn new(classifier: QueryClassifier, allow_remote: bool) -> Self {
        Self {
            classifier,
            allow_remote,
            deadline: None,
        }
    }

    /// Responder for `domain` wired from config (remote lookup, timeouts, deadline).
    pub fn from_config(domain: Domain, knowledge: Arc<KnowledgeStore>, config: &CoreConfig) -> Self {
        Self::new(build_classifier(domain, knowledge, config), config.remote_lookup)
            .with_deadline(config.response_deadline())
    }

    /// When set, a reply not produced in time becomes the domain's unavailable text.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn domain(&self) -> Domain {
        self.classifier.domain()
    }
}

#[async_trait]
impl Responder for KnowledgeResponder {
    async fn send_message(&self, text: &str) -> Result<String, SubmissionError> {
        let answer = self.classifier.classify(text, self.allow_remote);
        let Some(deadline) = self.deadline else {
            return Ok(answer.await);
        };
        match tokio::time::timeout(deadline, answer).await {
            Ok(reply) => Ok(reply),
            Err(_) => {
                tracing::warn!(
                    target: "guidebot::session",
                    domain = %self.domain(),
                    deadline_ms = deadline.as_millis() as u64,
                    "Reply deadline expired; answering with the unavailable notice"
                );
                Ok(self.classifier.profile().unavailable.to_string())
            }
        }
    }
}

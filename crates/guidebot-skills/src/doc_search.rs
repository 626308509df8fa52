//! Documentation search: the remote fallback consulted after every local rule missed.
//!
//! Produces a templated pointer to the domain's documentation that embeds the query.
//! Failures (offline mode, timeout) are logged and reported as absence.

use async_trait::async_trait;
use guidebot_core::{Domain, RemoteLookup, RemoteLookupError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::time::Duration;

const SKILL_NAME: &str = "DocSearch";

/// Characters a URI component keeps unescaped: alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// How the search answers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Deterministic documentation-pointer template.
    #[default]
    Template,
    /// Always unavailable; exercises the default tier.
    Offline,
}

/// Remote fallback for one domain.
#[derive(Debug, Clone)]
pub struct DocSearch {
    domain: Domain,
    mode: SearchMode,
    latency: Option<Duration>,
    timeout: Option<Duration>,
}

impl DocSearch {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            mode: SearchMode::default(),
            latency: None,
            timeout: None,
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Simulated round-trip delay before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Upper bound on one lookup; `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    async fn search(&self, query: &str) -> Result<String, RemoteLookupError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.mode {
            SearchMode::Template => Ok(render(self.domain, query)),
            SearchMode::Offline => Err(RemoteLookupError::Unavailable(format!(
                "{} documentation is offline",
                self.domain.label()
            ))),
        }
    }
}

/// Documentation pointer for `query` in `domain`.
fn render(domain: Domain, query: &str) -> String {
    match domain {
        // The first line ends with a space.
        Domain::DesignSystem => format!(
            concat!(
                "I found your query about \"{query}\" but couldn't access the latest GDS documentation directly. \n",
                "
For the most current information, please visit:
• **Components**: https://design-system.service.gov.uk/components/
• **Patterns**: https://design-system.service.gov.uk/patterns/
• **Styles**: https://design-system.service.gov.uk/styles/

You can also search the GDS Design System directly at: https://design-system.service.gov.uk/search/?q={encoded}"
            ),
            query = query,
            encoded = utf8_percent_encode(query, URI_COMPONENT),
        ),
        Domain::Publishing => format!(
            "I found your query about \"{query}\". Here are some helpful Posit Connect resources:

For the most current information, please visit:
• **Posit Connect User Guide**: https://docs.posit.co/connect/user/
• **Publishing Content**: https://docs.posit.co/connect/user/publishing/
• **R & Python Examples**: https://docs.posit.co/connect/user/content-types/
• **Administration Guide**: https://docs.posit.co/connect/admin/

For Python-specific guidance: https://docs.posit.co/connect/user/python/
For R-specific guidance: https://docs.posit.co/connect/user/r/",
            query = query,
        ),
    }
}

#[async_trait]
impl RemoteLookup for DocSearch {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn lookup(&self, query: &str) -> Option<String> {
        tracing::debug!(target: "guidebot::search", domain = %self.domain, query, "Searching documentation");
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.search(query))
                .await
                .unwrap_or_else(|_| Err(RemoteLookupError::TimedOut(limit))),
            None => self.search(query).await,
        };
        match result {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(
                    target: "guidebot::search",
                    domain = %self.domain,
                    error = %e,
                    "Documentation search failed; falling back"
                );
                None
            }
        }
    }
}

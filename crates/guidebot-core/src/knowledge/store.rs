//! In-memory, read-only store with one ordered corpus per knowledge domain.
//!
//! ## Corpora
//!
//! | Domain         | Entries | Content                                         |
//! |----------------|---------|-------------------------------------------------|
//! | `DesignSystem` | 7       | GOV.UK header, accessibility, brand, snippets   |
//! | `Publishing`   | 7       | Posit Connect overview, practices, starter code |
//!
//! Both corpora are loaded once by [`KnowledgeStore::bootstrap`] and never mutated;
//! share the store behind an `Arc` across any number of classifiers and sessions.

use super::{design_system, publishing};
use crate::shared::Domain;
use serde::Serialize;

/// One topic of a corpus: a stable key (e.g. `header_design`) and its canonical answer.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeEntry {
    pub key: String,
    pub text: String,
    /// Lowercased `text`, computed once at load for the first-token check.
    #[serde(skip)]
    text_lower: String,
}

impl KnowledgeEntry {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            key: key.into(),
            text_lower: text.to_lowercase(),
            text,
        }
    }

    /// Direct-key match against an already lowercased query.
    ///
    /// True when the query contains the key with its first underscore replaced by a
    /// space, or with every underscore replaced by a space, or when this entry's text
    /// contains the query's first token (everything before the first space). An empty
    /// first token is contained in every text, so a query starting with a space
    /// matches the first entry of the corpus.
    pub fn key_matches(&self, normalized_query: &str) -> bool {
        let first_split = self.key.replacen('_', " ", 1);
        let word_split = self.key.replace('_', " ");
        normalized_query.contains(&first_split)
            || normalized_query.contains(&word_split)
            || self.text_lower.contains(first_token(normalized_query))
    }
}

/// The text before the first single space (the whole query when it has none).
pub fn first_token(normalized_query: &str) -> &str {
    normalized_query.split(' ').next().unwrap_or("")
}

/// Ordered, immutable set of entries for one domain.
#[derive(Debug, Clone)]
pub struct Corpus {
    domain: Domain,
    entries: Vec<KnowledgeEntry>,
}

impl Corpus {
    /// Builds a corpus from `(key, text)` pairs, keeping their order.
    pub fn from_pairs(domain: Domain, pairs: &[(&str, &str)]) -> Self {
        Self {
            domain,
            entries: pairs
                .iter()
                .map(|(key, text)| KnowledgeEntry::new(*key, *text))
                .collect(),
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the canonical text for `key`, if the corpus defines it.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.text.as_str())
    }

    /// First entry in definition order whose key matches the lowercased query.
    pub fn first_key_match(&self, normalized_query: &str) -> Option<&KnowledgeEntry> {
        self.entries
            .iter()
            .find(|e| e.key_matches(normalized_query))
    }
}

/// Process-wide registry of both domain corpora.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    design_system: Corpus,
    publishing: Corpus,
}

impl KnowledgeStore {
    /// Loads both built-in corpora verbatim.
    pub fn bootstrap() -> Self {
        let store = Self::from_corpora(
            Corpus::from_pairs(Domain::DesignSystem, design_system::ENTRIES),
            Corpus::from_pairs(Domain::Publishing, publishing::ENTRIES),
        );
        tracing::debug!(
            target: "guidebot::knowledge",
            design_system = store.design_system.len(),
            publishing = store.publishing.len(),
            "Knowledge corpora loaded"
        );
        store
    }

    /// Builds a store from explicit corpora (tests and alternate deployments).
    pub fn from_corpora(design_system: Corpus, publishing: Corpus) -> Self {
        Self {
            design_system,
            publishing,
        }
    }

    pub fn corpus(&self, domain: Domain) -> &Corpus {
        match domain {
            Domain::DesignSystem => &self.design_system,
            Domain::Publishing => &self.publishing,
        }
    }

    /// Returns the canonical text for `key` in `domain`.
    pub fn lookup(&self, domain: Domain, key: &str) -> Option<&str> {
        self.corpus(domain).lookup(key)
    }

    /// All entries of `domain` in definition order.
    pub fn entries(&self, domain: Domain) -> &[KnowledgeEntry] {
        self.corpus(domain).entries()
    }

    /// Per-domain entry counts, for status reporting.
    pub fn status(&self) -> Vec<CorpusStatus> {
        Domain::all()
            .into_iter()
            .map(|domain| {
                let corpus = self.corpus(domain);
                CorpusStatus {
                    domain,
                    label: domain.label(),
                    entry_count: corpus.len(),
                    keys: corpus.entries().iter().map(|e| e.key.clone()).collect(),
                }
            })
            .collect()
    }
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::bootstrap()
    }
}

/// Status summary of one corpus.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStatus {
    pub domain: Domain,
    pub label: &'static str,
    pub entry_count: usize,
    pub keys: Vec<String>,
}

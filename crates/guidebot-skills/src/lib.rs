//! Concrete collaborators for the guidebot core: documentation search and the session responder.

pub use guidebot_core::{RemoteLookup, Responder};

mod doc_search;
mod knowledge_responder;

pub use doc_search::{DocSearch, SearchMode};
pub use knowledge_responder::{build_classifier, KnowledgeResponder};

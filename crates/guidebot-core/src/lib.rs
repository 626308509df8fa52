//! guidebot-core: two-domain guide assistant (shared types, knowledge store, classifier, sessions).
//!
//! Add-ons and the gateway depend only on the re-exports below.

mod classifier;
mod error;
mod knowledge;
mod session;
mod shared;

// Shared
pub use shared::{CoreConfig, Domain, UnknownDomain};

// Errors
pub use error::{RemoteLookupError, SubmissionError};

// Knowledge
pub use knowledge::{first_token, Corpus, CorpusStatus, KnowledgeEntry, KnowledgeStore};

// Classifier
pub use classifier::{
    Answer, Classification, DomainProfile, QueryClassifier, RemoteLookup, Rule, Tier, Trigger,
};

// Session
pub use session::{
    Message, Notice, Responder, Sender, SessionController, SessionOptions, SessionSnapshot,
    TurnEvent, TurnState, GREETING_ID,
};

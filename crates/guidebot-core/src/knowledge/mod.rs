//! Two-domain static knowledge base.
//!
//! ## Knowledge Base Architecture
//!
//! | Domain         | Source module     | Purpose                                   |
//! |----------------|-------------------|-------------------------------------------|
//! | `DesignSystem` | `design_system`   | GOV.UK Design System style guide          |
//! | `Publishing`   | `publishing`      | Posit Connect deployment and starter code |

mod design_system;
mod publishing;
mod store;

pub use store::{first_token, Corpus, CorpusStatus, KnowledgeEntry, KnowledgeStore};


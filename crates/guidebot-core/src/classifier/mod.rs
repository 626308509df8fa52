//! Query classifier: raw question → exactly one response text.
//!
//! ## Cascade
//!
//! Each domain profile is an ordered list of [`Rule`]s evaluated first-match-wins.
//! Rules are grouped into tiers that always appear in this order:
//!
//! | Tier | `Tier`          | Fires when                                              |
//! |------|-----------------|---------------------------------------------------------|
//! | 1    | `CodeIntent`    | a code token is present (snippet sub-rules, then summary) |
//! | 2    | `DirectKey`     | a corpus entry key or first-token match                 |
//! | 3    | `TopicKeyword`  | a topic keyword is present                              |
//! | 4    | `HowTo`         | a procedural keyword is present                         |
//! | 5    | `Remote`        | remote lookup is allowed and returns something          |
//! | 6    | `Default`       | always (domain capability menu)                         |
//!
//! Matching is lowercase substring containment, never whole-word: "brandy" matches
//! the `brand` keyword. The classifier never fails.

mod design_system;
mod publishing;
mod remote;

pub use remote::RemoteLookup;

use crate::knowledge::{Corpus, KnowledgeEntry, KnowledgeStore};
use crate::shared::Domain;
use serde::Serialize;
use std::sync::Arc;

/// Stage of the cascade a rule belongs to. Earlier tiers take priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    CodeIntent = 1,
    DirectKey = 2,
    TopicKeyword = 3,
    HowTo = 4,
    Remote = 5,
    Default = 6,
}

/// Condition under which a rule fires.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Query contains any of the tokens.
    AnyOf(&'static [&'static str]),
    /// Query contains any token of the first set and any token of the second.
    AllOf(&'static [&'static str], &'static [&'static str]),
    /// Some corpus entry satisfies [`KnowledgeEntry::key_matches`].
    KnowledgeKey,
    /// Remote lookup is enabled for this call.
    RemoteAllowed,
}

/// How a fired rule produces its text. Producing `None` lets the cascade continue.
#[derive(Debug, Clone, Copy)]
pub enum Answer {
    /// Canonical text of a corpus entry.
    Entry(&'static str),
    /// Fixed text.
    Text(&'static str),
    /// Corpus entry, blank line, then fixed text.
    EntryThen(&'static str, &'static str),
    /// Fixed text, blank line, then corpus entry.
    TextThen(&'static str, &'static str),
    /// The entry found by a [`Trigger::KnowledgeKey`] trigger.
    MatchedEntry,
    /// Whatever the remote lookup returns.
    Remote,
}

/// One `(predicate, response-producer)` pair of the cascade.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub tier: Tier,
    pub name: &'static str,
    pub when: Trigger,
    pub then: Answer,
}

impl Rule {
    pub const fn new(tier: Tier, name: &'static str, when: Trigger, then: Answer) -> Self {
        Self {
            tier,
            name,
            when,
            then,
        }
    }
}

/// Rule table plus the fixed copy a domain needs around it.
#[derive(Debug, Clone)]
pub struct DomainProfile {
    pub domain: Domain,
    /// Tiers 1–5 in evaluation order; tier 6 is `capabilities`.
    pub rules: Vec<Rule>,
    /// Default-tier "menu of capabilities" text.
    pub capabilities: &'static str,
    /// Welcome message a new session may open with.
    pub greeting: &'static str,
    /// Answer given when a turn cannot be produced in time.
    pub unavailable: &'static str,
}

impl DomainProfile {
    pub fn for_domain(domain: Domain) -> Self {
        match domain {
            Domain::DesignSystem => design_system::profile(),
            Domain::Publishing => publishing::profile(),
        }
    }
}

/// Result of a classification with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub domain: Domain,
    pub tier: Tier,
    pub rule: &'static str,
    pub text: String,
}

/// What a trigger matched on.
enum Hit<'a> {
    Keywords,
    Entry(&'a KnowledgeEntry),
}

fn contains_any(haystack: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| haystack.contains(t))
}

/// Per-domain classifier. Holds no mutable state; clone or share freely.
#[derive(Clone)]
pub struct QueryClassifier {
    knowledge: Arc<KnowledgeStore>,
    profile: Arc<DomainProfile>,
    remote: Option<Arc<dyn RemoteLookup>>,
}

impl QueryClassifier {
    /// Classifier for `domain` over the shared store, without a remote fallback.
    pub fn new(domain: Domain, knowledge: Arc<KnowledgeStore>) -> Self {
        Self::with_profile(DomainProfile::for_domain(domain), knowledge)
    }

    pub fn with_profile(profile: DomainProfile, knowledge: Arc<KnowledgeStore>) -> Self {
        Self {
            knowledge,
            profile: Arc::new(profile),
            remote: None,
        }
    }

    /// Attaches the collaborator consulted by the remote tier.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteLookup>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn domain(&self) -> Domain {
        self.profile.domain
    }

    pub fn profile(&self) -> &DomainProfile {
        &self.profile
    }

    fn corpus(&self) -> &Corpus {
        self.knowledge.corpus(self.profile.domain)
    }

    /// Maps `query` to its response text. Always resolves.
    pub async fn classify(&self, query: &str, allow_remote: bool) -> String {
        self.classify_detailed(query, allow_remote).await.text
    }

    /// Like [`classify`](Self::classify), also reporting the tier and rule that answered.
    pub async fn classify_detailed(&self, query: &str, allow_remote: bool) -> Classification {
        let normalized = query.to_lowercase();
        for rule in &self.profile.rules {
            let Some(hit) = self.trigger(rule.when, &normalized, allow_remote) else {
                continue;
            };
            if let Some(text) = self.produce(rule, hit, query).await {
                tracing::debug!(
                    target: "guidebot::classifier",
                    domain = %self.profile.domain,
                    tier = ?rule.tier,
                    rule = rule.name,
                    "Query classified"
                );
                return Classification {
                    domain: self.profile.domain,
                    tier: rule.tier,
                    rule: rule.name,
                    text,
                };
            }
        }

        tracing::debug!(
            target: "guidebot::classifier",
            domain = %self.profile.domain,
            "No rule matched; answering with capabilities"
        );
        Classification {
            domain: self.profile.domain,
            tier: Tier::Default,
            rule: "capabilities",
            text: self.profile.capabilities.to_string(),
        }
    }

    fn trigger<'a>(&'a self, when: Trigger, normalized: &str, allow_remote: bool) -> Option<Hit<'a>> {
        match when {
            Trigger::AnyOf(tokens) => contains_any(normalized, tokens).then_some(Hit::Keywords),
            Trigger::AllOf(primary, secondary) => (contains_any(normalized, primary)
                && contains_any(normalized, secondary))
            .then_some(Hit::Keywords),
            Trigger::KnowledgeKey => self.corpus().first_key_match(normalized).map(Hit::Entry),
            Trigger::RemoteAllowed => allow_remote.then_some(Hit::Keywords),
        }
    }

    async fn produce(&self, rule: &Rule, hit: Hit<'_>, raw_query: &str) -> Option<String> {
        match rule.then {
            Answer::Entry(key) => self.entry(rule, key).map(str::to_string),
            Answer::Text(text) => Some(text.to_string()),
            Answer::EntryThen(key, suffix) => {
                self.entry(rule, key).map(|entry| format!("{}\n\n{}", entry, suffix))
            }
            Answer::TextThen(prefix, key) => {
                self.entry(rule, key).map(|entry| format!("{}\n\n{}", prefix, entry))
            }
            Answer::MatchedEntry => match hit {
                Hit::Entry(entry) => Some(entry.text.clone()),
                Hit::Keywords => None,
            },
            Answer::Remote => match &self.remote {
                Some(remote) => remote.lookup(raw_query).await,
                None => None,
            },
        }
    }

    fn entry(&self, rule: &Rule, key: &str) -> Option<&str> {
        let text = self.corpus().lookup(key);
        if text.is_none() {
            tracing::warn!(
                target: "guidebot::classifier",
                domain = %self.profile.domain,
                rule = rule.name,
                key,
                "Rule references a key missing from the corpus; continuing"
            );
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn classifier(domain: Domain) -> QueryClassifier {
        QueryClassifier::new(domain, Arc::new(KnowledgeStore::bootstrap()))
    }

    fn entry(domain: Domain, key: &str) -> String {
        KnowledgeStore::bootstrap()
            .lookup(domain, key)
            .unwrap()
            .to_string()
    }

    /// Remote double that echoes the query and counts calls.
    struct EchoLookup {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RemoteLookup for EchoLookup {
        fn name(&self) -> &str {
            "echo"
        }

        async fn lookup(&self, query: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Some(format!("remote: {}", query))
        }
    }

    struct FailingLookup;

    #[async_trait]
    impl RemoteLookup for FailingLookup {
        fn name(&self) -> &str {
            "failing"
        }

        async fn lookup(&self, _query: &str) -> Option<String> {
            None
        }
    }

    #[tokio::test]
    async fn button_code_returns_button_snippet() {
        let gds = classifier(Domain::DesignSystem);
        let result = gds.classify_detailed("Show me button code", false).await;
        assert_eq!(result.tier, Tier::CodeIntent);
        assert_eq!(result.rule, "button_snippet");
        assert_eq!(result.text, entry(Domain::DesignSystem, "button_code"));
        assert!(result.text.contains("govuk-button"));
    }

    #[tokio::test]
    async fn any_code_and_button_query_wins_over_summary() {
        let gds = classifier(Domain::DesignSystem);
        let button = entry(Domain::DesignSystem, "button_code");
        for query in [
            "code button",
            "BUTTON CODE please",
            "I need code for a form button",
            "header button code",
            "barcode buttons",
        ] {
            assert_eq!(gds.classify(query, false).await, button, "query: {query}");
        }
    }

    #[tokio::test]
    async fn header_code_returns_header_snippet() {
        let text = classifier(Domain::DesignSystem)
            .classify("header code", false)
            .await;
        assert!(text.contains("govuk-header"));
        assert_eq!(text, entry(Domain::DesignSystem, "header_code"));
    }

    #[tokio::test]
    async fn code_sub_cascade_checks_secondary_tokens_in_order() {
        let gds = classifier(Domain::DesignSystem);
        assert_eq!(
            gds.classify("code for a form", false).await,
            entry(Domain::DesignSystem, "form_code")
        );
        assert_eq!(
            gds.classify("nav example", false).await,
            entry(Domain::DesignSystem, "navigation_code")
        );
        // form beats header because it is listed first.
        assert_eq!(
            gds.classify("header input snippet", false).await,
            entry(Domain::DesignSystem, "form_code")
        );
    }

    #[tokio::test]
    async fn code_without_secondary_token_returns_summary() {
        let result = classifier(Domain::DesignSystem)
            .classify_detailed("some html", false)
            .await;
        assert_eq!(result.rule, "snippet_summary");
        assert!(result.text.starts_with("Here are some common GDS code patterns:"));
    }

    #[tokio::test]
    async fn gds_colors_returns_brand_with_palette() {
        let result = classifier(Domain::DesignSystem)
            .classify_detailed("what are the gds colors", false)
            .await;
        assert_eq!(result.tier, Tier::TopicKeyword);
        assert_eq!(result.rule, "brand_palette");
        assert!(result
            .text
            .starts_with(&entry(Domain::DesignSystem, "brand_refresh_2025")));
        assert!(result.text.contains("\n\nGDS uses specific colors"));
        assert!(result.text.contains("#1d70b8"));
    }

    #[tokio::test]
    async fn cta_composes_guidance_and_button_snippet() {
        let text = classifier(Domain::DesignSystem).classify("cta", false).await;
        assert!(text.starts_with("GDS buttons should have clear text"));
        assert!(text.ends_with(&entry(Domain::DesignSystem, "button_code")));
    }

    #[tokio::test]
    async fn direct_key_tier_runs_before_topic_keywords() {
        let gds = classifier(Domain::DesignSystem);
        // "button" alone is in the button_code text, so tier 2 answers first.
        let result = gds.classify_detailed("button", false).await;
        assert_eq!(result.tier, Tier::DirectKey);
        assert_eq!(result.text, entry(Domain::DesignSystem, "button_code"));

        let result = gds.classify_detailed("accessibility strategy", false).await;
        assert_eq!(result.tier, Tier::DirectKey);
        assert_eq!(
            result.text,
            entry(Domain::DesignSystem, "accessibility_strategy")
        );
    }

    #[tokio::test]
    async fn first_token_collision_is_preserved() {
        // "tell" appears inside "tells users" in header_design.
        let result = classifier(Domain::DesignSystem)
            .classify_detailed("tell me about accessibility", false)
            .await;
        assert_eq!(result.tier, Tier::DirectKey);
        assert_eq!(result.text, entry(Domain::DesignSystem, "header_design"));
    }

    #[tokio::test]
    async fn topic_tier_matches_keywords_as_substrings() {
        let gds = classifier(Domain::DesignSystem);
        let result = gds.classify_detailed("zzz accessible", false).await;
        assert_eq!(result.tier, Tier::TopicKeyword);
        assert_eq!(result.rule, "accessibility");
        assert_eq!(
            result.text,
            entry(Domain::DesignSystem, "accessibility_strategy")
        );

        let result = gds.classify_detailed("zzz masthead", false).await;
        assert_eq!(result.rule, "header");

        // "brandy" contains "brand".
        let result = gds.classify_detailed("zzz brandy", false).await;
        assert_eq!(result.rule, "brand_palette");
    }

    #[tokio::test]
    async fn wcag_is_answered_from_entry_text() {
        let result = classifier(Domain::DesignSystem)
            .classify_detailed("wcag", false)
            .await;
        assert_eq!(result.tier, Tier::DirectKey);
        assert_eq!(
            result.text,
            entry(Domain::DesignSystem, "accessibility_strategy")
        );
    }

    #[tokio::test]
    async fn how_to_tier_returns_checklists() {
        let gds = classifier(Domain::DesignSystem)
            .classify_detailed("How do I deploy?", false)
            .await;
        assert_eq!(gds.tier, Tier::HowTo);
        assert!(gds.text.starts_with("To implement GDS guidelines:"));

        let posit = classifier(Domain::Publishing)
            .classify_detailed("How do I deploy?", false)
            .await;
        assert_eq!(posit.tier, Tier::HowTo);
        assert!(posit
            .text
            .starts_with("To build and deploy data applications on Posit Connect:"));
    }

    #[tokio::test]
    async fn gibberish_without_remote_returns_capabilities() {
        let gds = classifier(Domain::DesignSystem);
        let result = gds
            .classify_detailed("gibberish unrelated text", false)
            .await;
        assert_eq!(result.tier, Tier::Default);
        assert_eq!(result.text, gds.profile().capabilities);
        assert!(result.text.starts_with("I can help with GDS Design System questions"));
    }

    #[tokio::test]
    async fn remote_tier_only_runs_when_allowed() {
        let lookup = Arc::new(EchoLookup {
            calls: AtomicUsize::new(0),
        });
        let gds = classifier(Domain::DesignSystem).with_remote(lookup.clone());

        let offline = gds.classify("gibberish unrelated text", false).await;
        assert_eq!(offline, gds.profile().capabilities);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);

        let online = gds.classify_detailed("Gibberish unrelated text", true).await;
        assert_eq!(online.tier, Tier::Remote);
        assert_eq!(online.text, "remote: Gibberish unrelated text");
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remote_tier_not_reached_when_local_rule_matches() {
        let lookup = Arc::new(EchoLookup {
            calls: AtomicUsize::new(0),
        });
        let gds = classifier(Domain::DesignSystem).with_remote(lookup.clone());
        let text = gds.classify("Show me button code", true).await;
        assert!(text.contains("govuk-button"));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_remote_falls_through_to_default() {
        let gds = classifier(Domain::DesignSystem).with_remote(Arc::new(FailingLookup));
        let result = gds.classify_detailed("gibberish unrelated text", true).await;
        assert_eq!(result.tier, Tier::Default);
    }

    #[tokio::test]
    async fn publishing_code_tier_uses_its_own_tables() {
        let posit = classifier(Domain::Publishing);
        assert_eq!(
            posit.classify("shiny code", false).await,
            entry(Domain::Publishing, "shiny_app_code")
        );
        assert_eq!(
            posit.classify("python dashboard code", false).await,
            entry(Domain::Publishing, "python_dashboard_code")
        );
        assert_eq!(
            posit.classify("r markdown example", false).await,
            entry(Domain::Publishing, "r_markdown_code")
        );
        assert_eq!(
            posit.classify("api snippet", false).await,
            entry(Domain::Publishing, "api_deployment_code")
        );
        // "html" is not a code token for this domain.
        assert_eq!(
            posit.classify("some html", false).await,
            posit.profile().capabilities
        );
    }

    #[tokio::test]
    async fn publishing_topic_tier() {
        let posit = classifier(Domain::Publishing);
        let cases = [
            ("zzz deployment", "platform_overview", "posit_connect_overview"),
            ("zzz jupyter", "python_practices", "python_best_practices"),
            ("zzz r stuff", "r_practices", "r_best_practices"),
            ("zzz tidyverse", "r_practices", "r_best_practices"),
        ];
        for (query, rule, key) in cases {
            let result = posit.classify_detailed(query, false).await;
            assert_eq!(result.tier, Tier::TopicKeyword, "{query}");
            assert_eq!(result.rule, rule, "{query}");
            assert_eq!(result.text, entry(Domain::Publishing, key), "{query}");
        }

        let result = posit.classify_detailed("training", false).await;
        assert_eq!(result.tier, Tier::TopicKeyword);
        assert_eq!(result.rule, "training");
        assert!(result
            .text
            .starts_with("Training resources for government data analysts:"));
    }

    #[tokio::test]
    async fn bare_r_inside_a_word_is_not_an_r_topic() {
        let result = classifier(Domain::Publishing)
            .classify_detailed("zzz rstats", false)
            .await;
        assert_eq!(result.tier, Tier::Default);
        assert_eq!(result.rule, "capabilities");
    }

    #[tokio::test]
    async fn publishing_direct_key_tier() {
        let result = classifier(Domain::Publishing)
            .classify_detailed("tidyverse", false)
            .await;
        assert_eq!(result.tier, Tier::DirectKey);
        assert_eq!(result.rule, "knowledge_key");
        assert_eq!(result.text, entry(Domain::Publishing, "r_best_practices"));
    }

    #[tokio::test]
    async fn fixed_texts_are_returned_byte_for_byte() {
        let cases = [
            (Domain::DesignSystem, "some html", 298, "**Button:**\n"),
            (Domain::DesignSystem, "gibberish unrelated text", 530, "GDS patterns  \n"),
            (Domain::DesignSystem, "How do I deploy?", 495, ""),
            (Domain::DesignSystem, "zzz brandy", 462, ""),
            (Domain::DesignSystem, "cta", 610, ""),
            (Domain::Publishing, "Show me button code", 405, "visualization  \n"),
            (Domain::Publishing, "training", 783, "analysts:\n    \n"),
            (Domain::Publishing, "How do I deploy?", 1006, "security patches  \n"),
            (Domain::Publishing, "gibberish unrelated text", 920, ""),
        ];
        for (domain, query, len, fragment) in cases {
            let text = classifier(domain).classify(query, false).await;
            assert_eq!(text.len(), len, "{domain} {query}");
            assert!(text.contains(fragment), "{domain} {query}");
        }
    }

    #[tokio::test]
    async fn domains_do_not_share_tables() {
        let gds = classifier(Domain::DesignSystem);
        let posit = classifier(Domain::Publishing);
        let a = gds.classify("Show me button code", false).await;
        let b = posit.classify("Show me button code", false).await;
        assert_ne!(a, b);
        assert!(b.starts_with("Here are some common Posit Connect code patterns:"));
    }

    #[tokio::test]
    async fn classification_is_deterministic() {
        let gds = classifier(Domain::DesignSystem);
        let posit = classifier(Domain::Publishing);
        for query in [
            "what are the gds colors",
            "gibberish unrelated text",
            "How do I deploy?",
            "r best practices",
            "",
        ] {
            for allow_remote in [false, true] {
                assert_eq!(
                    gds.classify_detailed(query, allow_remote).await,
                    gds.classify_detailed(query, allow_remote).await
                );
                assert_eq!(
                    posit.classify(query, allow_remote).await,
                    posit.classify(query, allow_remote).await
                );
            }
        }
    }

    #[tokio::test]
    async fn missing_corpus_key_continues_cascade() {
        let store = KnowledgeStore::from_corpora(
            Corpus::from_pairs(Domain::DesignSystem, &[]),
            Corpus::from_pairs(Domain::Publishing, &[]),
        );
        let gds = QueryClassifier::new(Domain::DesignSystem, Arc::new(store));
        // button_code is absent, so the next code rule (summary) answers.
        let result = gds.classify_detailed("button code", false).await;
        assert_eq!(result.rule, "snippet_summary");
    }

    #[test]
    fn every_profile_orders_rules_by_tier() {
        for domain in Domain::all() {
            let profile = DomainProfile::for_domain(domain);
            let tiers: Vec<Tier> = profile.rules.iter().map(|r| r.tier).collect();
            let mut sorted = tiers.clone();
            sorted.sort();
            assert_eq!(tiers, sorted, "{domain} rules out of tier order");
            assert_eq!(profile.rules.last().map(|r| r.tier), Some(Tier::Remote));
        }
    }
}

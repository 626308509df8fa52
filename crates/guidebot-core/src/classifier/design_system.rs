//! Rule table and conversational copy for the GOV.UK Design System domain.

use super::{Answer, DomainProfile, Rule, Tier, Trigger};
use crate::shared::Domain;

const CODE_TOKENS: &[&str] = &["code", "snippet", "example", "html"];

const CODE_SUMMARY: &str = r##"Here are some common GDS code patterns:

**Button:**
`<button class="govuk-button">Continue</button>`

**Input:**
`<input class="govuk-input" type="text">`

**Link:**
`<a class="govuk-link" href="#">Link text</a>`

For complete code examples, visit: https://design-system.service.gov.uk/components/"##;

const PALETTE: &str = "GDS uses specific colors: GDS Blue (#1d70b8) for primary actions, GDS Green (#00703c) for success, GDS Red (#d4351c) for errors, and GDS Yellow (#ffdd00) for warnings and focus states.";

const BUTTON_GUIDANCE: &str = "GDS buttons should have clear text describing the action, minimum 44px touch target, and proper focus states. Use 'Continue' rather than 'Next', and 'Save and continue' for forms.";

const IMPLEMENTATION_CHECKLIST: &str = r#"To implement GDS guidelines:

1. **Use the official CSS/JS**: Include govuk-frontend in your project
2. **Follow component patterns**: Use exact HTML structure from design-system.service.gov.uk
3. **Test accessibility**: Ensure WCAG 2.2 AA compliance
4. **Mobile-first**: Design for mobile, enhance for desktop
5. **User testing**: Test with real users, especially those using assistive technologies

For specific implementation guidance, visit: https://design-system.service.gov.uk/get-started/"#;

// Keep the trailing spaces: answers are returned byte for byte.
const CAPABILITIES: &str = concat!(
    r#"I can help with GDS Design System questions including:

• **Components**: buttons, forms, navigation, headers
• **Code examples**: HTML/CSS snippets for GDS patterns"#,
    "  ",
    r#"
• **Accessibility**: WCAG guidelines and implementation
• **Colors & branding**: GDS color palette and 2025 brand refresh
• **Best practices**: Implementation and user testing guidance

Try asking: "Show me button code", "How do I make forms accessible?", or "What are the GDS colors?"

For detailed documentation: https://design-system.service.gov.uk/"#
);

const GREETING: &str = "Hello! I'm your GDS Design System assistant. I can help you with components, code examples, accessibility, colors and branding, and implementation best practices. Try asking: \"Show me button code\" or \"What are the GDS colors?\"";

const UNAVAILABLE: &str = "I'm here to help with GDS Design System questions. You can ask me about components, accessibility guidelines, implementation patterns, colors, typography, and more. For the most current information, I recommend checking design-system.service.gov.uk.";

pub(crate) fn profile() -> DomainProfile {
    let rules = vec![
        Rule::new(
            Tier::CodeIntent,
            "button_snippet",
            Trigger::AllOf(CODE_TOKENS, &["button"]),
            Answer::Entry("button_code"),
        ),
        Rule::new(
            Tier::CodeIntent,
            "form_snippet",
            Trigger::AllOf(CODE_TOKENS, &["form", "input"]),
            Answer::Entry("form_code"),
        ),
        Rule::new(
            Tier::CodeIntent,
            "header_snippet",
            Trigger::AllOf(CODE_TOKENS, &["header", "masthead"]),
            Answer::Entry("header_code"),
        ),
        Rule::new(
            Tier::CodeIntent,
            "navigation_snippet",
            Trigger::AllOf(CODE_TOKENS, &["nav", "breadcrumb"]),
            Answer::Entry("navigation_code"),
        ),
        Rule::new(
            Tier::CodeIntent,
            "snippet_summary",
            Trigger::AnyOf(CODE_TOKENS),
            Answer::Text(CODE_SUMMARY),
        ),
        Rule::new(
            Tier::DirectKey,
            "knowledge_key",
            Trigger::KnowledgeKey,
            Answer::MatchedEntry,
        ),
        Rule::new(
            Tier::TopicKeyword,
            "header",
            Trigger::AnyOf(&["header", "masthead"]),
            Answer::Entry("header_design"),
        ),
        Rule::new(
            Tier::TopicKeyword,
            "accessibility",
            Trigger::AnyOf(&["accessible", "accessibility", "wcag"]),
            Answer::Entry("accessibility_strategy"),
        ),
        Rule::new(
            Tier::TopicKeyword,
            "brand_palette",
            Trigger::AnyOf(&["color", "colour", "blue", "brand"]),
            Answer::EntryThen("brand_refresh_2025", PALETTE),
        ),
        Rule::new(
            Tier::TopicKeyword,
            "button_guidance",
            Trigger::AnyOf(&["button", "cta"]),
            Answer::TextThen(BUTTON_GUIDANCE, "button_code"),
        ),
        Rule::new(
            Tier::HowTo,
            "implementation_checklist",
            Trigger::AnyOf(&["how", "implement", "build"]),
            Answer::Text(IMPLEMENTATION_CHECKLIST),
        ),
        Rule::new(
            Tier::Remote,
            "documentation_search",
            Trigger::RemoteAllowed,
            Answer::Remote,
        ),
    ];

    DomainProfile {
        domain: Domain::DesignSystem,
        rules,
        capabilities: CAPABILITIES,
        greeting: GREETING,
        unavailable: UNAVAILABLE,
    }
}

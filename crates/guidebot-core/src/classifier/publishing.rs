//! Rule table and conversational copy for the Posit Connect publishing domain.

use super::{Answer, DomainProfile, Rule, Tier, Trigger};
use crate::shared::Domain;

// "html" is a code token for the design system only.
const CODE_TOKENS: &[&str] = &["code", "snippet", "example"];

// Trailing spaces in these texts are part of the answer.
const CODE_SUMMARY: &str = concat!(
    r#"Here are some common Posit Connect code patterns:

**Shiny App:** Basic structure for interactive R applications
**Python Dashboard:** Streamlit template for data visualization"#,
    "  ",
    r#"
**R Markdown:** Professional reporting template
**API Deployment:** Plumber API example for data services

Ask specifically about "shiny code", "python dashboard", "R markdown template", or "API example" for detailed snippets."#
);

const TRAINING: &str = concat!(
    "Training resources for government data analysts:\n    \n",
    r#"**Python Training:**
- Start with pandas for data manipulation and matplotlib/seaborn for visualization
- Learn Jupyter notebooks for interactive analysis
- Practice with government datasets to build familiarity

**R Training:**
- Begin with tidyverse (dplyr, ggplot2) for data wrangling and visualization
- Learn R Markdown for reproducible reports
- Explore Shiny for interactive applications

**Posit Connect Training:**
- Understand content types (apps, reports, APIs)
- Learn deployment workflows and version control
- Practice with security and access controls

**Best Practices:**
- Version control with Git
- Code documentation and commenting
- Testing and validation procedures
- Data security and privacy considerations"#
);

const DEPLOYMENT_CHECKLIST: &str = concat!(
    r#"To build and deploy data applications on Posit Connect:

**1. Development Best Practices:**
- Use virtual environments (Python) or renv (R) for dependency management
- Write clean, documented code with proper error handling
- Test locally before deployment
- Follow government coding standards and security practices

**2. Content Types:**
- **Shiny Apps**: Interactive R applications for data exploration
- **Streamlit/Dash**: Python dashboards for data visualization
- **R Markdown/Jupyter**: Reports and documentation
- **APIs**: Data services using plumber (R) or FastAPI (Python)

**3. Deployment Process:**
- Connect your IDE to Posit Connect
- Use rsconnect or Python Connect packages
- Configure environment variables and secrets
- Set up proper access controls and permissions

**4. Monitoring & Maintenance:**
- Set up usage analytics and monitoring
- Regular updates and security patches"#,
    "  ",
    r#"
- User feedback collection and iteration

For detailed guides, visit: https://docs.posit.co/connect/user/"#
);

const CAPABILITIES: &str = r#"I can help with Posit Connect and government data analysis questions including:

• **Posit Connect**: Deployment, publishing, and content management
• **Python Development**: Pandas, Streamlit, Jupyter, APIs with FastAPI
• **R Development**: Shiny, tidyverse, R Markdown, plumber APIs
• **Training & Onboarding**: Learning paths for Python, R, and Posit Connect
• **Best Practices**: Code standards, security, reproducibility
• **UX Patterns**: Dashboard design, user research, accessibility
• **Monitoring Tools**: Analytics, performance tracking, user insights

Try asking: "Show me Shiny code", "How do I deploy a Python dashboard?", "What are R best practices?", or "How do I create training materials?"

**Key Resources:**
- Posit Connect Documentation: https://docs.posit.co/connect/
- R Training: https://education.rstudio.com/
- Python for Data Science: https://www.python.org/about/gettingstarted/"#;

const GREETING: &str = "Hello! I'm your Posit Connect assistant for government data analysts. I can help you with deployment workflows, Python and R development, training materials, gold standard applications, and best practices. Try asking: \"Show me Shiny app code\" or \"How do I deploy a Python dashboard?\"";

const UNAVAILABLE: &str = "I'm here to help with Posit Connect, Python, and R development for government data analysts. You can ask me about deployment, training materials, best practices, code examples, and more. For the most current information, I recommend checking docs.posit.co/connect/.";

pub(crate) fn profile() -> DomainProfile {
    let rules = vec![
        Rule::new(
            Tier::CodeIntent,
            "shiny_snippet",
            Trigger::AllOf(CODE_TOKENS, &["shiny", "app"]),
            Answer::Entry("shiny_app_code"),
        ),
        Rule::new(
            Tier::CodeIntent,
            "dashboard_snippet",
            Trigger::AllOf(CODE_TOKENS, &["python", "streamlit", "dashboard"]),
            Answer::Entry("python_dashboard_code"),
        ),
        Rule::new(
            Tier::CodeIntent,
            "report_snippet",
            Trigger::AllOf(CODE_TOKENS, &["r markdown", "rmarkdown", "report"]),
            Answer::Entry("r_markdown_code"),
        ),
        Rule::new(
            Tier::CodeIntent,
            "api_snippet",
            Trigger::AllOf(CODE_TOKENS, &["api", "plumber"]),
            Answer::Entry("api_deployment_code"),
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
            "platform_overview",
            Trigger::AnyOf(&["posit connect", "publishing", "deployment"]),
            Answer::Entry("posit_connect_overview"),
        ),
        Rule::new(
            Tier::TopicKeyword,
            "python_practices",
            Trigger::AnyOf(&["python", "streamlit", "jupyter"]),
            Answer::Entry("python_best_practices"),
        ),
        // Trailing space keeps "r" from matching inside every word with an r in it.
        Rule::new(
            Tier::TopicKeyword,
            "r_practices",
            Trigger::AnyOf(&["r ", "shiny", "tidyverse"]),
            Answer::Entry("r_best_practices"),
        ),
        Rule::new(
            Tier::TopicKeyword,
            "training",
            Trigger::AnyOf(&["training", "onboarding", "learning"]),
            Answer::Text(TRAINING),
        ),
        Rule::new(
            Tier::HowTo,
            "deployment_checklist",
            Trigger::AnyOf(&["how", "implement", "build", "deploy"]),
            Answer::Text(DEPLOYMENT_CHECKLIST),
        ),
        Rule::new(
            Tier::Remote,
            "documentation_search",
            Trigger::RemoteAllowed,
            Answer::Remote,
        ),
    ];

    DomainProfile {
        domain: Domain::Publishing,
        rules,
        capabilities: CAPABILITIES,
        greeting: GREETING,
        unavailable: UNAVAILABLE,
    }
}

//! Design-system corpus: GOV.UK Design System guidance and component snippets.
//!
//! Entry order is significant: the classifier's direct-key tier walks it top to bottom.

pub(crate) const ENTRIES: &[(&str, &str)] = &[
    (
        "header_design",
        "The GOV.UK header was refreshed in 2025 with a blue background instead of black. The header component tells users they're using a service on GOV.UK and lets them use GOV.UK-wide tools. It's also known as the GOV.UK masthead.",
    ),
    (
        "accessibility_strategy",
        "The GOV.UK Design System has a comprehensive accessibility strategy. Using the Design System doesn't automatically make services accessible - additional research, design, development and testing is needed. The system meets WCAG 2.2 standards and follows public sector accessibility regulations.",
    ),
    (
        "brand_refresh_2025",
        "GDS refreshed the Government Digital Service brand in 2025. All government services must adopt the new GOV.UK brand guidelines by 25 June 2025 or as soon after as possible. This includes updates to headers, service navigation, secondary navigation, footers, and phase banners.",
    ),
    (
        "button_code",
        r#"Here's a GDS-compliant button code snippet:

HTML:
<button class="govuk-button" data-module="govuk-button">
  Save and continue
</button>

CSS classes available:
- govuk-button (default blue button)
- govuk-button--secondary (grey button)
- govuk-button--warning (red button)
- govuk-button--start (with arrow icon)
- govuk-button--disabled

React/JSX example:
<button className="govuk-button" type="submit">
  Continue
</button>"#,
    ),
    (
        "form_code",
        r#"GDS form input code snippet:

HTML:
<div class="govuk-form-group">
  <label class="govuk-label" for="event-name">
    Event name
  </label>
  <input class="govuk-input" id="event-name" name="event-name" type="text">
</div>

With error state:
<div class="govuk-form-group govuk-form-group--error">
  <label class="govuk-label" for="event-name">
    Event name
  </label>
  <p class="govuk-error-message">
    <span class="govuk-visually-hidden">Error:</span> Enter an event name
  </p>
  <input class="govuk-input govuk-input--error" id="event-name" name="event-name" type="text">
</div>"#,
    ),
    (
        "header_code",
        r#"GDS header code snippet:

HTML:
<header class="govuk-header" role="banner" data-module="govuk-header">
  <div class="govuk-header__container govuk-width-container">
    <div class="govuk-header__logo">
      <a href="/" class="govuk-header__link govuk-header__link--homepage">
        <span class="govuk-header__logotype">
          <span class="govuk-header__logotype-text">
            GOV.UK
          </span>
        </span>
      </a>
    </div>
    <div class="govuk-header__content">
      <a href="/" class="govuk-header__link govuk-header__service-name">
        Service name
      </a>
    </div>
  </div>
</header>"#,
    ),
    (
        "navigation_code",
        r#"GDS navigation code snippet:

<nav class="govuk-breadcrumbs" aria-label="Breadcrumb">
  <ol class="govuk-breadcrumbs__list">
    <li class="govuk-breadcrumbs__list-item">
      <a class="govuk-breadcrumbs__link" href="/">Home</a>
    </li>
    <li class="govuk-breadcrumbs__list-item">
      <a class="govuk-breadcrumbs__link" href="/section">Section</a>
    </li>
    <li class="govuk-breadcrumbs__list-item" aria-current="page">
      Current page
    </li>
  </ol>
</nav>"#,
    ),
];

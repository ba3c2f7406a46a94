//! Body cleaning cascade
//!
//! The order of the rules matters: later rules rely on earlier ones having
//! removed addresses, links and phone numbers, and the final symbol/space
//! collapse runs twice because those removals leave fresh runs behind.

use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

struct Rule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

fn rule(name: &'static str, pattern: &str, replacement: &'static str) -> Rule {
    Rule {
        name,
        pattern: Regex::new(pattern).unwrap(),
        replacement,
    }
}

// Everything between the field-header rule and the final collapse.
static CASCADE: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule("html", r"</*.*?>|&nbsp;", ""),
        rule("email_address", r"[\w._]+@[\w.]+", ""),
        rule("forward_banner", r"[-_]{2,}.*?[-_]{2,}|FW:|Fwd:|RE:", " "),
        rule("unintended_send", r"[-_*]{2,}.*?[-_*]{2,}", " "),
        rule("dashes", r"-{2,}", " "),
        rule("transmission_warning", r"The information.*?any computer.", " "),
        rule(
            "datestamp",
            r"\d{1,2}/\d{1,2}/\d{4}\s+\d{1,2}:\d{1,2}[:\d]*\s+[AMPM]+",
            " ",
        ),
        // Stops at whitespace so text between two links survives.
        rule("link", r"[http]*[https]*[:/]*/?\w+[.]\w+\S*[.]\w+", " "),
        rule("phone_fax", r"\d*-*\d{3}-\d{3}-\d{4}\s*\(*\w*\)*", " "),
        rule("phone_country_code", r"\(\d{3}\)\s*\d{3}-\d{4}", " "),
        rule("address_code", r"[, ]*[A-Z]{2}\s+\d{5}", " "),
        rule("encoding_code", r"=\d+", ""),
        rule("long_token", r"[\w+]{20,}", ""),
    ]
});

// "> >", ", , ", ", ("
static MULTI_SYMBOLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[>,("'!.\[\]-]+\s?[>,("'!.\[\]-]+"#).unwrap());

static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// One round of symbol-run then whitespace-run collapsing
#[must_use]
pub fn collapse_runs(text: &str) -> String {
    let text = MULTI_SYMBOLS.replace_all(text, " ");
    MULTI_SPACE.replace_all(&text, " ").into_owned()
}

/// Cleans joined body text.
///
/// Built once per schema since the first rule strips header tokens
/// (`To:`, `x-folder:`, `SENT:`, ...) that leaked into forwarded bodies.
#[derive(Debug, Clone)]
pub struct BodyNormalizer {
    field_headers: Option<Regex>,
}

impl BodyNormalizer {
    /// Normalizer stripping `field_names` followed by a colon, in any case
    pub fn new<I, S>(field_names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<String> = field_names
            .into_iter()
            .filter(|name| !name.as_ref().is_empty())
            .map(|name| regex::escape(name.as_ref()))
            .collect();

        let field_headers = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&format!("(?i)(?:{}):", alternatives.join("|")))?)
        };

        Ok(Self { field_headers })
    }

    /// Rule names in application order
    #[must_use]
    pub fn rule_names() -> Vec<&'static str> {
        let mut names = vec!["field_header"];
        names.extend(CASCADE.iter().map(|r| r.name));
        names.extend(["multi_symbol", "multi_space", "multi_symbol", "multi_space"]);
        names
    }

    /// Run the full cascade over `body`. Unmatched rules are no-ops.
    #[must_use]
    pub fn normalize(&self, body: &str) -> String {
        let mut text = body.trim().to_string();

        if let Some(field_headers) = &self.field_headers {
            text = field_headers.replace_all(&text, "").into_owned();
        }

        for rule in CASCADE.iter() {
            text = rule.pattern.replace_all(&text, rule.replacement).into_owned();
        }

        let text = collapse_runs(&collapse_runs(&text));
        text.trim().to_string()
    }
}

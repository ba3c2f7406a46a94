//! Address repair and domain extraction for From/To/Cc/Bcc values

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;

// Leading name-like token, interior noise, trailing domain-like tail.
// "houston <.ward@enron.com>" -> houston | " <" | .ward@enron.co | m
static ADDRESS_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<name>[\w-]+)(?P<gap>[<\s]*)(?P<noise>[\w.'\W]+)(?P<domain>[@\w.-]+)")
        .unwrap()
});

// First "@" up to the final "."
static DOMAIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@(.*)[.]").unwrap());

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '<' | '>' | '"')
}

/// Rebuild one comma-separated fragment into a bare address.
///
/// - `houston <.ward@enron.com>` becomes `houston.ward@enron.com`
/// - `John Doe <john@example.com>` and `John <john@example.com>` become
///   `john@example.com`
/// - `john@example.com (John)` becomes `john@example.com`
/// - anything the pattern cannot match becomes an empty string
#[must_use]
pub fn reformat_fragment(fragment: &str) -> String {
    let Some(caps) = ADDRESS_PARTS.captures(fragment) else {
        return String::new();
    };
    let rebuilt = rebuild(&caps);
    if rebuilt.contains('@') {
        return rebuilt;
    }

    // A trailing comment such as "(John)" ends up in the domain group.
    fragment
        .split(is_separator)
        .map(|token| token.trim_matches(|c: char| !is_address_char(c)))
        .find(|token| token.contains('@'))
        .map_or(rebuilt, ToString::to_string)
}

fn is_address_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '@')
}

fn rebuild(caps: &Captures<'_>) -> String {
    let name = &caps["name"];
    let gap = &caps["gap"];
    let noise = &caps["noise"];
    let domain = &caps["domain"];

    // A display name ahead of the real address leaves a separator inside the
    // noise span; keep only what follows it.
    if let Some((idx, sep)) = noise.char_indices().rev().find(|&(_, c)| is_separator(c)) {
        let tail = &noise[idx + sep.len_utf8()..];
        return if tail.is_empty() || tail.starts_with('.') {
            format!("{name}{tail}{domain}")
        } else {
            format!("{tail}{domain}")
        };
    }

    // "John <john@x.com>" keeps the address; "houston <.ward@x.com>" is one
    // address split around the bracket.
    if gap.is_empty() || noise.starts_with('.') {
        format!("{name}{noise}{domain}")
    } else {
        format!("{noise}{domain}")
    }
}

/// Reformat a whole header value, one entry per comma-separated fragment.
///
/// An empty value yields no entries; an unparseable fragment yields an empty
/// entry so positions line up with the original list.
#[must_use]
pub fn reformat_addresses(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(reformat_fragment).collect()
}

/// Domain of one address: `billw@calpine.no.com` gives `calpine.no`
#[must_use]
pub fn extract_domain(address: &str) -> Option<String> {
    DOMAIN
        .captures(address)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|domain| !domain.is_empty())
}

/// Unique domains of a record's addresses, sorted
#[must_use]
pub fn domains_of<S: AsRef<str>>(addresses: &[S]) -> Vec<String> {
    addresses
        .iter()
        .filter_map(|a| extract_domain(a.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

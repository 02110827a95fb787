//! Identifier normalization.
//!
//! Raw schema identifiers (`frameId`, `getResponseBodyForInterception`,
//! `-Infinity`) are turned into exported Go identifiers (`FrameID`,
//! `GetResponseBodyForInterception`, `NegativeInfinity`).
//!
//! # Rules
//!
//! | Step | Rule | Example |
//! |------|------|---------|
//! | (a) | capitalize words, upper-case initialisms | `requestUrl` → `RequestURL` |
//! | (b) | fix a trailing plural acronym | `nodeIds` → `NodeIDs` |
//! | (c) | fixed irregular rename | `xpathResult` → `XPathResult` |
//!
//! [`normalize`] is idempotent. Declared type names and the type half of
//! every `$ref` are normalized independently, so both sides must agree.

/// Common initialisms, upper-cased as whole words (golint's list).
const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
    "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS", "TTL",
    "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// Trailing plural acronyms left in mixed case by step (a).
const PLURAL_ACRONYMS: &[(&str, &str)] = &[("Ids", "IDs"), ("Urls", "URLs"), ("Uuids", "UUIDs")];

/// Irregular abbreviations step (a) cannot infer.
const RENAMES: &[(&str, &str)] = &[("Xpath", "XPath")];

/// Go keywords plus names the emitter uses in constructors and setters.
const RESERVED_PARAMS: &[&str] = &[
    "a", "args", "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface", "map", "new",
    "package", "range", "return", "select", "struct", "switch", "type", "var",
];

/// Normalize a raw schema identifier into an exported identifier.
///
/// # Examples
///
/// ```
/// use cdpgen_core::naming::normalize;
///
/// assert_eq!(normalize("frameId"), "FrameID");
/// assert_eq!(normalize("backendNodeIds"), "BackendNodeIDs");
/// assert_eq!(normalize("HTMLElement"), "HTMLElement");
/// assert_eq!(normalize(&normalize("requestUrl")), "RequestURL");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut ident: String = split_words(raw).into_iter().map(fix_word).collect();

    for (plural, fixed) in PLURAL_ACRONYMS {
        if let Some(stem) = ident.strip_suffix(plural) {
            ident = format!("{stem}{fixed}");
            break;
        }
    }

    for (from, to) in RENAMES {
        if ident.contains(from) {
            ident = ident.replace(from, to);
        }
    }

    ident
}

/// Split an identifier into words on separators and case transitions.
///
/// A boundary is placed before an upper-case letter that follows a
/// lower-case letter or digit, and before the last letter of an upper-case
/// run that is followed by a lower-case letter (`HTMLElement` →
/// `HTML`, `Element`).
pub fn split_words(raw: &str) -> Vec<&str> {
    let mut words = Vec::new();

    for chunk in raw.split(['-', '_', '.', ' ']) {
        if chunk.is_empty() {
            continue;
        }
        let chars: Vec<(usize, char)> = chunk.char_indices().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let (idx, c) = chars[i];
            if !c.is_uppercase() {
                continue;
            }
            let prev = chars[i - 1].1;
            let next_is_lower = chars.get(i + 1).is_some_and(|(_, n)| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(&chunk[start..idx]);
                start = idx;
            }
        }
        words.push(&chunk[start..]);
    }

    words
}

fn fix_word(word: &str) -> String {
    let upper = word.to_uppercase();
    if INITIALISMS.contains(&upper.as_str()) {
        upper
    } else {
        capitalize(word)
    }
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use cdpgen_core::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Unexported Go name for a raw parameter name.
///
/// The leading word is lower-cased entirely, so initialisms read naturally
/// (`url` → `url`, `urls` → `urls`, `frameId` → `frameID`). Keywords and names reserved by
/// the emitter get a `Val` suffix.
pub fn param_name(raw: &str) -> String {
    let normalized = normalize(raw);
    let mut name = String::with_capacity(normalized.len());
    if let Some(len) = leading_initialism(&normalized) {
        name.push_str(&normalized[..len].to_lowercase());
        name.push_str(&normalized[len..]);
    } else {
        for (i, word) in split_words(&normalized).iter().enumerate() {
            if i == 0 {
                name.push_str(&word.to_lowercase());
            } else {
                name.push_str(word);
            }
        }
    }
    if RESERVED_PARAMS.contains(&name.as_str()) {
        name.push_str("Val");
    }
    name
}

/// Byte length of the initialism run opening a normalized identifier.
///
/// The run may carry a plural `s` (`URLs`, `IDs`) and must end the
/// identifier or be followed by a new word.
fn leading_initialism(ident: &str) -> Option<usize> {
    let mut len = INITIALISMS
        .iter()
        .filter(|initialism| ident.starts_with(*initialism))
        .map(|initialism| initialism.len())
        .max()?;
    let at_boundary = |rest: &str| {
        rest.chars()
            .next()
            .is_none_or(|c| c.is_uppercase() || c.is_ascii_digit())
    };
    if let Some(rest) = ident[len..].strip_prefix('s')
        && at_boundary(rest)
    {
        len += 1;
    }
    at_boundary(&ident[len..]).then_some(len)
}

/// Go package name for a domain (`DOMDebugger` → `domdebugger`).
pub fn package_name(domain: &str) -> String {
    domain.to_ascii_lowercase()
}

/// Drop a leading domain name from a type identifier.
///
/// `Security` + `SecurityState` reads as `security.State` once the type
/// lives in its own package. The prefix is only stripped when something
/// exported remains.
pub fn strip_stutter(domain_ident: &str, type_ident: &str) -> String {
    match type_ident.strip_prefix(domain_ident) {
        Some(rest) if rest.chars().next().is_some_and(char::is_uppercase) => rest.to_string(),
        _ => type_ident.to_string(),
    }
}

/// Identifier-safe name for an enum literal.
///
/// # Examples
///
/// ```
/// use cdpgen_core::naming::enum_literal_name;
///
/// assert_eq!(enum_literal_name("-Infinity"), "NegativeInfinity");
/// assert_eq!(enum_literal_name("-0"), "NegativeZero");
/// assert_eq!(enum_literal_name("mouseMoved"), "MouseMoved");
/// assert_eq!(enum_literal_name("non-null"), "NonNull");
/// ```
pub fn enum_literal_name(value: &str) -> String {
    match value {
        "-Infinity" => return "NegativeInfinity".to_string(),
        "-0" => return "NegativeZero".to_string(),
        _ => {}
    }

    let name: String = value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|chunk| !chunk.is_empty())
        .map(normalize)
        .collect();

    if name.is_empty() {
        "Empty".to_string()
    } else {
        name
    }
}

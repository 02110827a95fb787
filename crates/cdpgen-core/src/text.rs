//! Description cleanup for generated doc comments.
//!
//! Schema descriptions are free text with stray whitespace, inline markdown
//! and a handful of recurring misspellings. The spelling table is built once
//! on first use and never mutated.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static SPELLING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("accomodate", "accommodate"),
        ("acessibility", "accessibility"),
        ("ammount", "amount"),
        ("seperate", "separate"),
        ("seperated", "separated"),
        ("occured", "occurred"),
        ("recieved", "received"),
        ("similiar", "similar"),
        ("succesfully", "successfully"),
        ("transfered", "transferred"),
        ("wich", "which"),
    ])
});

#[allow(clippy::unwrap_used)] // Safe: constant pattern
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]+").unwrap());

#[allow(clippy::unwrap_used)] // Safe: constant pattern
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Clean a schema description into doc-comment lines.
///
/// Whitespace runs collapse to one space, blank-line paragraphs are kept
/// as single empty lines, known misspellings are corrected, and the text
/// ends with a period. Returns no lines for an empty description.
pub fn clean_description(raw: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in raw.lines() {
        let line = SPACES.replace_all(line.trim(), " ");
        if line.is_empty() {
            if lines.last().is_some_and(|l| !l.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }
        lines.push(fix_spelling(&line));
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }

    if let Some(last) = lines.last_mut() {
        if !last.ends_with(['.', '!', '?', ':']) && !last.ends_with("```") {
            last.push('.');
        }
    }
    lines
}

/// Correct known misspellings, preserving a leading capital.
pub fn fix_spelling(text: &str) -> String {
    WORD.replace_all(text, |caps: &regex::Captures<'_>| {
        let word = &caps[0];
        let lower = word.to_lowercase();
        match SPELLING.get(lower.as_str()) {
            Some(fixed) if word.starts_with(char::is_uppercase) => crate::naming::capitalize(fixed),
            Some(fixed) => (*fixed).to_string(),
            None => word.to_string(),
        }
    })
    .into_owned()
}

/// Marker the protocol appends to every binary string field.
const BASE64_MARKER: &str = "(encoded as a base64 string when passed over json)";

const BASE64_PHRASES: &[&str] = &["base64-encoded", "base64 encoded"];

/// Words that make an encoding statement apply only to some values.
const CONDITIONALS: &[&str] = &["if", "unless", "otherwise"];

/// Whether a description states that the value is always base64-encoded.
///
/// The protocol's explicit marker always counts. A bare "base64-encoded"
/// counts only in a description with no conditional, since fields such as
/// `Network.WebSocketFrame.payloadData` carry text for some values.
pub fn mentions_base64(description: &str) -> bool {
    let text = description.to_ascii_lowercase();
    if text.contains(BASE64_MARKER) {
        return true;
    }
    let stated = BASE64_PHRASES.iter().any(|phrase| text.contains(phrase));
    stated
        && !text
            .split(|c: char| !c.is_ascii_alphabetic())
            .any(|word| CONDITIONALS.contains(&word))
}

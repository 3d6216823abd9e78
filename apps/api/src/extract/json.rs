//! Steps 1-3 of the recovery chain: getting a JSON object out of a reply that
//! may bury it in prose or markdown fences.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    // ```json ... ``` or plain ``` ... ```, first occurrence anywhere in prose
    Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fence regex is valid")
});

/// Step 1: the entire reply is the JSON object.
pub fn parse_direct<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(raw.trim()).ok()
}

/// Step 2: the reply wraps the JSON in a fenced code block, with or without a
/// `json` language tag. Returns the fence contents, not a parse.
pub fn fenced_block(raw: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Step 3: the first top-level brace-delimited substring. Tracks string and
/// escape state so braces inside JSON strings do not unbalance the scan.
pub fn first_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let bytes = raw.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Runs steps 1-3 in order and returns the first successful parse.
pub fn recover<T: DeserializeOwned>(raw: &str) -> Option<T> {
    if let Some(parsed) = parse_direct(raw) {
        return Some(parsed);
    }
    if let Some(parsed) = fenced_block(raw).and_then(|block| parse_direct(block)) {
        return Some(parsed);
    }
    first_json_object(raw).and_then(|object| parse_direct(object))
}

//! Tool URL parsing.
//!
//! Tool URLs look like `https://sequencer-v2.heurist.xyz/tool0f1234de/sse`;
//! the hex run after `/tool` is the tool id.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Host serving tool endpoints, used to expand bare ids.
pub const TOOL_HOST: &str = "https://sequencer-v2.heurist.xyz";

static TOOL_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/tool([a-f0-9]+)(?:/|$)").unwrap());

static BARE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-f0-9]+$").unwrap());

/// Turn user input into a tool URL.
///
/// A bare hex id expands to the canonical SSE URL; anything else must
/// already be a valid URL.
pub fn normalize_input(input: &str) -> Result<String> {
    let input = input.trim();
    if !input.starts_with("http") && BARE_ID_PATTERN.is_match(input) {
        return Ok(canonical_url(&input.to_ascii_lowercase()));
    }
    url::Url::parse(input).map_err(|_| Error::InvalidToolUrl {
        input: input.to_string(),
    })?;
    Ok(input.to_string())
}

pub fn canonical_url(tool_id: &str) -> String {
    format!("{TOOL_HOST}/tool{tool_id}/sse")
}

/// Extract the tool id from a tool URL.
pub fn extract_tool_id(url: &str) -> Result<String> {
    TOOL_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| Error::MissingToolId {
            url: url.to_string(),
        })
}

//! Target list selection and parsing.

use serde::{Deserialize, Serialize};

/// How the active target list was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Domestic,
    International,
    Custom,
}

/// Parse operator-entered text into a target list.
///
/// Tokens split on whitespace and commas; a leading scheme and one trailing
/// slash are stripped so pasted URLs become bare hostnames. No further
/// validation happens here: a malformed entry simply fails its probes.
pub fn parse_targets(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .map(clean_token)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn clean_token(token: &str) -> &str {
    let token = token
        .strip_prefix("https://")
        .or_else(|| token.strip_prefix("http://"))
        .unwrap_or(token);
    token.strip_suffix('/').unwrap_or(token)
}

//! Tick tokens: `<back><neck>` label codes, `-` for a missing sample
//!
//! `rf` = reclined back, forward-leaning neck; `u-` = upright back, no neck.

use crate::error::{PostureError, Result};
use crate::types::PostureLabel;

/// Labels of one tick
pub type TickSample = (Option<PostureLabel>, Option<PostureLabel>);

/// Parse one tick token
pub fn parse_tick(token: &str) -> Result<TickSample> {
    let chars: Vec<char> = token.trim().chars().collect();
    match chars.as_slice() {
        [back, neck] => Ok((parse_slot(*back)?, parse_slot(*neck)?)),
        _ => Err(PostureError::InvalidTick(token.to_string())),
    }
}

/// Parse a whitespace- or comma-separated run of tick tokens
pub fn parse_ticks(line: &str) -> Result<Vec<TickSample>> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(parse_tick)
        .collect()
}

/// Parse an optional label field of an API request
pub fn parse_optional(code: Option<&str>) -> Result<Option<PostureLabel>> {
    match code.map(str::trim) {
        None | Some("") | Some("-") => Ok(None),
        Some(code) => code.parse().map(Some),
    }
}

fn parse_slot(c: char) -> Result<Option<PostureLabel>> {
    if c == '-' {
        Ok(None)
    } else {
        PostureLabel::from_code(c).map(Some)
    }
}

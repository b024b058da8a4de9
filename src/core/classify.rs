// Logtally - core/classify.rs
//
// Pure classification of one trimmed, non-empty line.
//
// Classification never decides whether a line is attached to an entry;
// that is the parser's responsibility. No side effects.

use crate::core::model::Level;
use regex::Regex;
use std::sync::OnceLock;

/// Header grammar, applied per physical, trimmed, non-empty line:
///   1 = local date-time (ms precision), 2 = signed zone offset,
///   3 = level token, 4 = message remainder.
const HEADER_PATTERN: &str =
    r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}) ([+-]\d{2}:\d{2}) \[(.*?)\] (.*)$";

/// Lines opening with dashes (separator rules, "--- End of ..." trailers).
const DASH_RULE_PATTERN: &str = r"^\s*---";

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEADER_PATTERN).expect("header pattern is valid"))
}

fn dash_rule_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DASH_RULE_PATTERN).expect("dash rule pattern is valid"))
}

/// Classification outcome for one trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// The line matches the full header grammar. The token may still fail
    /// to normalise to a level; the shape alone makes it a header.
    Header(HeaderParts<'a>),

    /// Not a header, and matching at least one continuation predicate.
    Continuation,

    /// Neither of the above.
    Text,
}

/// Capture groups of a header line, borrowed from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderParts<'a> {
    pub datetime: &'a str,
    pub offset: &'a str,
    pub token: &'a str,
    pub rest: &'a str,
}

impl HeaderParts<'_> {
    /// The normalised level, if the token is one of the recognised two.
    pub fn level(&self) -> Option<Level> {
        Level::from_token(self.token)
    }
}

/// Classify one trimmed, non-empty line.
pub fn classify(line: &str) -> LineClass<'_> {
    if let Some(caps) = header_regex().captures(line) {
        // Capture groups 1..=4 always exist when the pattern matches.
        return LineClass::Header(HeaderParts {
            datetime: caps.get(1).map_or("", |m| m.as_str()),
            offset: caps.get(2).map_or("", |m| m.as_str()),
            token: caps.get(3).map_or("", |m| m.as_str()),
            rest: caps.get(4).map_or("", |m| m.as_str()),
        });
    }
    if is_continuation(line) {
        LineClass::Continuation
    } else {
        LineClass::Text
    }
}

/// Continuation predicates. Any match routes the line toward the open entry.
pub fn is_continuation(line: &str) -> bool {
    line.starts_with("at ")
        || line.contains("   at ")
        || line.contains("--- End of")
        || line.contains(" ---> ")
        || dash_rule_regex().is_match(line)
}

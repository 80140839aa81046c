//! Command splitting for documentation blocks.
//!
//! One console block may hold several requests. Every line starting with an
//! HTTP verb opens a new command; the lines that follow (query continuation,
//! JSON body) belong to it. Callout markers such as `<1>` are stripped from
//! line ends before anything else looks at the text.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a line that opens a request.
pub(crate) static RE_HTTP_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:HEAD|GET|PUT|DELETE|POST)\b").unwrap());

/// Matches the run of callout markers at a line end, with the whitespace before them.
static RE_CALLOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)(?:\s*<\d+>)+\s*$").unwrap());

/// Remove the trailing `<N>` callouts from a single line.
pub fn strip_callout(line: &str) -> std::borrow::Cow<'_, str> {
    RE_CALLOUT.replace(line, "$1")
}

/// Split a documentation block into request texts.
///
/// Each returned text ends with a newline. Blank lines before the first
/// request are dropped; other lines before it are kept together as a leading
/// text. A block without any request line yields nothing.
pub fn split(input: &str) -> Vec<String> {
    let mut commands = Vec::new();
    let mut buf = String::new();
    let mut seen_method = false;

    for raw_line in input.lines() {
        let line = strip_callout(raw_line);

        if RE_HTTP_METHOD.is_match(&line) {
            if !buf.is_empty() {
                commands.push(std::mem::take(&mut buf));
            }
            seen_method = true;
        } else if !seen_method && buf.is_empty() && line.trim().is_empty() {
            continue;
        }

        buf.push_str(&line);
        buf.push('\n');
    }

    if !seen_method {
        return Vec::new();
    }

    if !buf.is_empty() {
        commands.push(buf);
    }

    commands
}

//! Wire-name to Go identifier conversion.
//!
//! `wait_for_active_shards` → `WaitForActiveShards`, `if_seq_no` → `IfSeqNo`,
//! `routing_id` → `RoutingID`. Words listed in [`ACRONYMS`] are upper-cased
//! whole, everything else is title-cased.

/// Words rendered fully upper-case, following Go initialism conventions.
const ACRONYMS: &[&str] = &["api", "cpu", "http", "id", "ids", "ip", "json", "ttl", "uri", "url", "uuid"];

/// Convert a snake/kebab/dotted parameter name into a Go identifier.
///
/// Total function: empty words (leading `_`, doubled separators) are dropped,
/// and an input with no usable characters yields an empty string.
pub fn name_to_go(name: &str) -> String {
    name.split(['_', '-', '.'])
        .filter(|w| !w.is_empty())
        .map(word_to_go)
        .collect()
}

fn word_to_go(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if ACRONYMS.contains(&lower.as_str()) {
        return match lower.as_str() {
            // Plural initialism keeps a lower-case s: `IDs`
            "ids" => "IDs".to_string(),
            _ => lower.to_ascii_uppercase(),
        };
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

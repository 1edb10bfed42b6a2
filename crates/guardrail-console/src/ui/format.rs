use guardrail_api::LogEntry;
use serde_json::Value;

/// One audit entry as a single line: timestamp, upper-cased level, message,
/// result, and the joined categories when the entry carries any.
pub(crate) fn log_line(entry: &LogEntry) -> String {
    let mut line = format!(
        "{} - {}: {}  result: {}",
        entry.timestamp,
        entry.level.as_str().to_uppercase(),
        entry.message,
        entry.result
    );
    if let Some(categories) = entry.categories.as_deref() {
        if !categories.is_empty() {
            line.push_str(&format!(", categories: {}", categories.join(", ")));
        }
    }
    line
}

pub(crate) fn join_categories(categories: &[String]) -> String {
    if categories.is_empty() {
        "none".to_string()
    } else {
        categories.join(", ")
    }
}

pub(crate) fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// Audit messages and raw payloads can carry control characters that would
// corrupt the terminal; flatten them before handing text to ratatui.
pub(super) fn sanitize_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\u{1b}' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for seq_ch in chars.by_ref() {
                        if ('@'..='~').contains(&seq_ch) {
                            break;
                        }
                    }
                }
            }
            '\t' => out.push_str("    "),
            '\n' | '\r' => out.push(' '),
            _ if ch.is_control() => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

pub(super) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let count = text.chars().count();
    if count <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return text.chars().take(max_len).collect();
    }
    let mut out: String = text.chars().take(max_len - 3).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_sequences_are_flattened() {
        assert_eq!(sanitize_line("a\u{1b}[31mred\u{1b}[0mb"), "aredb");
        assert_eq!(sanitize_line("one\ntwo\tthree"), "one two    three");
    }

    #[test]
    fn truncation_keeps_short_text_intact() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("a longer line", 9), "a long...");
    }
}

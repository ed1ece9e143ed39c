//! Utility functions.
//!
//! Small helpers shared by the repositories and the console.

/// Escape every regex metacharacter so `text` matches literally.
pub fn escape_regex(text: &str) -> String {
    const SPECIAL: &[char] = &[
        '\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$', '#', '-',
    ];

    let mut escaped = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Split off the first whitespace-separated word.
///
/// Returns the word and the trimmed remainder.
pub fn split_first_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (text, ""),
    }
}

//! Business logic services.

pub mod auth;
pub mod car;
pub mod dashboard;
pub mod driver;
pub mod manufacturer;

/// Substring `ILIKE` pattern for user text, with `\`, `%` and `_` matched literally.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

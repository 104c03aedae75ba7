/// Trim and lowercase free text for comparison.
///
/// Every string compared by the matcher passes through here first, on
/// both sides, so matching is case- and whitespace-insensitive.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Uppercase the first character for display, leaving the rest as-is.
/// Operates on characters, not bytes, so accented keys stay intact.
pub fn title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

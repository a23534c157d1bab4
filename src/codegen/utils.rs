//! Naming helpers shared by the renderers.

/// Capitalize only the first character, leaving the rest untouched.
///
/// Module symbol names keep whatever casing the user typed after the first
/// character: `userProfile` becomes `UserProfile`, `order-item` becomes
/// `Order-item`. The folder name is the lowercased form of this.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

//! Shared name utilities.

/// Last segment of a dotted name (e.g. "com.example.Main" -> "Main")
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Everything before the last dot, or "" for names without a package
pub fn package_of(qualified: &str) -> &str {
    qualified
        .rsplit_once('.')
        .map(|(package, _)| package)
        .unwrap_or("")
}

/// Check that a string is a valid identifier (letters, digits, `_`, `$`, not starting with a digit)
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Check that every dot-separated segment is an identifier
pub fn is_qualified_name(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_identifier)
}

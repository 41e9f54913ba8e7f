//! String transformation utilities for code generation

/// Splits a fully-qualified name into its namespace and simple name.
///
/// A name without any `.` has an empty namespace.
///
/// # Examples
/// ```
/// use contractgen::core::utils::split_qualified_name;
///
/// assert_eq!(split_qualified_name("com.example.Api"), ("com.example", "Api"));
/// assert_eq!(split_qualified_name("Api"), ("", "Api"));
/// ```
pub fn split_qualified_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => ("", name),
    }
}

/// Joins a namespace and a simple name, omitting the dot for the root namespace.
pub fn qualify(namespace: &str, simple_name: &str) -> String {
    if namespace.is_empty() {
        simple_name.to_string()
    } else {
        format!("{namespace}.{simple_name}")
    }
}

/// Converts a dotted namespace into a slash separated path.
///
/// # Examples
/// ```
/// use contractgen::core::utils::namespace_to_path;
///
/// assert_eq!(namespace_to_path("com.example.assets"), "com/example/assets");
/// ```
pub fn namespace_to_path(namespace: &str) -> String {
    namespace.replace('.', "/")
}

/// Lowercases the first character of a string, leaving the rest untouched.
///
/// # Examples
/// ```
/// use contractgen::core::utils::lowercase_first;
///
/// assert_eq!(lowercase_first("Name"), "name");
/// assert_eq!(lowercase_first("URL"), "uRL");
/// ```
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Escapes text for use inside a Java string literal (without the quotes).
///
/// # Examples
/// ```
/// use contractgen::core::utils::escape_java_string;
///
/// assert_eq!(escape_java_string("say \"hi\"\n"), "say \\\"hi\\\"\\n");
/// ```
pub fn escape_java_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Wraps text in double quotes as an escaped Java string literal.
pub fn java_string_literal(s: &str) -> String {
    format!("\"{}\"", escape_java_string(s))
}

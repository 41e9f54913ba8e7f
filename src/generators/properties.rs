//! Reader for `.properties` message files

use std::collections::BTreeMap;

/// Parsed key/value pairs of one properties file; later duplicates win
pub type Properties = BTreeMap<String, String>;

/// Decode a properties file, reading it as UTF-8 and falling back to ISO-8859-1
pub fn decode_properties(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

/// Parse properties text.
///
/// Supports `#`/`!` comment lines, `=`, `:` or whitespace separators,
/// backslash line continuations and the `\t \n \r \f \uXXXX` escapes. Any
/// other escaped character stands for itself.
pub fn parse_properties(content: &str) -> Properties {
    let mut properties = Properties::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        properties.insert(unescape(key), unescape(value));
    }
    properties
}

/// An odd number of trailing backslashes continues the line
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                return (&line[..idx], line[idx + 1..].trim_start());
            }
            c if c.is_whitespace() => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .map(str::trim_start)
        .unwrap_or(rest);
    (&line[..key_end], rest)
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_and_comments() {
        let props = parse_properties(
            "# comment\n! also a comment\n\ngreeting = Hello {0}\nfarewell:Bye\nshort value here\n",
        );
        assert_eq!(props.len(), 3);
        assert_eq!(props["greeting"], "Hello {0}");
        assert_eq!(props["farewell"], "Bye");
        assert_eq!(props["short"], "value here");
    }

    #[test]
    fn test_continuation_lines() {
        let props = parse_properties("long = first \\\n    second\n");
        assert_eq!(props["long"], "first second");
    }

    #[test]
    fn test_escapes() {
        let props = parse_properties("a\\=b = tab\\there\nuni = caf\\u00e9\nback = c:\\\\dir\n");
        assert_eq!(props["a=b"], "tab\there");
        assert_eq!(props["uni"], "café");
        assert_eq!(props["back"], "c:\\dir");
    }

    #[test]
    fn test_decode_utf8_and_latin1() {
        assert_eq!(decode_properties("title=café\n".as_bytes().to_vec()), "title=café\n");
        assert_eq!(decode_properties(b"title=caf\xe9\n".to_vec()), "title=café\n");
    }

    #[test]
    fn test_later_duplicate_wins() {
        let props = parse_properties("k=1\nk=2\n");
        assert_eq!(props["k"], "2");
    }

    #[test]
    fn test_key_without_value() {
        let props = parse_properties("empty\nblank =\n");
        assert_eq!(props["empty"], "");
        assert_eq!(props["blank"], "");
    }
}

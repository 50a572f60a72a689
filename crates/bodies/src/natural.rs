//! Presentation text for raw field names and values.

const CONNECTORS: [&str; 3] = ["of", "a", "to"];

/// Turn a raw field name or value into display text.
///
/// Integers of 10000 and above get thousands separators (`"12345"` becomes `"12,345"`).
/// Anything else is title-cased at the start and after every underscore, underscores
/// become spaces, and the connector words `of`, `a` and `to` are lowercased again unless
/// they open the text (`"length_of_year"` becomes `"Length of Year"`).
pub fn natural_language(value: &str) -> String {
    let lowered = value.to_lowercase();
    if lowered.is_empty() {
        return lowered;
    }
    if is_integer_literal(&lowered) {
        group_thousands(&lowered)
    } else {
        title_case(&lowered)
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn group_thousands(s: &str) -> String {
    if s.starts_with('-') || s.trim_start_matches('0').len() < 5 {
        return s.to_string();
    }
    let len = s.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn title_case(s: &str) -> String {
    let mut spaced = String::with_capacity(s.len());
    let mut capitalize = true;
    for ch in s.chars() {
        if ch == '_' {
            spaced.push(' ');
            capitalize = true;
        } else if capitalize {
            spaced.extend(ch.to_uppercase());
            capitalize = false;
        } else {
            spaced.push(ch);
        }
    }

    spaced
        .split(' ')
        .enumerate()
        .map(|(i, word)| {
            if i > 0 && CONNECTORS.iter().any(|c| word.eq_ignore_ascii_case(c)) {
                word.to_lowercase()
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
